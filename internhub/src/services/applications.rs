//! Applications service
//!
//! A student applying to a job. Student name, job title and company name are
//! copied onto the application when it is created and never refreshed.
//! A student may hold at most one application per job.
//!
//! The student notification is a side effect: once the application is saved,
//! a failure to record the notification is logged and the call still succeeds.

use super::NotificationsService;
use crate::database::{
    Application, ApplicationStatus, Collection, CreateNotificationRequest, Job, JobStatus,
    NotificationKind, Store, UpdateApplicationRequest, User,
};
use crate::error::{AppError, Result};
use crate::ids::{ApplicationId, JobId, UserId};
use chrono::Utc;

#[derive(Clone)]
pub struct ApplicationsService {
    applications: Collection<Application>,
    notifications: NotificationsService,
}

impl ApplicationsService {
    pub fn new(store: Store, notifications: NotificationsService) -> Self {
        Self {
            applications: store.collection(),
            notifications,
        }
    }

    pub async fn list(&self) -> Result<Vec<Application>> {
        self.applications.list().await
    }

    pub async fn get(&self, id: &ApplicationId) -> Result<Application> {
        self.applications.get(id).await
    }

    pub async fn list_for_student(&self, student_id: &UserId) -> Result<Vec<Application>> {
        let applications = self.list().await?;
        Ok(applications
            .into_iter()
            .filter(|a| &a.student_id == student_id)
            .collect())
    }

    pub async fn list_for_job(&self, job_id: &JobId) -> Result<Vec<Application>> {
        let applications = self.list().await?;
        Ok(applications
            .into_iter()
            .filter(|a| &a.job_id == job_id)
            .collect())
    }

    pub async fn has_applied(&self, student_id: &UserId, job_id: &JobId) -> Result<bool> {
        let applications = self.list().await?;
        Ok(applications
            .iter()
            .any(|a| &a.student_id == student_id && &a.job_id == job_id))
    }

    /// Apply `student` to `job`
    pub async fn apply(&self, job: &Job, student: &User) -> Result<Application> {
        if job.status == JobStatus::Stopped {
            return Err(AppError::InvalidInput(format!(
                "Job {} is no longer accepting applications",
                job.id
            )));
        }
        if self.has_applied(&student.id, &job.id).await? {
            return Err(AppError::DuplicateApplication {
                student_id: student.id.to_string(),
                job_id: job.id.to_string(),
            });
        }

        tracing::info!("Student {} applying to job {}", student.id, job.id);

        let application = Application {
            id: ApplicationId::generate(),
            job_id: job.id.clone(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            job_title: job.title.clone(),
            company_name: job.company_name.clone(),
            status: ApplicationStatus::Applied,
            applied_date: Utc::now().date_naive(),
        };

        let application = self.applications.append(application).await?;

        self.notify(CreateNotificationRequest {
            user_id: student.id.clone(),
            title: "Application submitted".to_string(),
            message: format!(
                "You applied to {} at {}",
                application.job_title, application.company_name
            ),
            kind: NotificationKind::Application,
            link: None,
        })
        .await;

        Ok(application)
    }

    /// Shallow-merge `patch` over the application. No notification is sent;
    /// status moves that should reach the student go through `update_status`.
    pub async fn update(
        &self,
        id: &ApplicationId,
        patch: &UpdateApplicationRequest,
    ) -> Result<Application> {
        tracing::debug!("Updating application: {}", id);
        self.applications.merge(id, patch).await
    }

    /// Move an application through the hiring pipeline and notify the student
    pub async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application> {
        tracing::info!("Application {} -> {:?}", id, status);

        let application = self
            .applications
            .modify(id, |a| {
                a.status = status;
                Ok(())
            })
            .await?;

        let (title, kind) = match status {
            ApplicationStatus::Applied => ("Application received", NotificationKind::Info),
            ApplicationStatus::Shortlisted => {
                ("You have been shortlisted", NotificationKind::Success)
            }
            ApplicationStatus::Rejected => ("Application update", NotificationKind::Warning),
            ApplicationStatus::Offered => ("Offer received", NotificationKind::Success),
        };

        self.notify(CreateNotificationRequest {
            user_id: application.student_id.clone(),
            title: title.to_string(),
            message: format!(
                "{} at {}: {:?}",
                application.job_title, application.company_name, status
            ),
            kind,
            link: None,
        })
        .await;

        Ok(application)
    }

    async fn notify(&self, req: CreateNotificationRequest) {
        let user_id = req.user_id.clone();
        if let Err(e) = self.notifications.create(req).await {
            tracing::warn!("Failed to notify {}: {}", user_id, e);
        }
    }

    pub async fn remove(&self, id: &ApplicationId) -> Result<()> {
        tracing::info!("Withdrawing application: {}", id);
        self.applications.remove(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Eligibility, JobType, Role};
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (ApplicationsService, NotificationsService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let store = Store::new(pool);
        let notifications = NotificationsService::new(store.clone());
        (
            ApplicationsService::new(store, notifications.clone()),
            notifications,
        )
    }

    fn job(id: &str) -> Job {
        Job {
            id: JobId::from(id),
            company_id: UserId::from("company1"),
            company_name: "TechCorp".to_string(),
            title: "Backend Intern".to_string(),
            description: String::new(),
            package: 20000.0,
            location: "Remote".to_string(),
            job_type: JobType::Internship,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            eligibility: Eligibility::default(),
            rounds: Vec::new(),
            posted_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status: JobStatus::Active,
        }
    }

    fn student(id: &str) -> User {
        User {
            id: UserId::from(id),
            role: Role::Student,
            name: "Meera Nair".to_string(),
            company_name: None,
            email: format!("{}@x.edu", id),
            password: None,
            approved: true,
            phone: None,
            cgpa: Some(8.0),
            branch: Some("CSE".to_string()),
            skills: Vec::new(),
            resume_url: None,
            website: None,
            description: None,
            linkedin: None,
            github: None,
        }
    }

    #[tokio::test]
    async fn test_apply_denormalizes_and_notifies() {
        let (service, notifications) = create_test_service().await;

        let application = service.apply(&job("job1"), &student("s1")).await.unwrap();

        assert_eq!(application.student_name, "Meera Nair");
        assert_eq!(application.job_title, "Backend Intern");
        assert_eq!(application.company_name, "TechCorp");
        assert_eq!(application.status, ApplicationStatus::Applied);
        assert_eq!(application.applied_date, Utc::now().date_naive());

        assert_eq!(service.list().await.unwrap(), vec![application]);
        assert_eq!(
            notifications.unread_count(&UserId::from("s1")).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_application_rejected() {
        let (service, _) = create_test_service().await;

        service.apply(&job("job1"), &student("s1")).await.unwrap();
        let err = service.apply(&job("job1"), &student("s1")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateApplication { .. }));

        service.apply(&job("job2"), &student("s1")).await.unwrap();
        service.apply(&job("job1"), &student("s2")).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 3);
        assert_eq!(service.list_for_student(&UserId::from("s1")).await.unwrap().len(), 2);
        assert_eq!(service.list_for_job(&JobId::from("job1")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stopped_job_rejects_applications() {
        let (service, _) = create_test_service().await;
        let mut closed = job("job1");
        closed.status = JobStatus::Stopped;

        let err = service.apply(&closed, &student("s1")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_status() {
        let (service, notifications) = create_test_service().await;
        let application = service.apply(&job("job1"), &student("s1")).await.unwrap();

        let updated = service
            .update_status(&application.id, ApplicationStatus::Offered)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Offered);
        assert_eq!(updated.job_title, application.job_title);

        let inbox = notifications.list_for_user(&UserId::from("s1")).await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].title, "Offer received");

        let err = service
            .update_status(&ApplicationId::from("app404"), ApplicationStatus::Rejected)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let (service, notifications) = create_test_service().await;
        let application = service.apply(&job("job1"), &student("s1")).await.unwrap();

        let patch = UpdateApplicationRequest {
            company_name: Some("TechCorp Solutions".to_string()),
            status: Some(ApplicationStatus::Rejected),
            ..Default::default()
        };
        service.update(&application.id, &patch).await.unwrap();

        let stored = service.get(&application.id).await.unwrap();
        let expected = Application {
            company_name: "TechCorp Solutions".to_string(),
            status: ApplicationStatus::Rejected,
            ..application
        };
        assert_eq!(stored, expected);
        assert_eq!(
            notifications.unread_count(&UserId::from("s1")).await.unwrap(),
            1
        );

        let err = service
            .update(&ApplicationId::from("app404"), &UpdateApplicationRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_saved_application() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&pool).await.unwrap();

        let inbox_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&inbox_pool).await.unwrap();
        inbox_pool.close().await;

        let service = ApplicationsService::new(
            Store::new(pool),
            NotificationsService::new(Store::new(inbox_pool)),
        );

        let application = service.apply(&job("job1"), &student("s1")).await.unwrap();
        assert_eq!(service.list().await.unwrap(), vec![application.clone()]);

        let shortlisted = service
            .update_status(&application.id, ApplicationStatus::Shortlisted)
            .await
            .unwrap();
        assert_eq!(
            service.get(&application.id).await.unwrap().status,
            ApplicationStatus::Shortlisted
        );
        assert_eq!(shortlisted.status, ApplicationStatus::Shortlisted);
    }
}
