//! Jobs service
//!
//! Internship and full-time postings. New postings go to the front of the
//! collection so listings are most-recent-first.

use crate::database::{
    Collection, CreateJobRequest, Job, JobOwner, JobStatus, JobType, Store, UpdateJobRequest,
};
use crate::eligibility::{eligible_jobs, StudentProfile};
use crate::error::Result;
use crate::ids::{JobId, UserId};
use chrono::Utc;

/// Search criteria; every set field must match
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring of title, company name or location
    pub query: Option<String>,
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.trim().to_lowercase())
        };

        let query_ok = self.query.as_deref().map_or(true, |q| {
            contains(&job.title, q) || contains(&job.company_name, q) || contains(&job.location, q)
        });
        let location_ok = self
            .location
            .as_deref()
            .map_or(true, |l| contains(&job.location, l));

        query_ok
            && location_ok
            && self.job_type.map_or(true, |t| job.job_type == t)
            && self.status.map_or(true, |s| job.status == s)
    }
}

#[derive(Clone)]
pub struct JobsService {
    jobs: Collection<Job>,
}

impl JobsService {
    pub fn new(store: Store) -> Self {
        Self {
            jobs: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        self.jobs.list().await
    }

    pub async fn get(&self, id: &JobId) -> Result<Job> {
        self.jobs.get(id).await
    }

    /// Post a job on behalf of `owner`
    pub async fn create(&self, req: CreateJobRequest, owner: &JobOwner) -> Result<Job> {
        tracing::info!("Posting job '{}' for {}", req.title, owner.company_name);

        let job = Job {
            id: JobId::generate(),
            company_id: owner.company_id.clone(),
            company_name: owner.company_name.clone(),
            title: req.title,
            description: req.description,
            package: req.package,
            location: req.location,
            job_type: req.job_type,
            deadline: req.deadline,
            eligibility: req.eligibility,
            rounds: req.rounds,
            posted_date: Utc::now().date_naive(),
            status: JobStatus::Active,
        };

        let job = self.jobs.prepend(job).await?;
        tracing::info!("Job posted: {}", job.id);

        Ok(job)
    }

    pub async fn update(&self, id: &JobId, patch: &UpdateJobRequest) -> Result<Job> {
        tracing::debug!("Updating job: {}", id);
        self.jobs.merge(id, patch).await
    }

    pub async fn remove(&self, id: &JobId) -> Result<()> {
        tracing::info!("Deleting job: {}", id);
        self.jobs.remove(id).await?;
        Ok(())
    }

    /// Close a posting to new applicants
    pub async fn stop_recruiting(&self, id: &JobId) -> Result<Job> {
        tracing::info!("Stopping recruitment for job: {}", id);
        self.jobs
            .modify(id, |job| {
                job.status = JobStatus::Stopped;
                Ok(())
            })
            .await
    }

    pub async fn list_by_company(&self, company_id: &UserId) -> Result<Vec<Job>> {
        let jobs = self.list().await?;
        Ok(jobs
            .into_iter()
            .filter(|job| &job.company_id == company_id)
            .collect())
    }

    pub async fn search(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let jobs = self.list().await?;
        Ok(jobs.into_iter().filter(|job| filter.matches(job)).collect())
    }

    /// Active jobs the student qualifies for
    pub async fn eligible_for(&self, student: &StudentProfile) -> Result<Vec<Job>> {
        let active = self
            .search(&JobFilter {
                status: Some(JobStatus::Active),
                ..Default::default()
            })
            .await?;
        Ok(eligible_jobs(&active, student))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Eligibility};
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> JobsService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        JobsService::new(Store::new(pool))
    }

    fn owner() -> JobOwner {
        JobOwner {
            company_id: UserId::from("company1"),
            company_name: "TechCorp".to_string(),
        }
    }

    fn request(title: &str, min_cgpa: f64, branches: &[&str]) -> CreateJobRequest {
        CreateJobRequest {
            title: title.to_string(),
            description: "Build things".to_string(),
            package: 25000.0,
            location: "Pune".to_string(),
            job_type: JobType::Internship,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            eligibility: Eligibility {
                min_cgpa,
                branches: branches.iter().map(|b| b.to_string()).collect(),
            },
            rounds: vec!["Test".to_string(), "Interview".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_prepends_and_stamps() {
        let service = create_test_service().await;

        let first = service.create(request("First", 6.0, &[]), &owner()).await.unwrap();
        let second = service.create(request("Second", 6.0, &[]), &owner()).await.unwrap();

        assert_eq!(second.posted_date, Utc::now().date_naive());
        assert_eq!(second.status, JobStatus::Active);
        assert_eq!(second.company_name, "TechCorp");

        let jobs = service.list().await.unwrap();
        assert_eq!(jobs, vec![second, first]);
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let service = create_test_service().await;
        let job = service.create(request("Intern", 7.0, &["CSE"]), &owner()).await.unwrap();

        let patch = UpdateJobRequest {
            title: Some("Senior Intern".to_string()),
            package: Some(40000.0),
            ..Default::default()
        };
        service.update(&job.id, &patch).await.unwrap();

        let stored = service.get(&job.id).await.unwrap();
        assert_eq!(stored.title, "Senior Intern");
        assert_eq!(stored.package, 40000.0);

        let expected = Job {
            title: "Senior Intern".to_string(),
            package: 40000.0,
            ..job
        };
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = create_test_service().await;

        let err = service
            .update(&JobId::from("job404"), &UpdateJobRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let service = create_test_service().await;
        let job = service.create(request("Gone", 6.0, &[]), &owner()).await.unwrap();

        service.remove(&job.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        service.remove(&job.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stop_recruiting() {
        let service = create_test_service().await;
        let job = service.create(request("Closing", 6.0, &[]), &owner()).await.unwrap();

        let stopped = service.stop_recruiting(&job.id).await.unwrap();
        assert_eq!(stopped.status, JobStatus::Stopped);
        assert_eq!(stopped.title, "Closing");

        let err = service.stop_recruiting(&JobId::from("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_filters() {
        let service = create_test_service().await;
        service.create(request("Rust Developer", 6.0, &[]), &owner()).await.unwrap();
        let mut analyst = request("Data Analyst", 6.0, &[]);
        analyst.job_type = JobType::FullTime;
        analyst.location = "Mumbai".to_string();
        service.create(analyst, &owner()).await.unwrap();

        let by_query = service
            .search(&JobFilter {
                query: Some("rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_query.len(), 1);
        assert_eq!(by_query[0].title, "Rust Developer");

        let by_company = service
            .search(&JobFilter {
                query: Some("techcorp".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_company.len(), 2);

        let full_time_in_mumbai = service
            .search(&JobFilter {
                job_type: Some(JobType::FullTime),
                location: Some("mum".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(full_time_in_mumbai.len(), 1);
        assert_eq!(full_time_in_mumbai[0].title, "Data Analyst");
    }

    #[tokio::test]
    async fn test_eligible_for_skips_stopped_jobs() {
        let service = create_test_service().await;
        let open = service.create(request("Open", 6.0, &[]), &owner()).await.unwrap();
        let stopped = service.create(request("Stopped", 6.0, &[]), &owner()).await.unwrap();
        service.create(request("CSE only", 6.0, &["CSE"]), &owner()).await.unwrap();
        service.stop_recruiting(&stopped.id).await.unwrap();

        let eligible = service
            .eligible_for(&StudentProfile::new(7.0, "ECE"))
            .await
            .unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, open.id);
    }
}
