//! Job eligibility matching
//!
//! A student qualifies for a job when their CGPA meets the job's minimum and
//! their branch is listed. A job with no branches listed is open to every
//! branch. Branch matching is exact string equality.

use crate::database::{Job, Role, User};

/// The parts of a student profile eligibility depends on
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub cgpa: f64,
    pub branch: String,
}

impl StudentProfile {
    pub fn new(cgpa: f64, branch: impl Into<String>) -> Self {
        Self {
            cgpa,
            branch: branch.into(),
        }
    }

    /// Profile of a student user; `None` for other roles or incomplete profiles
    pub fn from_user(user: &User) -> Option<Self> {
        match user.role {
            Role::Student => Some(Self::new(user.cgpa?, user.branch.clone()?)),
            Role::Company | Role::Admin => None,
        }
    }
}

pub fn is_eligible(job: &Job, student: &StudentProfile) -> bool {
    let criteria = &job.eligibility;

    criteria.min_cgpa <= student.cgpa
        && (criteria.branches.is_empty() || criteria.branches.iter().any(|b| *b == student.branch))
}

/// Jobs `student` qualifies for, in their original order
pub fn eligible_jobs(all_jobs: &[Job], student: &StudentProfile) -> Vec<Job> {
    all_jobs
        .iter()
        .filter(|job| is_eligible(job, student))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Eligibility, JobStatus, JobType};
    use crate::ids::{JobId, UserId};
    use chrono::NaiveDate;

    fn job(id: &str, min_cgpa: f64, branches: &[&str]) -> Job {
        Job {
            id: JobId::from(id),
            company_id: UserId::from("company1"),
            company_name: "Acme".to_string(),
            title: format!("Role {}", id),
            description: String::new(),
            package: 0.0,
            location: "Remote".to_string(),
            job_type: JobType::Internship,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            eligibility: Eligibility {
                min_cgpa,
                branches: branches.iter().map(|b| b.to_string()).collect(),
            },
            rounds: Vec::new(),
            posted_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status: JobStatus::Active,
        }
    }

    #[test]
    fn test_cgpa_and_branch_predicate() {
        let cse_job = job("1", 7.0, &["CSE"]);

        assert_eq!(
            eligible_jobs(&[cse_job.clone()], &StudentProfile::new(7.5, "CSE")),
            vec![cse_job.clone()]
        );
        assert!(eligible_jobs(&[cse_job.clone()], &StudentProfile::new(6.9, "CSE")).is_empty());
        assert!(eligible_jobs(&[cse_job], &StudentProfile::new(8.0, "ECE")).is_empty());
    }

    #[test]
    fn test_minimum_cgpa_is_inclusive() {
        assert!(is_eligible(&job("1", 7.0, &["CSE"]), &StudentProfile::new(7.0, "CSE")));
    }

    #[test]
    fn test_empty_branches_open_to_all() {
        let open_job = job("1", 6.0, &[]);

        for branch in ["CSE", "ECE", "ME", "anything"] {
            assert!(is_eligible(&open_job, &StudentProfile::new(6.0, branch)));
        }
        assert!(!is_eligible(&open_job, &StudentProfile::new(5.9, "CSE")));
    }

    #[test]
    fn test_branch_match_is_exact() {
        let cse_job = job("1", 0.0, &["CSE"]);

        assert!(!is_eligible(&cse_job, &StudentProfile::new(9.0, "cse")));
        assert!(!is_eligible(&cse_job, &StudentProfile::new(9.0, "CSE ")));
    }

    #[test]
    fn test_preserves_input_order() {
        let jobs = vec![
            job("a", 6.0, &[]),
            job("b", 9.5, &[]),
            job("c", 7.0, &["CSE", "IT"]),
            job("d", 5.0, &["ECE"]),
            job("e", 8.0, &["IT"]),
        ];

        let ids: Vec<String> = eligible_jobs(&jobs, &StudentProfile::new(8.0, "IT"))
            .into_iter()
            .map(|j| j.id.0)
            .collect();
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_profile_from_user() {
        let mut user = User {
            id: UserId::from("s1"),
            role: Role::Student,
            name: "Asha".to_string(),
            company_name: None,
            email: "asha@example.com".to_string(),
            password: None,
            approved: true,
            phone: None,
            cgpa: Some(8.2),
            branch: Some("CSE".to_string()),
            skills: Vec::new(),
            resume_url: None,
            website: None,
            description: None,
            linkedin: None,
            github: None,
        };
        assert_eq!(
            StudentProfile::from_user(&user),
            Some(StudentProfile::new(8.2, "CSE"))
        );

        user.branch = None;
        assert_eq!(StudentProfile::from_user(&user), None);

        user.branch = Some("CSE".to_string());
        user.role = Role::Company;
        assert_eq!(StudentProfile::from_user(&user), None);
    }
}
