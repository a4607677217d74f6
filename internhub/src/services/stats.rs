//! Admin dashboard counters

use crate::app::AppState;
use crate::database::{ApplicationStatus, JobStatus, Role, TicketStatus};
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    pub students: usize,
    pub companies: usize,
    pub admins: usize,
    pub pending_approvals: usize,
    pub active_jobs: usize,
    pub stopped_jobs: usize,
    pub applications: usize,
    pub shortlisted: usize,
    pub offered: usize,
    pub rejected: usize,
    pub open_hackathons: usize,
    pub published_courses: usize,
    pub open_tickets: usize,
}

impl PortalStats {
    /// Snapshot of every collection. Each collection is read once.
    pub async fn collect(state: &AppState) -> Result<Self> {
        let mut stats = PortalStats::default();

        for user in state.users.list().await? {
            match user.role {
                Role::Student => stats.students += 1,
                Role::Company => stats.companies += 1,
                Role::Admin => stats.admins += 1,
            }
            if !user.approved {
                stats.pending_approvals += 1;
            }
        }

        for job in state.jobs.list().await? {
            match job.status {
                JobStatus::Active => stats.active_jobs += 1,
                JobStatus::Stopped => stats.stopped_jobs += 1,
            }
        }

        for application in state.applications.list().await? {
            stats.applications += 1;
            match application.status {
                ApplicationStatus::Applied => {}
                ApplicationStatus::Shortlisted => stats.shortlisted += 1,
                ApplicationStatus::Offered => stats.offered += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
            }
        }

        stats.open_hackathons = state.hackathons.list_open().await?.len();
        stats.published_courses = state.courses.list_published().await?.len();
        stats.open_tickets = state
            .tickets
            .list()
            .await?
            .iter()
            .filter(|t| matches!(t.status, TicketStatus::Open | TicketStatus::InProgress))
            .count();

        Ok(stats)
    }
}
