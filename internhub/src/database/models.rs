//! Database models
//!
//! Rust structs representing persisted entities, plus the request and patch
//! types the services accept. Field names serialize in camelCase; every
//! role/status/type field is a closed enum.
//!
//! References between entities are weak: ids with no existence guarantee
//! and no cascading deletes.

use super::collection::Record;
use crate::config;
use crate::ids::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ===== Users =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(alias = "student")]
    Student,
    #[serde(alias = "company")]
    Company,
    #[serde(alias = "admin")]
    Admin,
}

impl Role {
    /// Students are approved on sign-up; everyone else waits for an admin
    pub fn auto_approved(self) -> bool {
        match self {
            Role::Student => true,
            Role::Company | Role::Admin => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub email: String,
    /// Only meaningful to the remote server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl User {
    /// Name shown on postings: company name when set, otherwise the user name
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.name)
    }
}

impl Record for User {
    type Id = UserId;
    const COLLECTION: &'static str = config::USERS_KEY;
    const ENTITY: &'static str = "User";

    fn id(&self) -> &UserId {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub role: Option<Role>,
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub cgpa: Option<f64>,
    pub branch: Option<String>,
    pub skills: Vec<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

// ===== Jobs =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Internship,
    #[serde(alias = "Full-time", alias = "Full Time")]
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Active,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Eligibility {
    #[serde(rename = "minCGPA")]
    pub min_cgpa: f64,
    /// Empty means every branch qualifies
    #[serde(default)]
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub company_id: UserId,
    /// Snapshot taken when the job was posted
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub package: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub deadline: NaiveDate,
    pub eligibility: Eligibility,
    #[serde(default)]
    pub rounds: Vec<String>,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub status: JobStatus,
}

impl Record for Job {
    type Id = JobId;
    const COLLECTION: &'static str = config::JOBS_KEY;
    const ENTITY: &'static str = "Job";

    fn id(&self) -> &JobId {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub package: f64,
    pub location: String,
    pub job_type: JobType,
    pub deadline: NaiveDate,
    pub eligibility: Eligibility,
    pub rounds: Vec<String>,
}

/// The company a job is posted on behalf of
#[derive(Debug, Clone, PartialEq)]
pub struct JobOwner {
    pub company_id: UserId,
    pub company_name: String,
}

impl From<&User> for JobOwner {
    fn from(user: &User) -> Self {
        Self {
            company_id: user.id.clone(),
            company_name: user.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

// ===== Applications =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Rejected,
    Offered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub student_id: UserId,
    pub student_name: String,
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
}

impl Record for Application {
    type Id = ApplicationId;
    const COLLECTION: &'static str = config::APPLICATIONS_KEY;
    const ENTITY: &'static str = "Application";

    fn id(&self) -> &ApplicationId {
        &self.id
    }
}

/// Corrections to the copied display fields, or a status change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
}

// ===== Notifications =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Application,
    Job,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Record for Notification {
    type Id = NotificationId;
    const COLLECTION: &'static str = config::NOTIFICATIONS_KEY;
    const ENTITY: &'static str = "Notification";

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub link: Option<String>,
}

// ===== Hackathons =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HackathonMode {
    #[default]
    Online,
    Offline,
    Hybrid,
}

impl HackathonMode {
    /// Case-insensitive match on the mode name; anything else is `None`
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" | "virtual" | "remote" => Some(HackathonMode::Online),
            "offline" | "in-person" | "in person" | "onsite" => Some(HackathonMode::Offline),
            "hybrid" => Some(HackathonMode::Hybrid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Some(Difficulty::Beginner),
            "intermediate" | "medium" => Some(Difficulty::Intermediate),
            "advanced" | "hard" | "expert" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HackathonStatus {
    Upcoming,
    Ongoing,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: HackathonId,
    pub title: String,
    pub organizer: String,
    pub logo: String,
    #[serde(default, with = "optional_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub end_date: Option<NaiveDate>,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub prize: String,
    #[serde(default)]
    pub participants: u32,
    #[serde(default)]
    pub mode: HackathonMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub registration_url: String,
    /// Derived once at creation time
    pub status: HackathonStatus,
}

impl Record for Hackathon {
    type Id = HackathonId;
    const COLLECTION: &'static str = config::HACKATHONS_KEY;
    const ENTITY: &'static str = "Hackathon";

    fn id(&self) -> &HackathonId {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHackathonRequest {
    pub title: String,
    pub organizer: String,
    pub logo: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prize: String,
    pub mode: HackathonMode,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub description: String,
    pub registration_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHackathonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<HackathonMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HackathonStatus>,
}

// ===== Courses =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    #[serde(default)]
    pub lessons: u32,
    #[serde(default)]
    pub level: Difficulty,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub youtube_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_playlist: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub students: u32,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: CourseStatus,
}

impl Record for Course {
    type Id = CourseId;
    const COLLECTION: &'static str = config::COURSES_KEY;
    const ENTITY: &'static str = "Course";

    fn id(&self) -> &CourseId {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub lessons: u32,
    pub level: Difficulty,
    pub category: String,
    pub thumbnail: Option<String>,
    pub youtube_url: String,
    pub youtube_playlist: Option<String>,
    pub is_free: bool,
    pub tags: Vec<String>,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_playlist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,
}

// ===== Resources =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Pdf,
    Article,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub url: String,
    #[serde(default)]
    pub is_new: bool,
}

impl Record for Resource {
    type Id = ResourceId;
    const COLLECTION: &'static str = config::RESOURCES_KEY;
    const ENTITY: &'static str = "Resource";

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceRequest {
    pub title: String,
    pub kind: ResourceKind,
    pub category: String,
    pub duration: Option<String>,
    pub url: String,
    pub is_new: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

// ===== Announcements =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    Info,
    Success,
    Warning,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: AnnouncementKind,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    /// Append-only, each user at most once
    #[serde(default)]
    pub read_by: Vec<UserId>,
}

impl Announcement {
    /// Active and not past its expiry at `now`
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires| expires > now)
    }

    pub fn is_read_by(&self, user_id: &UserId) -> bool {
        self.read_by.contains(user_id)
    }
}

impl Record for Announcement {
    type Id = AnnouncementId;
    const COLLECTION: &'static str = config::ANNOUNCEMENTS_KEY;
    const ENTITY: &'static str = "Announcement";

    fn id(&self) -> &AnnouncementId {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub message: String,
    pub kind: AnnouncementKind,
    pub created_by: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnnouncementKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ===== Support Tickets =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    pub id: MessageId,
    pub ticket_id: TicketId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub sender_role: Role,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: TicketId,
    pub student_id: UserId,
    pub student_name: String,
    pub student_email: String,
    pub subject: String,
    pub category: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Append-only, oldest first
    #[serde(default)]
    pub messages: Vec<SupportMessage>,
}

impl Record for SupportTicket {
    type Id = TicketId;
    const COLLECTION: &'static str = config::SUPPORT_TICKETS_KEY;
    const ENTITY: &'static str = "Support ticket";

    fn id(&self) -> &TicketId {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub category: String,
    pub priority: TicketPriority,
    /// Opening message from the student
    pub message: String,
}

/// Messages and status have their own operations and are not patchable here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
}

/// Author of a ticket message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSender {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

impl From<&User> for MessageSender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Optional calendar dates persisted as `YYYY-MM-DD`, with the empty string
/// (or null) meaning "unknown".
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_uses_persisted_field_names() {
        let job: Job = serde_json::from_value(json!({
            "id": "job1",
            "companyId": "company1",
            "companyName": "Acme",
            "title": "Backend Intern",
            "description": "Rust services",
            "package": 25000.0,
            "location": "Pune",
            "type": "Internship",
            "deadline": "2026-03-01",
            "eligibility": { "minCGPA": 7.0, "branches": ["CSE"] },
            "rounds": ["Online Test", "Interview"],
            "postedDate": "2026-01-10"
        }))
        .unwrap();

        assert_eq!(job.status, JobStatus::Active);
        assert_eq!(job.eligibility.min_cgpa, 7.0);

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["type"], "Internship");
        assert_eq!(value["eligibility"]["minCGPA"], 7.0);
        assert_eq!(value["postedDate"], "2026-01-10");
    }

    #[test]
    fn test_hackathon_empty_dates_are_unknown() {
        let hackathon: Hackathon = serde_json::from_value(json!({
            "id": "hack1",
            "title": "Build Week",
            "organizer": "Devfolio",
            "logo": "D",
            "deadline": "",
            "startDate": "2026-05-01",
            "postedDate": "2026-01-10",
            "status": "Upcoming"
        }))
        .unwrap();

        assert_eq!(hackathon.deadline, None);
        assert_eq!(hackathon.end_date, None);
        assert_eq!(hackathon.start_date, NaiveDate::from_ymd_opt(2026, 5, 1));

        let value = serde_json::to_value(&hackathon).unwrap();
        assert_eq!(value["deadline"], "");
        assert_eq!(value["startDate"], "2026-05-01");
    }

    #[test]
    fn test_ticket_status_wire_names() {
        assert_eq!(
            serde_json::to_value(TicketStatus::InProgress).unwrap(),
            "in-progress"
        );
        let status: TicketStatus = serde_json::from_value(json!("closed")).unwrap();
        assert_eq!(status, TicketStatus::Closed);
    }

    #[test]
    fn test_role_accepts_server_spelling() {
        let role: Role = serde_json::from_value(json!("company")).unwrap();
        assert_eq!(role, Role::Company);
        assert!(Role::Student.auto_approved());
        assert!(!Role::Company.auto_approved());
        assert!(!Role::Admin.auto_approved());
    }

    #[test]
    fn test_announcement_visibility() {
        let now = Utc::now();
        let mut announcement = Announcement {
            id: AnnouncementId::from("ann1"),
            title: "Drive".to_string(),
            message: "Placement drive on Friday".to_string(),
            kind: AnnouncementKind::Info,
            created_at: now,
            created_by: "Admin".to_string(),
            expires_at: None,
            is_active: true,
            read_by: Vec::new(),
        };
        assert!(announcement.is_visible_at(now));

        announcement.expires_at = Some(now - chrono::Duration::hours(1));
        assert!(!announcement.is_visible_at(now));

        announcement.expires_at = None;
        announcement.is_active = false;
        assert!(!announcement.is_visible_at(now));
    }
}
