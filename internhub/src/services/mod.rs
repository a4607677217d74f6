//! Services module
//!
//! Business logic for each portal collection, layered over the store.

pub mod announcements;
pub mod applications;
pub mod courses;
pub mod hackathons;
pub mod jobs;
pub mod notifications;
pub mod resources;
pub mod stats;
pub mod tickets;
pub mod users;

pub use announcements::AnnouncementsService;
pub use applications::ApplicationsService;
pub use courses::CoursesService;
pub use hackathons::HackathonsService;
pub use jobs::{JobFilter, JobsService};
pub use notifications::NotificationsService;
pub use resources::ResourcesService;
pub use stats::PortalStats;
pub use tickets::TicketsService;
pub use users::UsersService;
