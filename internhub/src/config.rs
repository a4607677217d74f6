//! Application configuration
//!
//! Central location for storage key names, sentinel values and limits,
//! plus the runtime [`Config`] loaded from the environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// ===== Collection Keys =====

pub const USERS_KEY: &str = "users";
pub const JOBS_KEY: &str = "jobs";
pub const APPLICATIONS_KEY: &str = "applications";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const HACKATHONS_KEY: &str = "hackathons";
pub const COURSES_KEY: &str = "courses";
pub const RESOURCES_KEY: &str = "resources";
pub const ANNOUNCEMENTS_KEY: &str = "announcements";
pub const SUPPORT_TICKETS_KEY: &str = "support_tickets";

/// Every collection the seeder is responsible for, in seeding order
pub const COLLECTION_KEYS: [&str; 9] = [
    USERS_KEY,
    JOBS_KEY,
    APPLICATIONS_KEY,
    NOTIFICATIONS_KEY,
    HACKATHONS_KEY,
    COURSES_KEY,
    RESOURCES_KEY,
    ANNOUNCEMENTS_KEY,
    SUPPORT_TICKETS_KEY,
];

/// Opaque bearer credential for the remote auth gateway (a plain string, not JSON)
pub const TOKEN_KEY: &str = "token";

// ===== Scraped Data =====

/// Values upstream extractors use to mean "field left blank"
pub const UNKNOWN_SENTINELS: &[&str] = &["Not mentioned", "Not Disclosed"];

/// Generic date parsing results earlier than this year are treated as misparses
pub const MIN_FALLBACK_YEAR: i32 = 2020;

// ===== Hackathons =====

/// Inclusive range for the participant count seeded on creation
pub const MIN_SEEDED_PARTICIPANTS: u32 = 50;
pub const MAX_SEEDED_PARTICIPANTS: u32 = 500;

// ===== Storage =====

pub const DEFAULT_DB_PATH: &str = "internhub.db";
/// Connections in the application pool (migrations always use one)
pub const DB_POOL_SIZE: u32 = 5;
/// How long a writer waits on a locked database before failing
pub const DB_BUSY_TIMEOUT_SECS: u64 = 5;

// ===== Remote Services =====

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_EXTRACT_URL: &str = "http://localhost:8000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Message used when a failed response carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

pub const USER_AGENT: &str = "InternHub";

/// Runtime settings, read once at start-up
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub api_url: String,
    pub extract_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            extract_url: DEFAULT_EXTRACT_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            db_path: env::var("INTERNHUB_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            api_url: env::var("INTERNHUB_API_URL").unwrap_or(defaults.api_url),
            extract_url: env::var("INTERNHUB_EXTRACT_URL").unwrap_or(defaults.extract_url),
            http_timeout: Duration::from_secs(try_load(
                "INTERNHUB_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value {raw:?}: {e}; using default {default}");
            default
        }),
        Err(_) => {
            tracing::debug!("{key} not set, using default: {default}");
            default
        }
    }
}
