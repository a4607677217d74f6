//! Entity identifiers
//!
//! Ids are a short prefix followed by an epoch-millisecond timestamp
//! (e.g. `job1767052800000`). The timestamp comes from a process-wide
//! monotonic clock: if two ids are requested within the same millisecond
//! the second one is bumped forward, so ids from one process never repeat.
//! Two processes writing the same database can still collide.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Next timestamp, strictly greater than every value returned before
fn next_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_MILLIS.load(Ordering::Relaxed);

    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_MILLIS.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Generate a new id: `prefix` followed by the current epoch milliseconds
pub fn new_id(prefix: &str) -> String {
    format!("{}{}", prefix, next_millis())
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn generate() -> Self {
                Self(new_id(Self::PREFIX))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(UserId, "user");
entity_id!(JobId, "job");
entity_id!(ApplicationId, "app");
entity_id!(HackathonId, "hack");
entity_id!(CourseId, "course");
entity_id!(ResourceId, "res");
entity_id!(AnnouncementId, "ann");
entity_id!(
    /// Support ticket id
    TicketId,
    "ticket"
);
entity_id!(
    /// Id of one message inside a support ticket
    MessageId,
    "msg"
);
entity_id!(NotificationId, "notif");
