//! Registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// A user's registration for an event.
///
/// Any registration status counts toward an event's announcement
/// recipient set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// The event being registered for.
    pub event_id: Uuid,
    /// The registering user.
    pub user_id: Uuid,
    /// Registration status.
    pub status: RegistrationStatus,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
}

/// Status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Holds a confirmed spot.
    Confirmed,
    /// On the waitlist.
    Waitlisted,
}

impl RegistrationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Waitlisted => "waitlisted",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
