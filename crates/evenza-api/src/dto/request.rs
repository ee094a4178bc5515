//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role label: `"organizer"` or `"attendee"` (default).
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start time.
    pub starts_at: Option<DateTime<Utc>>,
}

/// Update event request; only provided fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New start time.
    pub starts_at: Option<DateTime<Utc>>,
}

/// Event registration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Join the waitlist instead of taking a confirmed spot.
    #[serde(default)]
    pub waitlisted: bool,
}

/// Create announcement request.
///
/// `status` and `scheduled_at` are raw strings: label normalization and
/// timestamp parsing are the service's responsibility so that a bad value
/// is a validation error, not a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAnnouncementRequest {
    /// Target event id.
    pub event_id: Option<Uuid>,
    /// Target event title (used when no id is given).
    pub event_title: Option<String>,
    /// Announcement title.
    pub title: String,
    /// Announcement body text.
    pub message: String,
    /// Status label; absent means draft.
    pub status: Option<String>,
    /// Dispatch instant, RFC 3339.
    pub scheduled_at: Option<String>,
    /// Dispatch immediately regardless of the status label.
    #[serde(default)]
    pub send_now: bool,
}

/// Update announcement request; only provided fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnnouncementRequest {
    /// New target event id.
    pub event_id: Option<Uuid>,
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub message: Option<String>,
    /// New status label.
    pub status: Option<String>,
    /// New dispatch instant, RFC 3339.
    pub scheduled_at: Option<String>,
}

/// Immediate dispatch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendAnnouncementRequest {
    /// Target event id.
    pub event_id: Option<Uuid>,
    /// Target event title (used when no id is given).
    pub event_title: Option<String>,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Insert rows as sent (default) or leave them pending.
    #[serde(default = "default_true")]
    pub mark_sent: bool,
}

fn default_true() -> bool {
    true
}
