//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An event organized on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event title.
    pub title: String,
    /// Longer description (optional).
    pub description: Option<String>,
    /// Venue or location string (optional).
    pub location: Option<String>,
    /// When the event starts (optional until scheduled).
    pub starts_at: Option<DateTime<Utc>>,
    /// The organizer who created the event.
    pub created_by: Uuid,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Longer description (optional).
    pub description: Option<String>,
    /// Venue or location string (optional).
    pub location: Option<String>,
    /// When the event starts (optional).
    pub starts_at: Option<DateTime<Utc>>,
    /// The organizer creating the event.
    pub created_by: Uuid,
}

/// Partial update for an existing event; only provided fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New start time.
    pub starts_at: Option<DateTime<Utc>>,
}
