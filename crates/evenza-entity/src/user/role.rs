//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the Evenza platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Can create events and broadcast announcements to registrants.
    Organizer,
    /// Can register for events and receive notifications.
    Attendee,
}

impl UserRole {
    /// Check if this role may manage events and announcements.
    pub fn is_organizer(&self) -> bool {
        matches!(self, Self::Organizer)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Attendee => "attendee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = evenza_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "organizer" => Ok(Self::Organizer),
            "attendee" => Ok(Self::Attendee),
            _ => Err(evenza_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: organizer, attendee"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("organizer".parse::<UserRole>().unwrap(), UserRole::Organizer);
        assert_eq!("ATTENDEE".parse::<UserRole>().unwrap(), UserRole::Attendee);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_organizer_check() {
        assert!(UserRole::Organizer.is_organizer());
        assert!(!UserRole::Attendee.is_organizer());
    }
}
