//! # evenza-service
//!
//! Business logic service layer for Evenza. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod announcement;
pub mod auth;
pub mod context;
pub mod event;
pub mod notification;

pub use announcement::{AnnouncementService, DispatchReport, SweepOutcome};
pub use auth::AuthService;
pub use context::RequestContext;
pub use event::EventService;
pub use notification::NotificationService;
