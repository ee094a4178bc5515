//! Concrete repository implementations, one per entity.

pub mod announcement;
pub mod event;
pub mod notification;
pub mod registration;
pub mod user;

pub use announcement::{AnnouncementLookup, AnnouncementRepository};
pub use event::EventRepository;
pub use notification::NotificationRepository;
pub use registration::RegistrationRepository;
pub use user::UserRepository;
