//! Announcement lifecycle management.

pub mod dispatch;
pub mod resolve;
pub mod service;
pub mod view;

pub use dispatch::DispatchReport;
pub use resolve::EventRef;
pub use service::{
    AnnouncementCreated, AnnouncementService, AnnouncementUpdated, CreateAnnouncementInput,
    SendAnnouncementInput, SweepOutcome, UpdateAnnouncementInput,
};
