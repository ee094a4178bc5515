//! Per-user notification listing and read tracking.

pub mod service;

pub use service::NotificationService;
