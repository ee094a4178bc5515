//! Event registration entity.

pub mod model;

pub use model::{Registration, RegistrationStatus};
