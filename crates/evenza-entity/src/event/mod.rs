//! Event entity.

pub mod model;

pub use model::{CreateEvent, Event, UpdateEvent};
