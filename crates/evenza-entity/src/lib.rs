//! # evenza-entity
//!
//! Domain entity models for the Evenza backend. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod announcement;
pub mod event;
pub mod notification;
pub mod registration;
pub mod user;
