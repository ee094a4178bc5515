//! # evenza-worker
//!
//! Background task for the Evenza backend: a single recurring sweep that
//! promotes due scheduled announcements to sent.

pub mod runner;

pub use runner::SweepRunner;
