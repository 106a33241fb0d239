//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store round-trips into use-case level mutation APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod tracker;

pub use tracker::{Tracker, TrackerError, TrackerResult};
