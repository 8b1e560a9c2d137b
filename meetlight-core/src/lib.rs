//! Core types for meetlight.
//!
//! This crate holds the meeting-status policy and everything around it
//! that does not depend on a particular calendar provider or LED driver:
//! - `event` / `filter` for calendar events and their relevance
//! - `evaluator` for the office-hours policy and the `EventSource` seam
//! - `poll` for the fixed-interval loop
//! - `display` for the `DisplaySink` seam and status colours

pub mod config;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod filter;
pub mod policy;
pub mod poll;
pub mod status;

pub use error::{CoreError, CoreResult};
pub use evaluator::{EventSource, classify, evaluate};
pub use event::*;
pub use status::{Colour, Status};
