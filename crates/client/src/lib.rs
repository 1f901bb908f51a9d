//! Arena client library.
//!
//! Composition root pieces for the `arena` binary: command-line
//! configuration, logging setup and the autopilot that plays a run to
//! completion with the same policy the enemy uses.

pub mod autopilot;
pub mod config;
pub mod logging;

pub use autopilot::{Autopilot, RunSummary};
pub use config::ArenaConfig;
