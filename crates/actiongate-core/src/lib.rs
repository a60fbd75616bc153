//! `actiongate-core`: maps a record snapshot to the workflow actions its
//! status permits and runs one action as confirm → invoke → reload.
//!
//! ```text
//! Record snapshot ──► ActionGate (rule table per kind) ──► Vec<ActionDescriptor>
//!                                                              │
//!                     Host collaborators ◄── ActionExecutor ◄──┘
//!        (prompter, procedures, reloader, navigator, notifier)
//! ```

pub mod action;
pub mod classifier;
pub mod config;
pub mod error;
pub mod executor;
pub mod host;
pub mod indicator;
pub mod io;
pub mod paths;
pub mod procedures;
pub mod record;
pub mod rules;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use classifier::{compute_available_actions, ActionGate};
pub use error::{GateError, Result};
pub use executor::{ActionExecutor, ActionOutcome};
pub use indicator::{compute_indicator, Indicator};
