//! keycoach: input coordination core for an AI reply-suggestion keyboard
//!
//! Key events flow through the [`keyboard`] state machine, text changes feed the
//! [`scheduler`] debouncer, and due triggers reach the [`orchestrator`], which owns the
//! single in-flight suggestion request. [`session::KeyboardSession`] wires these together
//! for one input session.

pub mod analytics;
pub mod config;
pub mod context;
pub mod engine;
pub mod entitlement;
pub mod error;
pub mod keyboard;
pub mod orchestrator;
pub mod scheduler;
pub mod session;
pub mod suggestion;
pub mod tracker;

#[cfg(test)]
pub mod test_utils;

pub use error::CoachError;
pub use session::{KeyboardSession, SessionSettings};
