//! Definition layer: states, transitions, callbacks and history records.
//!
//! Everything here is plain data plus the lookup rule. The execution layer
//! in [`crate::engine`] owns these values and drives them.

mod action;
mod history;
mod state;
mod transition;

pub use action::Action;
pub use history::{StateChange, StateHistory, DEFAULT_HISTORY_LIMIT};
pub use state::State;
pub use transition::{find, MatchPolicy, Transition};

/// Numeric state identifier.
pub type StateId = u32;

/// Numeric event identifier.
pub type EventId = u32;
