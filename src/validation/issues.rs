//! Problems a machine definition can have.

use crate::core::{EventId, StateId};
use thiserror::Error;

/// A definition problem found by [`Machine::validate`](crate::Machine::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionIssue {
    #[error("No states registered")]
    NoStates,

    #[error("Default state {id} is configured but never registered")]
    MissingDefaultState { id: StateId },

    #[error("State {state} sends event {event} to unregistered state {target}")]
    UnresolvedTarget {
        state: StateId,
        event: EventId,
        target: StateId,
    },

    /// Only one of the duplicates can ever fire, chosen by the match policy.
    #[error("State {state} has more than one transition for event {event}")]
    DuplicateTrigger { state: StateId, event: EventId },
}
