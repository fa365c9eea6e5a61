//! Transitions and the lookup rule shared by every transition scan.

use super::action::Action;
use super::{EventId, StateId};
use serde::{Deserialize, Serialize};

/// Which transition wins when several in one list share an event id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// The most recently registered match wins (scan never stops early).
    #[default]
    LastMatch,

    /// The earliest registered match wins.
    FirstMatch,
}

impl MatchPolicy {
    /// Position of the selected element among `items` satisfying `pred`.
    pub fn select<T, F>(self, items: &[T], pred: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        match self {
            MatchPolicy::LastMatch => items.iter().rposition(pred),
            MatchPolicy::FirstMatch => items.iter().position(pred),
        }
    }
}

/// An edge out of its owning state, keyed by the trigger event.
///
/// The owner is implicit: a transition only exists inside its state's list.
#[derive(Debug, Clone)]
pub struct Transition {
    pub(crate) event: EventId,
    pub(crate) action: Option<Action>,
    pub(crate) next: StateId,
}

impl Transition {
    pub fn new(event: EventId, action: Option<Action>, next: StateId) -> Self {
        Self {
            event,
            action,
            next,
        }
    }

    pub fn event(&self) -> EventId {
        self.event
    }

    /// Target state id; equal to the owner's id for a self-transition.
    pub fn next(&self) -> StateId {
        self.next
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

/// Find the transition triggered by `event` under `policy`.
pub fn find(transitions: &[Transition], event: EventId, policy: MatchPolicy) -> Option<&Transition> {
    policy
        .select(transitions, |t| t.event == event)
        .map(|idx| &transitions[idx])
}
