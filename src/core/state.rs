//! States and their owned transition lists.

use super::action::Action;
use super::transition::{self, MatchPolicy, Transition};
use super::{EventId, StateId};

/// A node of the machine: an id, an optional entry action and the
/// transitions leaving it, in registration order.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) id: StateId,
    pub(crate) entry: Option<Action>,
    pub(crate) transitions: Vec<Transition>,
}

impl State {
    pub fn new(id: StateId, entry: Option<Action>) -> Self {
        Self {
            id,
            entry,
            transitions: Vec::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn entry(&self) -> Option<&Action> {
        self.entry.as_ref()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub(crate) fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Exact match for `event`.
    pub fn find(&self, event: EventId, policy: MatchPolicy) -> Option<&Transition> {
        transition::find(&self.transitions, event, policy)
    }

    /// Exact match for `event`, falling back to the transition keyed by the
    /// wildcard event when there is one.
    pub fn find_or_wildcard(
        &self,
        event: EventId,
        wildcard: Option<EventId>,
        policy: MatchPolicy,
    ) -> Option<&Transition> {
        self.find(event, policy)
            .or_else(|| wildcard.and_then(|w| self.find(w, policy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 1;
    const MOVE: EventId = 10;
    const STOP: EventId = 11;
    const ANY: EventId = 99;

    fn idle() -> State {
        let mut state = State::new(IDLE, None);
        state.push(Transition::new(ANY, None, 3));
        state.push(Transition::new(MOVE, None, 2));
        state
    }

    #[test]
    fn new_state_has_no_transitions() {
        let state = State::new(IDLE, None);
        assert_eq!(state.id(), IDLE);
        assert!(state.entry().is_none());
        assert!(state.transitions().is_empty());
    }

    #[test]
    fn exact_match_beats_wildcard_regardless_of_order() {
        let state = idle();
        let found = state
            .find_or_wildcard(MOVE, Some(ANY), MatchPolicy::LastMatch)
            .unwrap();
        assert_eq!(found.next(), 2);
    }

    #[test]
    fn wildcard_catches_unknown_events() {
        let state = idle();
        let found = state
            .find_or_wildcard(STOP, Some(ANY), MatchPolicy::LastMatch)
            .unwrap();
        assert_eq!(found.next(), 3);
    }

    #[test]
    fn no_wildcard_means_no_fallback() {
        let state = idle();
        assert!(state
            .find_or_wildcard(STOP, None, MatchPolicy::LastMatch)
            .is_none());
    }

    #[test]
    fn transitions_keep_registration_order() {
        let state = idle();
        let events: Vec<EventId> = state.transitions().iter().map(|t| t.event()).collect();
        assert_eq!(events, vec![ANY, MOVE]);
    }
}
