//! Property-based tests for dispatch and export.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machine definitions.

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tabled_fsm::{Action, EventId, Machine, MatchPolicy, StateId};

const EVENTS: u32 = 6;

fn machine() -> Machine {
    Machine::builder()
        .translator(|id: u32| format!("N{}", id))
        .build()
        .unwrap()
}

prop_compose! {
    /// For each event, the events its action raises. Only later events are
    /// raised so every cascade terminates.
    fn arbitrary_cascade()(
        raw in prop::collection::vec(prop::collection::vec(0..EVENTS, 0..3), EVENTS as usize)
    ) -> Vec<Vec<EventId>> {
        raw.into_iter()
            .enumerate()
            .map(|(event, raised)| {
                raised.into_iter().filter(|r| *r > event as u32).collect()
            })
            .collect()
    }
}

prop_compose! {
    /// Per-state transition lists over states `1..=count`, as (event, target).
    fn arbitrary_table()(count in 1..6u32)(
        table in prop::collection::vec(
            prop::collection::vec((0..20u32, 1..=count), 0..4),
            count as usize
        )
    ) -> Vec<Vec<(EventId, StateId)>> {
        table
    }
}

proptest! {
    #[test]
    fn nested_events_are_processed_fifo(cascade in arbitrary_cascade(), root in 0..EVENTS) {
        let m = machine();
        let handle = m.downgrade();
        let order = Rc::new(RefCell::new(Vec::new()));

        m.add_state(1u32).unwrap();
        for event in 0..EVENTS {
            let raised = cascade[event as usize].clone();
            let handle = handle.clone();
            let order = Rc::clone(&order);
            m.add_transition_with_action(
                event,
                Action::new(move || {
                    order.borrow_mut().push(event);
                    for r in &raised {
                        handle.process_event(*r)?;
                    }
                    Ok(())
                }),
                1u32,
            )
            .unwrap();
        }

        m.process_event(root).unwrap();

        let mut expected = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(event) = queue.pop_front() {
            expected.push(event);
            queue.extend(cascade[event as usize].iter().copied());
        }

        prop_assert_eq!(order.borrow().clone(), expected);
        prop_assert!(!m.is_processing());
        prop_assert!(m.pending_events().is_empty());
    }

    #[test]
    fn dot_has_one_edge_per_transition(table in arbitrary_table()) {
        let m = machine();
        for (idx, transitions) in table.iter().enumerate() {
            m.add_state(idx as u32 + 1).unwrap();
            for (event, target) in transitions {
                m.add_transition(*event, *target).unwrap();
            }
        }

        let dot = m.to_dot().unwrap();
        let edges = dot.lines().filter(|l| l.contains(" -> ")).count();
        let expected: usize = table.iter().map(Vec::len).sum();

        prop_assert_eq!(edges, expected);
    }

    #[test]
    fn exact_match_beats_wildcard(event in 0..50u32, wildcard_first in any::<bool>()) {
        let m = Machine::builder()
            .translator(|id: u32| id.to_string())
            .default_event(99u32)
            .build()
            .unwrap();
        m.add_state(2u32).unwrap();
        m.add_state(3u32).unwrap();
        m.add_state(1u32).unwrap();
        if wildcard_first {
            m.add_transition(99u32, 3u32).unwrap();
            m.add_transition(event, 2u32).unwrap();
        } else {
            m.add_transition(event, 2u32).unwrap();
            m.add_transition(99u32, 3u32).unwrap();
        }
        m.reset(1u32).unwrap();

        m.process_event(event).unwrap();

        prop_assert_eq!(m.current_state().unwrap(), 2);
    }

    #[test]
    fn unmatched_event_keeps_state(table in arbitrary_table(), event in 100..200u32) {
        let m = machine();
        for (idx, transitions) in table.iter().enumerate() {
            m.add_state(idx as u32 + 1).unwrap();
            for (e, target) in transitions {
                m.add_transition(*e, *target).unwrap();
            }
        }
        let before = m.current_state().unwrap();

        prop_assert!(m.process_event(event).is_ok());
        prop_assert_eq!(m.current_state().unwrap(), before);
    }

    #[test]
    fn match_policy_picks_duplicate_end(
        targets in prop::collection::vec(2..7u32, 1..5),
        first in any::<bool>()
    ) {
        let policy = if first { MatchPolicy::FirstMatch } else { MatchPolicy::LastMatch };
        let m = Machine::builder()
            .translator(|id: u32| id.to_string())
            .match_policy(policy)
            .build()
            .unwrap();
        for id in 2..7u32 {
            m.add_state(id).unwrap();
        }
        m.add_state(1u32).unwrap();
        for target in &targets {
            m.add_transition(10u32, *target).unwrap();
        }
        m.reset(1u32).unwrap();

        m.process_event(10u32).unwrap();

        let expected = if first { targets[0] } else { targets[targets.len() - 1] };
        prop_assert_eq!(m.current_state().unwrap(), expected);
    }

    #[test]
    fn history_never_exceeds_limit(limit in 0..8usize, steps in 0..20usize) {
        let m = Machine::builder()
            .translator(|id: u32| id.to_string())
            .history_limit(limit)
            .build()
            .unwrap();
        m.add_state(1u32).unwrap();
        m.add_transition(10u32, 2u32).unwrap();
        m.add_state(2u32).unwrap();
        m.add_transition(10u32, 1u32).unwrap();
        m.reset(1u32).unwrap();

        for _ in 0..steps {
            m.process_event(10u32).unwrap();
        }

        prop_assert_eq!(m.history().len(), (steps + 1).min(limit));
        prop_assert_eq!(m.current_state().unwrap(), if steps % 2 == 0 { 1 } else { 2 });
    }
}
