//! Whole-definition checks that accumulate every problem found.
//!
//! Registration only rejects duplicate state ids; everything else a
//! definition can get wrong (targets that were never registered, duplicate
//! triggers, a default state that never appeared) is reported here in a
//! single pass using Stillwater's `Validation`.
//!
//! # Example
//!
//! ```rust
//! use tabled_fsm::{DefinitionIssue, Machine};
//!
//! let machine = Machine::builder().translator(|id: u32| id.to_string()).build().unwrap();
//! machine.add_state(1u32).unwrap();
//! machine.add_transition(10u32, 2u32).unwrap();
//! machine.add_transition(10u32, 1u32).unwrap();
//!
//! let issues = machine.definition_issues();
//! assert_eq!(issues.len(), 2);
//! assert!(issues.contains(&DefinitionIssue::DuplicateTrigger { state: 1, event: 10 }));
//! ```

mod issues;

pub use issues::DefinitionIssue;

use crate::Machine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl Machine {
    /// Check the definition, accumulating ALL issues.
    /// Returns Validation::Success(()) if the definition is sound.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionIssue>> {
        let inner = self.inner();
        let def = inner.definition.borrow();
        let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionIssue>>> = Vec::new();

        if def.states.is_empty() {
            checks.push(Validation::fail(DefinitionIssue::NoStates));
        }

        if let Some(id) = inner.config.default_state {
            if def.position(id).is_none() {
                checks.push(Validation::fail(DefinitionIssue::MissingDefaultState { id }));
            }
        }

        for state in &def.states {
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();
            for transition in state.transitions() {
                if def.position(transition.next()).is_none() {
                    checks.push(Validation::fail(DefinitionIssue::UnresolvedTarget {
                        state: state.id(),
                        event: transition.event(),
                        target: transition.next(),
                    }));
                }
                if !seen.insert(transition.event()) && reported.insert(transition.event()) {
                    checks.push(Validation::fail(DefinitionIssue::DuplicateTrigger {
                        state: state.id(),
                        event: transition.event(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Machine::validate) flattened to a list; empty when the
    /// definition is sound.
    pub fn definition_issues(&self) -> Vec<DefinitionIssue> {
        match self.validate() {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(issues) => issues.iter().cloned().collect(),
        }
    }
}
