//! Tabled FSM: a table-driven finite state machine with a deferred event queue
//!
//! A machine is a list of states, each owning a list of event-triggered
//! transitions. Events are queued and dispatched one at a time, so callbacks
//! may raise further events without recursing into the engine.
//!
//! # Core Concepts
//!
//! - **State**: numeric id, optional entry action, ordered transitions
//! - **Transition**: event id, optional action, target state id
//! - **Default state**: a state whose transitions are consulted first, from anywhere
//! - **Default event**: a wildcard matched when the current state has no exact match
//!
//! # Example
//!
//! ```rust
//! use tabled_fsm::Machine;
//!
//! const A: u32 = 1;
//! const B: u32 = 2;
//! const GO: u32 = 10;
//! const BACK: u32 = 11;
//!
//! let machine = Machine::builder()
//!     .translator(|id: u32| format!("ID{}", id))
//!     .build()
//!     .unwrap();
//!
//! machine.add_state(A).unwrap();
//! machine.add_transition(GO, B).unwrap();
//! machine.add_state(B).unwrap();
//! machine.add_transition(BACK, A).unwrap();
//!
//! machine.reset(A).unwrap();
//! machine.process_event(GO).unwrap();
//! assert_eq!(machine.current_state().unwrap(), B);
//!
//! machine.process_event(BACK).unwrap();
//! assert_eq!(machine.current_state().unwrap(), A);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{MachineConfig, ReentrancyMode, UnresolvedTargetPolicy};
pub use core::{Action, EventId, MatchPolicy, StateHistory, StateId};
pub use engine::{Machine, MachineRef};
pub use error::{BoxError, FsmError, Result};
pub use validation::DefinitionIssue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with tracing.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "tabled-fsm");
    }
}
