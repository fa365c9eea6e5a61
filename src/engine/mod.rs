//! Execution layer: the machine, its deferred event queue and diagnostics.
//!
//! # Dispatch
//!
//! [`Machine::process_event`] always enqueues. The call that finds the
//! machine idle drains the queue; calls made from callbacks during that
//! drain return immediately and their events are handled afterwards, in
//! the order they were raised.
//!
//! For each event the transition is chosen from, in order:
//!
//! 1. the default state's exact match, if a default state is registered
//! 2. the current state's exact match
//! 3. the current state's transition keyed by the default (wildcard) event
//!
//! # Diagnostics
//!
//! With a trace sink configured every decision is written as one
//! `SM(<line>): <text>` line. The same decisions are emitted as `tracing`
//! events with structured `state`/`event` fields.

mod export;
mod machine;
mod trace;

pub use machine::{Machine, MachineRef};
pub use trace::{Translator, MAX_TRACE};
pub(crate) use trace::Tracer;
