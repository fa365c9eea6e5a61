//! Builder API for machine construction.
//!
//! [`MachineBuilder`] collects the trace sink, the translator and the
//! configuration, then produces an empty [`Machine`](crate::Machine) ready
//! for state registration. The [`fsm_ids!`](crate::fsm_ids) macro declares
//! id tables whose `translate` function plugs straight into the builder.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
