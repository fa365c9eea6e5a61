//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::{MachineConfig, ReentrancyMode, UnresolvedTargetPolicy};
use crate::core::{EventId, MatchPolicy, StateId};
use crate::engine::{Machine, Tracer, Translator};
use std::io::Write;
use std::rc::Rc;

/// Builder for constructing machines with a fluent API.
///
/// Setters applied after [`config`](MachineBuilder::config) override the
/// corresponding config fields.
pub struct MachineBuilder {
    sink: Option<Box<dyn Write>>,
    translator: Option<Translator>,
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            sink: None,
            translator: None,
            config: MachineConfig::default(),
        }
    }

    /// Set the id-to-text translation used by traces and graph export
    /// (required).
    pub fn translator<F, S>(mut self, translate: F) -> Self
    where
        F: Fn(u32) -> S + 'static,
        S: Into<String>,
    {
        self.translator = Some(Rc::new(move |id| translate(id).into()));
        self
    }

    /// Send trace lines to `sink` (optional; no sink disables tracing).
    pub fn trace_sink<W: Write + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// State whose transitions are checked first, from any state.
    pub fn default_state(mut self, id: impl Into<StateId>) -> Self {
        self.config.default_state = Some(id.into());
        self
    }

    /// Wildcard event used when the current state has no exact match.
    pub fn default_event(mut self, id: impl Into<EventId>) -> Self {
        self.config.default_event = Some(id.into());
        self
    }

    /// Which duplicate transition wins within one state.
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.config.match_policy = policy;
        self
    }

    /// How nested `process_event` calls treat the drain flag.
    pub fn reentrancy(mut self, mode: ReentrancyMode) -> Self {
        self.config.reentrancy = mode;
        self
    }

    /// What a transition to an unregistered state does.
    pub fn unresolved_target(mut self, policy: UnresolvedTargetPolicy) -> Self {
        self.config.unresolved_target = policy;
        self
    }

    /// Number of state changes kept; zero disables history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Machine, BuildError> {
        let translator = self.translator.ok_or(BuildError::MissingTranslator)?;
        tracing::debug!(
            tracing = self.sink.is_some(),
            default_state = ?self.config.default_state,
            default_event = ?self.config.default_event,
            "building machine"
        );
        Ok(Machine::from_parts(
            self.config,
            Tracer::new(self.sink, translator),
        ))
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
