//! Error types shared by the machine, its callbacks and its diagnostics.

use crate::checkpoint::CheckpointError;
use crate::core::StateId;
use std::io;
use thiserror::Error;

/// Boxed error a client callback may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by machine operations.
#[derive(Debug, Error)]
pub enum FsmError {
    /// The machine was destroyed, or a `MachineRef` outlived it.
    #[error("machine handle is no longer valid")]
    InvalidHandle,

    /// A state query or transition registration before any state exists.
    #[error("no current state: register a state first")]
    NoCurrentState,

    #[error("state {id} is already registered")]
    DuplicateState { id: StateId },

    /// Only raised under `UnresolvedTargetPolicy::Error`.
    #[error("transition from state {from} targets unregistered state {to}")]
    UnresolvedTarget { from: StateId, to: StateId },

    /// An entry or action callback failed.
    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),

    #[error("machine is draining its event queue")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

/// Result type alias using [`FsmError`].
pub type Result<T> = std::result::Result<T, FsmError>;

impl FsmError {
    /// Wrap a client failure raised from a callback.
    pub fn callback(err: impl Into<BoxError>) -> Self {
        Self::Callback(err.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures the client raised from a callback.
    pub fn is_callback(&self) -> bool {
        matches!(self, FsmError::Callback(_))
    }
}

impl From<toml::de::Error> for FsmError {
    fn from(err: toml::de::Error) -> Self {
        FsmError::Config(err.to_string())
    }
}
