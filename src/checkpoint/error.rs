//! Failures while encoding, decoding or applying a checkpoint.

use crate::core::StateId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckpointError {
    /// serde_json or bincode rejected the checkpoint
    #[error("failed to encode checkpoint: {0}")]
    Encode(String),

    /// Input is not a checkpoint in either encoding
    #[error("failed to decode checkpoint: {0}")]
    Decode(String),

    /// Written by a newer checkpoint format than this build reads
    #[error("checkpoint format {found} is newer than supported format {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The saved current state was not registered before `restore`
    #[error("checkpoint resumes in state {0}, which this machine never registered")]
    UnknownState(StateId),
}
