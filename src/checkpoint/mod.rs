//! Checkpoint and resume of a machine's runtime position.
//!
//! A checkpoint captures where the machine is (current state, pending
//! events, history), not what it is: states, transitions and callbacks are
//! code and must be registered again before restoring.

use crate::core::{EventId, StateHistory, StateId};
use crate::error::{FsmError, Result};
use crate::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub current_state: Option<StateId>,

    /// Events queued but not yet dispatched
    pub pending_events: Vec<EventId>,

    pub history: StateHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> std::result::Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> std::result::Result<(), CheckpointError> {
        if self.version > CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl Machine {
    /// Capture the current state, pending events and history.
    pub fn checkpoint(&self) -> Result<Checkpoint> {
        let inner = self.inner();
        inner.ensure_live()?;

        let current_state = inner.definition.borrow().current().map(|s| s.id());
        Ok(Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            current_state,
            pending_events: inner.queue.borrow().iter().copied().collect(),
            history: inner.history.borrow().clone(),
        })
    }

    /// Resume from `checkpoint`. The current state is set without running
    /// its entry action and the history is replaced. Pending events are
    /// then dispatched before this returns, so the machine is idle with an
    /// empty queue afterwards. A callback error stops that drain as it
    /// would in `process_event`.
    pub fn restore(&self, checkpoint: &Checkpoint) -> Result<()> {
        let inner = self.inner();
        inner.ensure_live()?;
        if inner.processing.get() {
            return Err(FsmError::Busy);
        }
        checkpoint.check_version()?;

        {
            let mut def = inner.definition.borrow_mut();
            if let Some(id) = checkpoint.current_state {
                let idx = def.position(id).ok_or(CheckpointError::UnknownState(id))?;
                def.current = Some(idx);
            }
        }

        *inner.queue.borrow_mut() = checkpoint.pending_events.iter().copied().collect();

        let mut history = StateHistory::with_limit(inner.config.history_limit);
        for change in checkpoint.history.changes() {
            history.record(change.clone());
        }
        *inner.history.borrow_mut() = history;

        tracing::debug!(
            checkpoint = %checkpoint.id,
            state = ?checkpoint.current_state,
            pending = checkpoint.pending_events.len(),
            "restored checkpoint"
        );
        inner.drain_pending()
    }
}
