//! Bounded record of the states a machine has arrived at.

use super::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// One arrival at a state.
///
/// `event` is the event that triggered the change, or `None` when the
/// arrival came from `reset`. `from` is `None` when there was no current
/// state before the arrival.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    pub from: Option<StateId>,
    pub to: StateId,
    pub event: Option<EventId>,
    pub timestamp: DateTime<Utc>,
}

impl StateChange {
    pub fn now(from: Option<StateId>, to: StateId, event: Option<EventId>) -> Self {
        Self {
            from,
            to,
            event,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered state changes, keeping at most `limit` of the most recent ones.
///
/// A limit of zero disables recording.
///
/// # Example
///
/// ```rust
/// use tabled_fsm::core::{StateChange, StateHistory};
///
/// let mut history = StateHistory::with_limit(2);
/// history.record(StateChange::now(Some(1), 2, Some(10)));
/// history.record(StateChange::now(Some(2), 3, Some(11)));
/// history.record(StateChange::now(Some(3), 1, None));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec![2, 3, 1]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    limit: usize,
    changes: VecDeque<StateChange>,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

/// Changes kept by a default history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

impl StateHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            changes: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a change, evicting the oldest once the limit is reached.
    pub fn record(&mut self, change: StateChange) {
        if self.limit == 0 {
            return;
        }
        while self.changes.len() >= self.limit {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// States traversed: the origin of the oldest kept change (when known),
    /// then the target of every change.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(origin) = self.changes.front().and_then(|c| c.from) {
            path.push(origin);
        }
        path.extend(self.changes.iter().map(|c| c.to));
        path
    }

    /// Time between the oldest and newest kept change.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn changes(&self) -> impl Iterator<Item = &StateChange> {
        self.changes.iter()
    }

    pub fn last(&self) -> Option<&StateChange> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
