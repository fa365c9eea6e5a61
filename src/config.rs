//! Machine configuration
//!
//! A [`MachineConfig`] can be built in code, through the builder setters,
//! or loaded from TOML. Every field has a default, so a partial file is
//! valid:
//!
//! ```toml
//! default_state = 100
//! default_event = 999
//! match_policy = "first_match"
//! reentrancy = "legacy"
//! unresolved_target = "error"
//! history_limit = 16
//! ```

use crate::core::{EventId, MatchPolicy, StateId, DEFAULT_HISTORY_LIMIT};
use crate::error::{FsmError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the reentrancy flag is cleared when `process_event` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyMode {
    /// Only the call that started the drain clears the flag.
    #[default]
    Strict,

    /// Every call clears the flag on return, nested ones included. A nested
    /// call made after another nested call has returned drains the queue
    /// itself instead of deferring to the outer loop.
    Legacy,
}

/// What happens when a transition targets a state that was never
/// registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedTargetPolicy {
    /// Trace it, keep the current state and continue draining.
    #[default]
    Ignore,

    /// Stop the drain and return [`FsmError::UnresolvedTarget`].
    Error,
}

/// Machine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// State whose transitions are consulted before the current state's.
    pub default_state: Option<StateId>,

    /// Wildcard event matched when the current state has no exact match.
    pub default_event: Option<EventId>,

    pub match_policy: MatchPolicy,

    pub reentrancy: ReentrancyMode,

    pub unresolved_target: UnresolvedTargetPolicy,

    /// State changes kept in the history; zero disables it.
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            default_state: None,
            default_event: None,
            match_policy: MatchPolicy::default(),
            reentrancy: ReentrancyMode::default(),
            unresolved_target: UnresolvedTargetPolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            FsmError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config = toml::from_str(&contents).map_err(|e| {
            FsmError::config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Loaded machine config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MachineConfig::default();
        assert_eq!(config.default_state, None);
        assert_eq!(config.default_event, None);
        assert_eq!(config.match_policy, MatchPolicy::LastMatch);
        assert_eq!(config.reentrancy, ReentrancyMode::Strict);
        assert_eq!(config.unresolved_target, UnresolvedTargetPolicy::Ignore);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
default_state = 100
default_event = 999
match_policy = "first_match"
reentrancy = "legacy"
unresolved_target = "error"
history_limit = 16
        "#;

        let config = MachineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.default_state, Some(100));
        assert_eq!(config.default_event, Some(999));
        assert_eq!(config.match_policy, MatchPolicy::FirstMatch);
        assert_eq!(config.reentrancy, ReentrancyMode::Legacy);
        assert_eq!(config.unresolved_target, UnresolvedTargetPolicy::Error);
        assert_eq!(config.history_limit, 16);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MachineConfig::from_toml_str("default_event = 7").unwrap();
        assert_eq!(config.default_event, Some(7));
        assert_eq!(config.reentrancy, ReentrancyMode::Strict);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MachineConfig::from_toml_str("reentrancy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, FsmError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = MachineConfig::from_file("/nonexistent/tabled-fsm.toml").unwrap_err();
        assert!(matches!(err, FsmError::Config(_)));
    }
}
