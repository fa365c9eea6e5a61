//! Errors raised while assembling a machine.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Translator not specified. Call .translator(fn) before .build()")]
    MissingTranslator,
}
