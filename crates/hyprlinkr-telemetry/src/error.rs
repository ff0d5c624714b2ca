//! Telemetry errors.

use thiserror::Error;

/// Why logging could not be set up.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives do not parse.
    #[error("invalid log filter '{directives}': {reason}")]
    InvalidFilter {
        /// The rejected directives.
        directives: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
