//! Configuration errors.

use std::path::PathBuf;

use hyprlinkr_router::RouteError;
use hyprlinkr_telemetry::TelemetryError;
use thiserror::Error;

/// Why a configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("no configuration file at {path}")]
    Missing {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read configuration file {path}")]
    Unreadable {
        /// The file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file or string is not one of the supported formats.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Malformed TOML, or TOML with unknown fields.
    #[error("malformed TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or JSON with unknown fields.
    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but cannot be loaded.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// An override variable has a value of the wrong shape.
    #[error("environment variable {var}: {reason}")]
    Environment {
        /// Variable name.
        var: String,
        /// What was expected.
        reason: String,
    },

    /// A setting parsed but is not acceptable.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted path of the setting, e.g. `linker.default_route_name`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `[[routes]]` entry does not build a route.
    #[error("route table: {0}")]
    Route(#[from] RouteError),

    /// The `[logging]` section is invalid.
    #[error("logging: {0}")]
    Logging(#[from] TelemetryError),
}

impl ConfigError {
    pub(crate) fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn environment(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Environment {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`InvalidValue`](Self::InvalidValue) error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
