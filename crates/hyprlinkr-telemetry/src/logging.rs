//! Subscriber installation.
//!
//! The library crates only emit events; a service calls [`init_logging`] once
//! at startup to see them.
//!
//! ```rust,ignore
//! use hyprlinkr_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::debug!(route_name = "API Default", uri = "http://localhost/api/foo", "built link");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// The `[logging]` section.
///
/// Every field has a default, so a partial section is enough:
///
/// ```
/// use hyprlinkr_telemetry::{LogConfig, LogFormat};
///
/// let config: LogConfig = serde_json::from_str(r#"{ "format": "pretty" }"#).unwrap();
/// assert_eq!(config.format, LogFormat::Pretty);
/// assert_eq!(config.level, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// When false, [`init_logging`] installs nothing.
    pub enabled: bool,

    /// `EnvFilter` directives, e.g. `"hyprlinkr=debug,warn"`.
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Emit span open/close events.
    pub span_events: bool,

    /// Include source file and line.
    pub file_line_info: bool,

    /// Include the event target.
    pub include_target: bool,

    /// Colour pretty output. JSON output is never coloured.
    pub ansi_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Pretty output with link-building detail from the hyprlinkr crates.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "hyprlinkr=debug,info".to_string(),
            format: LogFormat::Pretty,
            span_events: true,
            file_line_info: true,
            include_target: true,
            ansi_enabled: true,
        }
    }

    /// JSON output at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            span_events: false,
            file_line_info: false,
            include_target: true,
            ansi_enabled: false,
        }
    }

    /// Checks that [`level`](Self::level) parses.
    pub fn validate(&self) -> TelemetryResult<()> {
        create_env_filter(&self.level).map(drop)
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn layer(&self) -> TelemetryResult<BoxedLayer> {
        let filter = create_env_filter(&self.level)?;
        let base = tracing_subscriber::fmt::layer()
            .with_span_events(self.span_events())
            .with_file(self.file_line_info)
            .with_line_number(self.file_line_info)
            .with_target(self.include_target);

        Ok(match self.format {
            LogFormat::Json => base.json().with_ansi(false).with_filter(filter).boxed(),
            LogFormat::Pretty => base
                .pretty()
                .with_ansi(self.ansi_enabled)
                .with_filter(filter)
                .boxed(),
        })
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// [`TelemetryError::InvalidFilter`] for unparsable directives and
/// [`TelemetryError::AlreadyInitialized`] when called twice.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(config.layer()?)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

/// Parses filter directives.
///
/// # Errors
///
/// [`TelemetryError::InvalidFilter`] if `directives` do not parse.
pub fn create_env_filter(directives: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| TelemetryError::InvalidFilter {
        directives: directives.to_string(),
        reason: e.to_string(),
    })
}
