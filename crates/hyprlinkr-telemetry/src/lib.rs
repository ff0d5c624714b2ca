//! Logging setup for Hyprlinkr services.
//!
//! Hyprlinkr's library crates emit `tracing` events with structured fields
//! (`route_name`, `controller`, `action`, `uri`, `error`). This crate turns
//! them into output:
//!
//! - **JSON** for production, one object per event
//! - **Pretty** for development, with span events and source locations
//!
//! # Example
//!
//! ```rust,ignore
//! use hyprlinkr_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LogConfig::production())?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/hyprlinkr-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
