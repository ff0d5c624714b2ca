//! Typed configuration for Hyprlinkr.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use hyprlinkr_config::ConfigLoader;
//!
//! # fn main() -> Result<(), hyprlinkr_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("hyprlinkr.toml")?
//!     .with_env_prefix("HYPRLINKR")
//!     .load()?;
//!
//! let routes = config.route_table()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [linker]
//! default_route_name = "API Default"
//!
//! [logging]
//! level = "hyprlinkr=debug,info"
//! format = "json"
//!
//! [[routes]]
//! name = "API Default"
//! template = "api/{controller}/{id}"
//! optional = ["id"]
//!
//! [routes.constraints]
//! id = "\\d+"
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `HYPRLINKR__LINKER__DEFAULT_ROUTE_NAME=DefaultApi`
//! - `HYPRLINKR__LOGGING__LEVEL=debug`
//! - `HYPRLINKR__LOGGING__FORMAT=pretty`

#![doc(html_root_url = "https://docs.rs/hyprlinkr-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::HyprlinkrConfig;
pub use error::ConfigError;
pub use hyprlinkr_telemetry::{LogConfig, LogFormat};
pub use loader::ConfigLoader;
pub use schema::{LinkerConfig, RouteConfig, DEFAULT_ROUTE_NAME};
