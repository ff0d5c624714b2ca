//! Main configuration types.

use std::collections::HashSet;

use hyprlinkr_router::RouteTable;
use hyprlinkr_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LinkerConfig, RouteConfig};

/// Complete Hyprlinkr configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from
/// files and environment variables.
///
/// # Example
///
/// ```
/// use hyprlinkr_config::HyprlinkrConfig;
///
/// let config = HyprlinkrConfig::default();
/// assert_eq!(config.linker.default_route_name, "API Default");
/// assert!(config.routes.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HyprlinkrConfig {
    /// Link generation settings.
    #[serde(default)]
    pub linker: LinkerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LogConfig,

    /// Route table, in matching order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl HyprlinkrConfig {
    /// Development preset: pretty debug logging.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LogConfig::development(),
            ..Self::default()
        }
    }

    /// Production preset: JSON logging.
    #[must_use]
    pub fn production() -> Self {
        Self {
            logging: LogConfig::production(),
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the default route name is blank
    /// - the log filter directives do not parse
    /// - two routes share a name
    /// - a route template or constraint is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.linker.default_route_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "linker.default_route_name",
                "must not be empty",
            ));
        }

        self.logging.validate()?;

        let mut names = HashSet::with_capacity(self.routes.len());
        for route in &self.routes {
            if !names.insert(route.name.as_str()) {
                return Err(ConfigError::invalid_value(
                    "routes",
                    format!("route name '{}' is used more than once", route.name),
                ));
            }
            route.to_route()?;
        }

        Ok(())
    }

    /// Builds the route table from the `routes` section.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid route or a duplicate name.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        RouteConfig::into_route_table(self.routes.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprlinkr_telemetry::LogFormat;

    #[test]
    fn test_default_is_valid() {
        assert!(HyprlinkrConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(HyprlinkrConfig::development().logging.format, LogFormat::Pretty);
        assert_eq!(HyprlinkrConfig::production().logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_blank_route_name() {
        let mut config = HyprlinkrConfig::default();
        config.linker.default_route_name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_routes() {
        let config = HyprlinkrConfig {
            routes: vec![
                RouteConfig::new("API Default", "api/{controller}"),
                RouteConfig::new("API Default", "api/{controller}/{id}"),
            ],
            ..HyprlinkrConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API Default"));
    }

    #[test]
    fn test_validate_bad_template() {
        let config = HyprlinkrConfig {
            routes: vec![RouteConfig::new("Broken", "api/{}")],
            ..HyprlinkrConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Route(_))));
    }

    #[test]
    fn test_route_table() {
        let config = HyprlinkrConfig {
            routes: vec![
                RouteConfig::new("Home", "home"),
                RouteConfig::new("API Default", "api/{controller}"),
            ],
            ..HyprlinkrConfig::default()
        };
        let table = config.route_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.route_data("/api/foo").unwrap().route_name, "API Default");
    }
}
