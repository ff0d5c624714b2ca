//! Configuration schema types.

use hyprlinkr_router::{Route, RouteDefault, RouteTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Route name used when a link's controller and action name no route.
pub const DEFAULT_ROUTE_NAME: &str = "API Default";

/// Link generation settings.
///
/// # Example
///
/// ```
/// use hyprlinkr_config::LinkerConfig;
///
/// let config = LinkerConfig::default();
/// assert_eq!(config.default_route_name, "API Default");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LinkerConfig {
    /// Name of the route used when no route attribute names one.
    #[serde(default = "default_route_name")]
    pub default_route_name: String,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            default_route_name: default_route_name(),
        }
    }
}

fn default_route_name() -> String {
    DEFAULT_ROUTE_NAME.to_string()
}

/// One entry of the route table.
///
/// ```toml
/// [[routes]]
/// name = "API Default"
/// template = "api/{controller}/{id}"
/// optional = ["id"]
///
/// [routes.constraints]
/// id = "\\d+"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Route name.
    pub name: String,

    /// Route template, e.g. `api/{controller}/{id}`.
    pub template: String,

    /// Default values by parameter name.
    #[serde(default)]
    pub defaults: IndexMap<String, String>,

    /// Parameters that may be omitted.
    #[serde(default)]
    pub optional: Vec<String>,

    /// Regular expression constraints by parameter name.
    #[serde(default)]
    pub constraints: IndexMap<String, String>,
}

impl RouteConfig {
    /// Creates a route entry without defaults or constraints.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            defaults: IndexMap::new(),
            optional: Vec::new(),
            constraints: IndexMap::new(),
        }
    }

    /// Builds the route.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Route` if the template or a constraint is
    /// invalid.
    pub fn to_route(&self) -> Result<Route, ConfigError> {
        let defaults = self
            .defaults
            .iter()
            .map(|(name, value)| (name.clone(), RouteDefault::value(value.clone())))
            .chain(
                self.optional
                    .iter()
                    .map(|name| (name.clone(), RouteDefault::Optional)),
            );

        let mut builder = Route::builder(self.name.clone(), self.template.clone());
        for (name, default) in defaults {
            builder = builder.default(name, default);
        }
        for (name, pattern) in &self.constraints {
            builder = builder.constraint(name.clone(), pattern.clone());
        }
        Ok(builder.build()?)
    }

    /// Builds a route table from `routes`, in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Route` for an invalid route or a duplicate name.
    pub fn into_route_table<I>(routes: I) -> Result<RouteTable, ConfigError>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut table = RouteTable::new();
        for route in routes {
            table.insert(route.to_route()?)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linker_default() {
        assert_eq!(LinkerConfig::default().default_route_name, DEFAULT_ROUTE_NAME);
    }

    #[test]
    fn test_to_route() {
        let mut config = RouteConfig::new("API Default", "api/{controller}/{id}");
        config.optional.push("id".to_string());
        config.constraints.insert("id".to_string(), r"\d+".to_string());

        let route = config.to_route().unwrap();
        assert_eq!(route.name(), "API Default");
        assert_eq!(route.default_for("id"), Some(&RouteDefault::Optional));
        assert!(route.match_path("/api/foo/1").is_some());
        assert!(route.match_path("/api/foo/x").is_none());
    }

    #[test]
    fn test_to_route_with_value_default() {
        let mut config = RouteConfig::new("Home", "");
        config
            .defaults
            .insert("controller".to_string(), "home".to_string());

        let values = config.to_route().unwrap().match_path("/").unwrap();
        assert_eq!(values.get("controller"), Some("home"));
    }

    #[test]
    fn test_into_route_table_rejects_duplicates() {
        let routes = vec![
            RouteConfig::new("API Default", "api/{controller}"),
            RouteConfig::new("API Default", "v2/{controller}"),
        ];
        assert!(matches!(
            RouteConfig::into_route_table(routes),
            Err(ConfigError::Route(_))
        ));
    }

    #[test]
    fn test_into_route_table_rejects_bad_template() {
        let routes = vec![RouteConfig::new("Broken", "api/{controller")];
        assert!(RouteConfig::into_route_table(routes).is_err());
    }
}
