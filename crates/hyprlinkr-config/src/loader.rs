//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use hyprlinkr_telemetry::LogFormat;

use crate::{ConfigError, HyprlinkrConfig};

/// Source formats understood by [`ConfigLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<HyprlinkrConfig, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Builds a [`HyprlinkrConfig`] from layers.
///
/// Each layer replaces what came before it:
/// 1. a preset (`with_defaults`, `with_development`, `with_production`)
/// 2. a TOML or JSON document (`with_file`, `with_string`)
/// 3. `PREFIX__SECTION__KEY` environment variables, applied by `load`
///
/// # Example
///
/// ```no_run
/// use hyprlinkr_config::ConfigLoader;
///
/// # fn main() -> Result<(), hyprlinkr_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("hyprlinkr.toml")?
///     .with_env_prefix("HYPRLINKR")
///     .load()?;
/// let routes = config.route_table()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: HyprlinkrConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to [`HyprlinkrConfig::default`].
    #[must_use]
    pub fn with_defaults(self) -> Self {
        self.with_config(HyprlinkrConfig::default())
    }

    /// Resets to [`HyprlinkrConfig::development`].
    ///
    /// ```
    /// use hyprlinkr_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(self) -> Self {
        self.with_config(HyprlinkrConfig::development())
    }

    /// Resets to [`HyprlinkrConfig::production`].
    #[must_use]
    pub fn with_production(self) -> Self {
        self.with_config(HyprlinkrConfig::production())
    }

    /// Replaces the current layer with `config`.
    #[must_use]
    pub fn with_config(mut self, config: HyprlinkrConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, has another extension,
    /// or does not deserialize (unknown fields included).
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::missing(path));
        }

        let format = path
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(Format::from_name)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, e))?;

        Ok(self.with_config(format.parse(&content)?))
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists and cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses `content` as `format` (`"toml"` or `"json"`).
    ///
    /// # Errors
    ///
    /// Fails for another format name or a document that does not
    /// deserialize.
    ///
    /// # Example
    ///
    /// ```
    /// use hyprlinkr_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [linker]
    ///     default_route_name = "DefaultApi"
    ///
    ///     [[routes]]
    ///     name = "DefaultApi"
    ///     template = "api/{controller}/{id}"
    ///     optional = ["id"]
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.linker.default_route_name, "DefaultApi");
    /// assert_eq!(config.routes.len(), 1);
    /// ```
    pub fn with_string(self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let format =
            Format::from_name(format).ok_or_else(|| ConfigError::UnsupportedFormat(format.to_string()))?;
        Ok(self.with_config(format.parse(content)?))
    }

    /// Reads overrides from variables named `PREFIX__SECTION__KEY` when
    /// [`load`](Self::load) runs.
    ///
    /// Recognised keys: `LINKER__DEFAULT_ROUTE_NAME` and `LOGGING__ENABLED`,
    /// `LEVEL`, `FORMAT`, `SPAN_EVENTS`, `FILE_LINE_INFO`, `INCLUDE_TARGET`,
    /// `ANSI_ENABLED`. Routes can only come from a document.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads a `.env` file from the working directory into the process
    /// environment, if there is one.
    ///
    /// # Errors
    ///
    /// Fails if a `.env` file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => Err(e.into()),
            _ => Ok(self),
        }
    }

    /// Applies environment overrides and validates the result.
    ///
    /// # Errors
    ///
    /// Fails on a malformed override or when
    /// [`HyprlinkrConfig::validate`] rejects the configuration.
    pub fn load(mut self) -> Result<HyprlinkrConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            for (key, value) in env::vars().filter(|(key, _)| key.starts_with(&prefix)) {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the current layer as is.
    #[must_use]
    pub fn load_unvalidated(self) -> HyprlinkrConfig {
        self.config
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let path = key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix("__"))
            .ok_or_else(|| ConfigError::environment(key, "expected PREFIX__SECTION__KEY"))?;
        let flag = || parse_bool(value).ok_or_else(|| ConfigError::environment(key, "expected boolean"));
        let logging = &mut self.config.logging;

        match path.split("__").collect::<Vec<_>>().as_slice() {
            ["LINKER", "DEFAULT_ROUTE_NAME"] => {
                self.config.linker.default_route_name = value.to_string();
            }
            ["LOGGING", "ENABLED"] => logging.enabled = flag()?,
            ["LOGGING", "LEVEL"] => logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                logging.format = match value.to_ascii_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => return Err(ConfigError::environment(key, "expected json or pretty")),
                };
            }
            ["LOGGING", "SPAN_EVENTS"] => logging.span_events = flag()?,
            ["LOGGING", "FILE_LINE_INFO"] => logging.file_line_info = flag()?,
            ["LOGGING", "INCLUDE_TARGET"] => logging.include_target = flag()?,
            ["LOGGING", "ANSI_ENABLED"] => logging.ansi_enabled = flag()?,
            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loads_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HyprlinkrConfig::default());
    }

    #[test]
    fn test_presets() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);

        let config = ConfigLoader::new().with_development().with_defaults().load().unwrap();
        assert_eq!(config, HyprlinkrConfig::default());
    }

    #[test]
    fn test_with_string_json() {
        let json = r#"{"linker": {"default_route_name": "DefaultApi"}}"#;
        let config = ConfigLoader::new()
            .with_string(json, "JSON")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.linker.default_route_name, "DefaultApi");
    }

    #[test]
    fn test_with_string_rejects_unknown_fields() {
        let toml = r#"
            [linker]
            default_route = "DefaultApi"
        "#;
        let result = ConfigLoader::new().with_string(toml, "toml");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_with_string_rejects_unknown_format() {
        let result = ConfigLoader::new().with_string("", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_validates() {
        let json = r#"{"linker": {"default_route_name": ""}}"#;
        let result = ConfigLoader::new().with_string(json, "json").unwrap().load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load_unvalidated();
        assert!(config.linker.default_route_name.is_empty());
    }

    #[test]
    fn test_with_file_missing() {
        let result = ConfigLoader::new().with_file("/nonexistent/hyprlinkr.toml");
        assert!(matches!(result, Err(ConfigError::Missing { .. })));

        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/hyprlinkr.toml")
            .unwrap()
            .load_unvalidated();
        assert_eq!(config, HyprlinkrConfig::default());
    }

    #[test]
    fn test_parse_bool() {
        for value in ["true", "True", "1", "yes", "on"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["false", "FALSE", "0", "no", "off"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    // Overrides are exercised through apply_env_var; changing the process
    // environment needs unsafe code.

    #[test]
    fn test_env_linker_route_name() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__LINKER__DEFAULT_ROUTE_NAME", "DefaultApi", "TEST")
            .unwrap();
        assert_eq!(loader.config.linker.default_route_name, "DefaultApi");
    }

    #[test]
    fn test_env_logging() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__LOGGING__LEVEL", "trace", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__FORMAT", "Pretty", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__ENABLED", "off", "TEST").unwrap();
        assert_eq!(loader.config.logging.level, "trace");
        assert_eq!(loader.config.logging.format, LogFormat::Pretty);
        assert!(!loader.config.logging.enabled);
    }

    #[test]
    fn test_env_malformed() {
        let mut loader = ConfigLoader::new();
        for (key, value) in [
            ("TEST__LOGGING__FORMAT", "xml"),
            ("TEST__LOGGING__ENABLED", "maybe"),
            ("TESTLOGGING", "x"),
        ] {
            let err = loader.apply_env_var(key, value, "TEST").unwrap_err();
            assert!(matches!(err, ConfigError::Environment { .. }), "{key}");
        }
    }

    #[test]
    fn test_env_unknown_keys_ignored() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__ROUTES__0", "x", "TEST").unwrap();
        assert_eq!(loader.config, HyprlinkrConfig::default());
    }
}
