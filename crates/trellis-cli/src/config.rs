//! `trellis.toml` configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use trellis_codegen::generators::DEFAULT_COMPONENT_NAME;
use trellis_core::DatabaseSettings;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "trellis.toml";

/// Generator settings. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub express: ExpressConfig,
    pub django: DjangoConfig,
    pub react: FrontendConfig,
    pub vue: FrontendConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpressConfig {
    pub mongo_url: String,
    pub port: u16,
}

impl Default for ExpressConfig {
    fn default() -> Self {
        Self {
            mongo_url: trellis_codegen::generators::DEFAULT_MONGO_URL.to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DjangoConfig {
    pub app_name: String,
    pub database: DatabaseSettings,
}

impl Default for DjangoConfig {
    fn default() -> Self {
        Self {
            app_name: trellis_codegen::generators::DEFAULT_APP_NAME.to_string(),
            database: DatabaseSettings::sqlite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub component_name: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path`, or `trellis.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("in config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::DatabaseKind;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().express.port, 5000);
        assert_eq!(Config::default().django.app_name, "api");
        assert_eq!(Config::default().vue.component_name, "GeneratedLayout");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [express]
            port = 5070

            [django]
            app_name = "shop"

            [django.database]
            type = "postgres"
            host = "db"
            port = 6543

            [react]
            component_name = "Landing"
            "#,
        )
        .unwrap();

        assert_eq!(config.express.port, 5070);
        assert_eq!(config.express.mongo_url, "mongodb://localhost:27017/mydb");
        assert_eq!(config.django.app_name, "shop");
        assert_eq!(config.django.database.kind, DatabaseKind::Postgres);
        assert_eq!(config.django.database.port, "6543");
        assert_eq!(config.django.database.user, "postgres");
        assert_eq!(config.react.component_name, "Landing");
        assert_eq!(config.vue.component_name, "GeneratedLayout");
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(Config::parse("[angular]\ncomponent_name = \"X\"").is_err());
    }
}
