//! Configuration
//!
//! Layered configuration for the taxonomy CLI: defaults, then an optional
//! TOML file, then `TAXA__`-prefixed environment variables (highest
//! precedence). The taxonomy definition source and logging behavior are the
//! only configurable concerns; the forest itself is never configured at
//! runtime beyond choosing which definition file to load.

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the forest definition comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// External JSON definition file; None means the built-in retail forest.
    #[serde(default)]
    pub definition: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxaConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment only.
    pub fn load() -> Result<TaxaConfig, ConfigError> {
        let config = Config::builder().add_source(Self::environment()).build()?;
        config.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay
    /// (environment wins).
    pub fn load_from_file(path: &Path) -> Result<TaxaConfig, ConfigError> {
        let path = path
            .to_str()
            .ok_or_else(|| ConfigError::Message(format!("non-UTF-8 config path: {:?}", path)))?;
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?;
        config.try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("TAXA")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaxaConfig::default();
        assert!(config.taxonomy.definition.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxa.toml");
        std::fs::write(
            &path,
            r#"
[logging]
level = "debug"
output = "stdout"

[taxonomy]
definition = "/etc/taxa/forest.json"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.output, "stdout");
        assert_eq!(
            config.taxonomy.definition,
            Some(PathBuf::from("/etc/taxa/forest.json"))
        );
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        assert!(ConfigLoader::load_from_file(Path::new("/no/such/taxa.toml")).is_err());
    }
}
