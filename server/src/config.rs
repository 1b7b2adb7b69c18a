//! Configuration management for the depot server.
//!
//! Loaded with figment from defaults, an optional TOML file and
//! `DEPOT_`-prefixed environment variables (nested keys split on `__`).

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "depot.toml";

/// Server configuration.
///
/// Precedence, highest first:
/// 1. Environment variables (`DEPOT_SERVER__BIND=...`)
/// 2. TOML config file
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file; `:memory:` keeps everything in memory.
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for rolling log files.
    pub dir: PathBuf,
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("depot.db"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: "info".to_string(),
            max_file_bytes: 5 * 1024 * 1024,
            max_files: 5,
        }
    }
}

impl Config {
    /// Load configuration, reading `depot.toml` from the working directory
    /// unless another path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails. An explicit
    /// path must exist; the default `depot.toml` is optional.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.is_file() => return Err(Error::ConfigNotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };

        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("DEPOT_").split("__"))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(Error::validation("server.bind must not be empty"));
        }
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(Error::validation("storage.database_path must not be empty"));
        }
        if self.logging.max_file_bytes == 0 {
            return Err(Error::validation("logging.max_file_bytes must be greater than 0"));
        }
        if self.logging.max_files == 0 {
            return Err(Error::validation("logging.max_files must be greater than 0"));
        }
        Ok(())
    }

    /// Options handed to the rolling logger.
    #[must_use]
    pub fn logger_options(&self) -> rolling_logger::LoggerOptions {
        rolling_logger::LoggerOptions {
            level: self.logging.level.clone(),
            max_file_bytes: self.logging.max_file_bytes,
            max_files: self.logging.max_files,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.logging.max_files, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = Config::default();
        config.logging.max_file_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.max_files = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_files"));
    }

    #[test]
    fn test_validate_rejects_empty_bind() {
        let mut config = Config::default();
        config.server.bind = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [server]
                bind = "127.0.0.1:9000"

                [storage]
                database_path = "data/depot.db"
                "#,
            )?;

            let config = Config::load_from(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.bind, "127.0.0.1:9000");
            assert_eq!(config.storage.database_path, PathBuf::from("data/depot.db"));
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "[logging]\nlevel = \"warn\"\n")?;
            jail.set_env("DEPOT_LOGGING__LEVEL", "debug");
            jail.set_env("DEPOT_SERVER__BIND", "127.0.0.1:8181");

            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.server.bind, "127.0.0.1:8181");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_| {
            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        Jail::expect_with(|_| {
            let err = Config::load_from(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigNotFound(_)));
            assert!(err.to_string().contains("missing.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_fail_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("DEPOT_LOGGING__MAX_FILES", "0");
            assert!(Config::load_from(None).is_err());
            Ok(())
        });
    }
}
