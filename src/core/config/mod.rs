//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`ECOBALYSE_GITHUB_API`, the token variable)
//! 4. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! An explicit `--config <path>` must exist. Otherwise, searched in order:
//! 1. `$ECOBALYSE_RELEASE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ecobalyse-release/config.toml`
//! 3. `~/.ecobalyse-release/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use ecobalyse_release::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Repository: {}", config.repository());
//! println!("API: {}", config.api_base().unwrap());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::RepoSlug;
use crate::forge::github::DEFAULT_API_BASE;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ECOBALYSE_RELEASE_CONFIG";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "ECOBALYSE_GITHUB_API";

/// Default environment variable holding the access token.
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: '{0}'")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Path the config was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With `explicit`, that file must exist. Otherwise the standard
    /// locations are searched.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from(path);
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file in the standard locations.
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check $ECOBALYSE_RELEASE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/ecobalyse-release/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("ecobalyse-release/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.ecobalyse-release/config.toml
        dirs::home_dir()
            .map(|home| home.join(".ecobalyse-release/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path the configuration was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Repository to query, defaulting to `MTES-MCT/ecobalyse`.
    pub fn repository(&self) -> RepoSlug {
        self.file
            .repository
            .as_deref()
            .and_then(|s| RepoSlug::parse(s).ok())
            .unwrap_or_else(RepoSlug::ecobalyse)
    }

    /// API base URL: `$ECOBALYSE_GITHUB_API`, then the file, then the default.
    pub fn api_base(&self) -> Result<String, ConfigError> {
        self.api_base_with(std::env::var(API_BASE_ENV).ok())
    }

    /// API base URL with an explicit environment override.
    ///
    /// A non-blank override is validated like the file value.
    pub fn api_base_with(&self, env_override: Option<String>) -> Result<String, ConfigError> {
        match env_override.filter(|s| !s.trim().is_empty()) {
            Some(value) => {
                let value = value.trim().to_string();
                schema::validate_api_base(&value).map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "invalid {} '{}', must start with http:// or https://",
                        API_BASE_ENV, value
                    ))
                })?;
                Ok(value)
            }
            None => Ok(self
                .file
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())),
        }
    }

    /// Name of the environment variable holding the access token.
    pub fn token_env(&self) -> &str {
        self.file.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)
    }

    /// Read the access token from the configured environment variable.
    ///
    /// Unset or blank values yield `None` (anonymous access).
    pub fn access_token(&self) -> Option<String> {
        std::env::var(self.token_env())
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.repository(), RepoSlug::ecobalyse());
        assert_eq!(config.api_base_with(None).unwrap(), DEFAULT_API_BASE);
        assert_eq!(config.token_env(), "GITHUB_TOKEN");
        assert!(config.path().is_none());
    }

    #[test]
    fn load_from_file() {
        let file = write_config(
            "repository = \"owner/repo\"\napi_base = \"http://localhost:8080\"\ntoken_env = \"MY_TOKEN\"\n",
        );

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.repository().to_string(), "owner/repo");
        assert_eq!(config.api_base_with(None).unwrap(), "http://localhost:8080");
        assert_eq!(config.token_env(), "MY_TOKEN");
        assert_eq!(config.path(), Some(file.path()));
    }

    #[test]
    fn env_override_wins_over_file() {
        let file = write_config("api_base = \"http://from-file\"\n");
        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(
            config.api_base_with(Some("http://from-env".into())).unwrap(),
            "http://from-env"
        );
        assert_eq!(
            config.api_base_with(Some("  ".into())).unwrap(),
            "http://from-file"
        );
    }

    #[test]
    fn malformed_env_override_is_rejected() {
        let config = Config::default();

        let err = config
            .api_base_with(Some("localhost:8080".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains(API_BASE_ENV));

        let err = config
            .api_base_with(Some("ftp://mirror.example".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let file = write_config("repository = [\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn invalid_value_is_rejected_on_load() {
        let file = write_config("repository = \"nope\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
