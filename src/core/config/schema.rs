//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: the repository must be an
//! `owner/name` slug and the API base must be an http(s) URL.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RepoSlug;

/// Release tooling configuration.
///
/// # Example
///
/// ```toml
/// repository = "MTES-MCT/ecobalyse"
/// api_base = "https://api.github.com"
/// token_env = "GITHUB_TOKEN"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository to query for tags (`owner/name`)
    pub repository: Option<String>,

    /// GitHub API base URL
    pub api_base: Option<String>,

    /// Name of the environment variable holding the access token
    pub token_env: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repository) = &self.repository {
            RepoSlug::parse(repository).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(api_base) = &self.api_base {
            validate_api_base(api_base)?;
        }

        if let Some(token_env) = &self.token_env {
            if token_env.trim().is_empty() || token_env.contains('=') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid token_env '{}', must be an environment variable name",
                    token_env
                )));
            }
        }

        Ok(())
    }
}

/// Check that an API base is an http(s) URL.
pub fn validate_api_base(api_base: &str) -> Result<(), ConfigError> {
    if api_base.starts_with("https://") || api_base.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid api_base '{}', must start with http:// or https://",
            api_base
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
repository = "owner/repo"
api_base = "https://github.example.com/api/v3"
token_env = "ECOBALYSE_TOKEN"
"#,
        )
        .unwrap();

        assert_eq!(config.repository.as_deref(), Some("owner/repo"));
        assert_eq!(config.token_env.as_deref(), Some("ECOBALYSE_TOKEN"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<FileConfig, _> = toml::from_str("trunk = \"main\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_repository() {
        let config = FileConfig {
            repository: Some("not-a-slug".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_bad_api_base() {
        let config = FileConfig {
            api_base: Some("ftp://example.com".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_bad_token_env() {
        for name in ["", "  ", "A=B"] {
            let config = FileConfig {
                token_env: Some(name.into()),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{:?}", name);
        }
    }
}
