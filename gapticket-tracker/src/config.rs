//! Loading of the jira-cli configuration file.
//!
//! The file belongs to jira-cli (`jira init` writes it), so unknown keys are
//! ignored. Only the fields gapticket needs are typed and checked.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira server.
    pub server: String,
    pub login: String,
    pub project: ProjectConfig,
    #[serde(default)]
    pub epic: Option<EpicConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub key: String,
}

/// Custom field identifiers used for epics.
#[derive(Debug, Clone, Deserialize)]
pub struct EpicConfig {
    #[serde(default)]
    pub name: Option<String>,
    /// Epic-link custom field, e.g. `customfield_12311140`.
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JIRA config not found at {}. Please run 'jira init' to configure jira-cli.", .path.display())]
    NotFound { path: PathBuf },
    #[error("Cannot locate home directory (use --config or JIRA_CONFIG_FILE)")]
    NoHomeDirectory,
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl JiraConfig {
    /// Load and validate the config from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.config/.jira/.config.yml`, where jira-cli keeps its settings.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".config").join(".jira").join(".config.yml"))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = self.server.trim();
        if server.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server",
                reason: "must not be empty".to_string(),
            });
        }
        if !(server.starts_with("https://") || server.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "server",
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.login.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "login",
                reason: "must not be empty".to_string(),
            });
        }
        if self.project.key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project.key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server.trim().trim_end_matches('/')
    }

    /// Browsable URL of a ticket.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url(), key)
    }

    pub fn epic_link_field(&self) -> Option<&str> {
        self.epic.as_ref().and_then(|e| e.link.as_deref())
    }
}
