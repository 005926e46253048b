//! Configuration file loading
//!
//! Integrations are declared in TOML:
//!
//! ```toml
//! [[integrations.gitlab]]
//! host = "gitlab.example.com"
//! token = "glpat-..."
//! api_base_url = "https://gitlab.example.com/api/v4"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SCM integrations by provider
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Integrations section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    /// GitLab hosts
    #[serde(default)]
    pub gitlab: Vec<GitLabIntegrationEntry>,
}

/// One `[[integrations.gitlab]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabIntegrationEntry {
    /// Host name, optionally with port
    pub host: String,
    /// Personal/project access token
    #[serde(default)]
    pub token: Option<String>,
    /// REST API root; defaults to `https://<host>/api/v4`
    #[serde(default, alias = "apiBaseUrl")]
    pub api_base_url: Option<String>,
    /// Web root; defaults to `https://<host>`
    #[serde(default, alias = "baseUrl")]
    pub base_url: Option<String>,
}

impl Config {
    /// Default config location (`~/.config/glmr/config.toml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glmr").join("config.toml"))
    }

    /// Parse config from a TOML string
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a file. A missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        Self::from_toml(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from an explicit path, or the default location if none is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default_path().map_or_else(|| Ok(Self::default()), |p| Self::load(&p)),
        }
    }
}
