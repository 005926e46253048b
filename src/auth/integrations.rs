//! Registry of configured GitLab hosts

use crate::auth::{Credentials, TokenSource};
use crate::config::{Config, GitLabIntegrationEntry};
use crate::error::{Error, Result};
use std::env;

/// Default public GitLab host
pub const DEFAULT_HOST: &str = "gitlab.com";

/// A GitLab host with its API endpoints and optional token
#[derive(Clone, PartialEq, Eq)]
pub struct GitLabIntegrationConfig {
    /// Host name, optionally with port
    pub host: String,
    /// Access token, if configured
    pub token: Option<String>,
    /// Where `token` came from
    pub token_source: TokenSource,
    /// REST API root, without trailing slash
    pub api_base_url: String,
    /// Web root, without trailing slash
    pub base_url: String,
}

impl std::fmt::Debug for GitLabIntegrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabIntegrationConfig")
            .field("host", &self.host)
            .field("has_token", &self.token.is_some())
            .field("api_base_url", &self.api_base_url)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GitLabIntegrationConfig {
    /// Integration for a host with default endpoints and no token
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            api_base_url: format!("https://{host}/api/v4"),
            base_url: format!("https://{host}"),
            token: None,
            token_source: TokenSource::Config,
            host,
        }
    }

    /// Set the token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, source: TokenSource) -> Self {
        self.token = Some(token.into());
        self.token_source = source;
        self
    }

    fn from_entry(entry: &GitLabIntegrationEntry) -> Self {
        let mut config = Self::new(entry.host.trim());
        if let Some(api) = &entry.api_base_url {
            config.api_base_url = api.trim_end_matches('/').to_string();
        }
        if let Some(base) = &entry.base_url {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        config.token = entry.token.clone().filter(|t| !t.is_empty());
        config
    }
}

/// Lookup of GitLab integrations by host
#[derive(Debug, Clone, Default)]
pub struct ScmIntegrations {
    gitlab: Vec<GitLabIntegrationConfig>,
}

impl ScmIntegrations {
    /// Registry from explicit integrations
    pub fn new(gitlab: Vec<GitLabIntegrationConfig>) -> Self {
        Self { gitlab }
    }

    /// Registry from the `[[integrations.gitlab]]` config entries
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config
                .integrations
                .gitlab
                .iter()
                .map(GitLabIntegrationConfig::from_entry)
                .collect(),
        )
    }

    /// Registry from config, with process environment as fallback
    pub fn from_config_and_env(config: &Config) -> Self {
        Self::from_config(config).with_env_fallback(|key| env::var(key).ok())
    }

    /// Fill in a token from the environment
    ///
    /// Uses `GITLAB_TOKEN`, then `GL_TOKEN`, for the host named by
    /// `GITLAB_HOST` (default `gitlab.com`). A configured token always wins.
    #[must_use]
    pub fn with_env_fallback<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(token) = lookup("GITLAB_TOKEN")
            .or_else(|| lookup("GL_TOKEN"))
            .filter(|t| !t.is_empty())
        else {
            return self;
        };

        let host = lookup("GITLAB_HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        match self.gitlab.iter_mut().find(|i| host_matches(&i.host, &host)) {
            Some(existing) if existing.token.is_none() => {
                existing.token = Some(token);
                existing.token_source = TokenSource::EnvVar;
            }
            Some(_) => {}
            None => {
                self.gitlab
                    .push(GitLabIntegrationConfig::new(host).with_token(token, TokenSource::EnvVar));
            }
        }

        self
    }

    /// All configured integrations
    pub fn list(&self) -> &[GitLabIntegrationConfig] {
        &self.gitlab
    }

    /// Find the integration for a host
    pub fn by_host(&self, host: &str) -> Option<&GitLabIntegrationConfig> {
        self.gitlab.iter().find(|i| host_matches(&i.host, host))
    }

    /// Resolve credentials for a host
    ///
    /// A non-empty `token_override` replaces the configured token.
    pub fn credentials_for(&self, host: &str, token_override: Option<&str>) -> Result<Credentials> {
        let integration = self.by_host(host).ok_or_else(|| {
            Error::Configuration(format!(
                "No matching integration configuration for host {host}, please check your integrations config"
            ))
        })?;

        let (token, source) = match token_override.filter(|t| !t.is_empty()) {
            Some(token) => (token.to_string(), TokenSource::Input),
            None => {
                let token = integration.token.clone().ok_or_else(|| {
                    Error::Configuration(format!("No token available for host: {host}"))
                })?;
                (token, integration.token_source)
            }
        };

        Ok(Credentials {
            host: integration.host.clone(),
            token,
            api_base_url: integration.api_base_url.clone(),
            base_url: integration.base_url.clone(),
            source,
        })
    }
}

fn host_matches(configured: &str, requested: &str) -> bool {
    configured.eq_ignore_ascii_case(requested)
}
