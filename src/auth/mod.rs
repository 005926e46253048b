//! GitLab credentials
//!
//! Resolves a token for a host from configured integrations, environment
//! variables or an explicit per-run override.

mod integrations;

pub use integrations::{GitLabIntegrationConfig, ScmIntegrations};

use std::fmt;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from the config file
    Config,
    /// Token from environment variable
    EnvVar,
    /// Token passed with the action input
    Input,
}

/// Everything a client needs to talk to one GitLab host
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// GitLab host
    pub host: String,
    /// Access token
    pub token: String,
    /// REST API root, without trailing slash
    pub api_base_url: String,
    /// Web root, used for links shown to the user
    pub base_url: String,
    /// Where the token came from
    pub source: TokenSource,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("base_url", &self.base_url)
            .field("source", &self.source)
            .finish()
    }
}
