//! Client factory
//!
//! Creates the default GitLab client from resolved credentials.

use crate::auth::Credentials;
use crate::error::Result;
use crate::platform::{GitLabClient, GitLabService};
use std::sync::Arc;

/// Create a REST client for the credentials' host
pub fn create_client(credentials: &Credentials) -> Result<Arc<dyn GitLabClient>> {
    tracing::debug!(
        host = %credentials.host,
        api = %credentials.api_base_url,
        source = ?credentials.source,
        "creating GitLab client"
    );
    Ok(Arc::new(GitLabService::new(
        credentials.token.clone(),
        credentials.api_base_url.clone(),
    )))
}
