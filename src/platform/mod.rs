//! GitLab platform access
//!
//! The publisher only sees the [`GitLabClient`] trait, so tests and host
//! engines can substitute their own client.

mod factory;
mod gitlab;
mod repo_url;

pub use factory::create_client;
pub use gitlab::GitLabService;
pub use repo_url::parse_repo_url;

use crate::error::Result;
use crate::types::{FileChange, MergeRequest, MergeRequestOptions};
use async_trait::async_trait;

/// Remote operations needed to publish a merge request
#[async_trait]
pub trait GitLabClient: Send + Sync {
    /// Default branch of a project
    async fn default_branch(&self, project: &str) -> Result<String>;

    /// Create `branch` from `reference`
    async fn create_branch(&self, project: &str, branch: &str, reference: &str) -> Result<()>;

    /// Create one commit on `branch` applying all `changes`
    async fn create_commit(
        &self,
        project: &str,
        branch: &str,
        message: &str,
        changes: &[FileChange],
    ) -> Result<()>;

    /// Look up a user's numeric ID by username
    async fn find_user_id(&self, username: &str) -> Result<Option<u64>>;

    /// Open a merge request from `source_branch` into `target_branch`
    async fn create_merge_request(
        &self,
        project: &str,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        options: &MergeRequestOptions,
    ) -> Result<MergeRequest>;

    /// Username the token authenticates as
    async fn current_user(&self) -> Result<String>;
}
