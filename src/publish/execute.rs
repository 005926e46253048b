//! Phase 3: Publish execution
//!
//! Creates the branch, the commit and the merge request, in that order.
//! The first remote failure aborts the run. An empty change set is refused
//! before anything is sent.

use crate::auth::{Credentials, ScmIntegrations};
use crate::error::{Error, Result};
use crate::platform::{GitLabClient, create_client, parse_repo_url};
use crate::publish::plan::{PublishPlan, plan_for_repo};
use crate::publish::{Phase, ProgressCallback};
use crate::types::{MergeRequestOptions, MergeRequestResult, PublishInput};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

type ClientFactory = dyn Fn(&Credentials) -> Result<Arc<dyn GitLabClient>> + Send + Sync;

/// Publishes workspace files to GitLab as a merge request
pub struct MergeRequestPublisher {
    integrations: ScmIntegrations,
    client_factory: Box<ClientFactory>,
}

impl MergeRequestPublisher {
    /// Create a publisher with a custom client factory
    pub fn new<F>(integrations: ScmIntegrations, client_factory: F) -> Self
    where
        F: Fn(&Credentials) -> Result<Arc<dyn GitLabClient>> + Send + Sync + 'static,
    {
        Self {
            integrations,
            client_factory: Box::new(client_factory),
        }
    }

    /// Create a publisher backed by the REST client
    pub fn with_default_client(integrations: ScmIntegrations) -> Self {
        Self::new(integrations, create_client)
    }

    /// The integrations used to resolve credentials
    pub const fn integrations(&self) -> &ScmIntegrations {
        &self.integrations
    }

    /// Run the publish step
    ///
    /// Credentials are resolved before the workspace is read, so a missing
    /// integration fails fast.
    pub async fn execute(
        &self,
        input: &PublishInput,
        workspace: &Path,
        progress: &dyn ProgressCallback,
    ) -> Result<MergeRequestResult> {
        progress.on_phase(Phase::Resolving).await;
        let repo = parse_repo_url(&input.repo_url)?;
        let credentials = self
            .integrations
            .credentials_for(&repo.host, input.token.as_deref())?;
        let client = (self.client_factory)(&credentials)?;
        progress
            .on_message(&format!("Publishing to {}/{}", credentials.base_url, repo.slug()))
            .await;

        progress.on_phase(Phase::Collecting).await;
        let plan = plan_for_repo(input, repo, workspace).await?;
        progress.on_changes(&plan.commit.changes).await;

        execute_plan(&plan, client.as_ref(), progress).await
    }
}

/// Apply a plan against a GitLab client
pub async fn execute_plan(
    plan: &PublishPlan,
    client: &dyn GitLabClient,
    progress: &dyn ProgressCallback,
) -> Result<MergeRequestResult> {
    let commit = &plan.commit;
    let project = commit.project.as_str();

    // GitLab rejects a commit without actions, and the branch would be left behind.
    if commit.changes.is_empty() {
        return Err(Error::InvalidInput(format!(
            "No files to commit on branch {}",
            commit.branch
        )));
    }

    progress.on_phase(Phase::CreatingBranch).await;

    let default_branch = client
        .default_branch(project)
        .await
        .map_err(|e| Error::remote(format!("Fetching project {project} failed"), e))?;
    progress
        .on_message(&format!("Branching {} from {default_branch}", commit.branch))
        .await;

    client
        .create_branch(project, &commit.branch, &default_branch)
        .await
        .map_err(|e| Error::remote("The branch creation failed", e))?;

    progress.on_phase(Phase::Committing).await;

    client
        .create_commit(project, &commit.branch, &commit.message, &commit.changes)
        .await
        .map_err(|e| {
            Error::remote(
                format!("Committing the changes to {} failed", commit.branch),
                e,
            )
        })?;

    progress.on_phase(Phase::CreatingMergeRequest).await;

    let assignee_id = match plan.assignee.as_deref() {
        Some(username) => resolve_assignee(client, username, progress).await,
        None => None,
    };

    let options = MergeRequestOptions {
        description: plan.description.clone(),
        remove_source_branch: plan.remove_source_branch,
        assignee_id,
    };

    let mr = client
        .create_merge_request(
            project,
            &commit.branch,
            &default_branch,
            &plan.merge_request_title,
            &options,
        )
        .await
        .map_err(|e| Error::remote("Merge request creation failed", e))?;

    info!(iid = mr.iid, url = %mr.web_url, "merge request created");
    progress.on_merge_request(&mr).await;
    progress.on_phase(Phase::Complete).await;

    Ok(MergeRequestResult {
        project_id: project.to_string(),
        project_path: project.to_string(),
        merge_request_url: mr.web_url,
        merge_request_number: mr.iid,
    })
}

/// Look up the assignee; failures leave the merge request unassigned
async fn resolve_assignee(
    client: &dyn GitLabClient,
    username: &str,
    progress: &dyn ProgressCallback,
) -> Option<u64> {
    match client.find_user_id(username).await {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            let msg = format!("Assignee user {username} not found, merge request will be unassigned");
            warn!("{msg}");
            progress.on_warning(&msg).await;
            None
        }
        Err(e) => {
            let msg = format!("Failed to look up assignee {username}: {e}");
            warn!("{msg}");
            progress.on_warning(&msg).await;
            None
        }
    }
}
