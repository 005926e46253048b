//! Phase 2: Publish planning
//!
//! Determines the commit and merge request to create, without touching the
//! remote.

use crate::error::{Error, Result};
use crate::platform::parse_repo_url;
use crate::publish::workspace::{build_changes, collect_files};
use crate::types::{CommitRequest, PublishInput, RepoRef};
use serde::Serialize;
use std::path::Path;

const DRAFT_PREFIX: &str = "Draft: ";

/// Everything that will be sent to GitLab
#[derive(Debug, Clone, Serialize)]
pub struct PublishPlan {
    /// Target repository
    #[serde(skip)]
    pub repo: RepoRef,
    /// Commit to create on the new branch
    pub commit: CommitRequest,
    /// Merge request title (draft-marked if requested)
    pub merge_request_title: String,
    /// Merge request description
    pub description: String,
    /// Delete the source branch once merged
    pub remove_source_branch: bool,
    /// Username to assign, if any
    pub assignee: Option<String>,
}

/// Create a plan from the input and workspace
pub async fn create_publish_plan(input: &PublishInput, workspace: &Path) -> Result<PublishPlan> {
    let repo = parse_repo_url(&input.repo_url)?;
    plan_for_repo(input, repo, workspace).await
}

pub(crate) async fn plan_for_repo(
    input: &PublishInput,
    repo: RepoRef,
    workspace: &Path,
) -> Result<PublishPlan> {
    let files = {
        let workspace = workspace.to_path_buf();
        let target_path = input.target_path.clone();
        tokio::task::spawn_blocking(move || collect_files(&workspace, &target_path))
            .await
            .map_err(|e| Error::Internal(format!("workspace scan failed: {e}")))??
    };
    let changes = build_changes(&files, input.commit_action).await?;

    Ok(PublishPlan {
        commit: CommitRequest {
            project: repo.slug(),
            branch: input.branch_name.clone(),
            message: input.title.clone(),
            changes,
        },
        repo,
        merge_request_title: merge_request_title(&input.title, input.draft),
        description: input.description.clone(),
        remove_source_branch: input.remove_source_branch,
        assignee: input.assignee.clone().filter(|a| !a.is_empty()),
    })
}

/// Merge request title, marked as draft when requested
pub fn merge_request_title(title: &str, draft: bool) -> String {
    if !draft || is_draft_title(title) {
        return title.to_string();
    }
    format!("{DRAFT_PREFIX}{title}")
}

fn is_draft_title(title: &str) -> bool {
    let lower = title.trim_start().to_ascii_lowercase();
    ["draft:", "[draft]", "(draft)"]
        .iter()
        .any(|marker| lower.starts_with(marker))
}
