//! Core types for glmr

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation applied to a file within a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitAction {
    /// Add a new file
    #[default]
    Create,
    /// Replace the content of an existing file
    Update,
    /// Remove the file
    Delete,
}

impl CommitAction {
    /// Wire name used by the GitLab commits API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for CommitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(Error::InvalidInput(format!(
                "unknown commit action '{other}' (expected create, update or delete)"
            ))),
        }
    }
}

/// Parameters of a single publish run, as handed over by the host engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishInput {
    /// Repository reference, e.g. `gitlab.com?owner=group&repo=project`
    pub repo_url: String,
    /// Merge request title, also used as the commit message
    pub title: String,
    /// Branch to create for the changes
    pub branch_name: String,
    /// Merge request description
    #[serde(default)]
    pub description: String,
    /// What to do with each discovered file
    #[serde(default)]
    pub commit_action: CommitAction,
    /// Workspace subdirectory whose files are committed
    #[serde(default)]
    pub target_path: String,
    /// Open the merge request as a draft
    #[serde(default)]
    pub draft: bool,
    /// Delete the source branch once merged
    #[serde(default)]
    pub remove_source_branch: bool,
    /// Username to assign the merge request to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Token overriding the one from the integration config
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

/// Content encoding of a commit action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Plain UTF-8 text
    #[default]
    Text,
    /// Base64-encoded bytes
    Base64,
}

impl Encoding {
    /// GitLab treats a missing encoding as text, so it is left off the wire
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// A single file change inside a commit
///
/// Serializes to the shape of an entry in the GitLab commits API `actions` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Operation to apply
    pub action: CommitAction,
    /// Path relative to the repository root, `/`-separated
    pub file_path: String,
    /// File content; absent for deletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Content encoding
    #[serde(default, skip_serializing_if = "Encoding::is_text")]
    pub encoding: Encoding,
}

impl FileChange {
    /// A delete action, which never carries content
    pub fn delete(file_path: impl Into<String>) -> Self {
        Self {
            action: CommitAction::Delete,
            file_path: file_path.into(),
            content: None,
            encoding: Encoding::Text,
        }
    }

    /// A create/update action with text content
    pub fn text(
        action: CommitAction,
        file_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            action,
            file_path: file_path.into(),
            content: Some(content.into()),
            encoding: Encoding::Text,
        }
    }

    /// A create/update action with already base64-encoded content
    pub fn base64(action: CommitAction, file_path: impl Into<String>, encoded: String) -> Self {
        Self {
            action,
            file_path: file_path.into(),
            content: Some(encoded),
            encoding: Encoding::Base64,
        }
    }
}

/// Everything needed to create the commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    /// Project slug (`owner/repo`)
    pub project: String,
    /// Branch the commit lands on
    pub branch: String,
    /// Commit message
    pub message: String,
    /// File changes in discovery order
    pub changes: Vec<FileChange>,
}

/// Repository reference parsed from a repo URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// GitLab host (e.g. "gitlab.com")
    pub host: String,
    /// Namespace, possibly nested (`group/subgroup`)
    pub owner: String,
    /// Project name
    pub repo: String,
}

impl RepoRef {
    /// Project path as GitLab expects it
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Extra merge request settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRequestOptions {
    /// Description body
    pub description: String,
    /// Delete the source branch once merged
    pub remove_source_branch: bool,
    /// User to assign
    pub assignee_id: Option<u64>,
}

/// A merge request as returned by GitLab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped MR number
    pub iid: u64,
    /// Web URL for the MR
    pub web_url: String,
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// MR title
    pub title: String,
}

/// Output of a successful publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequestResult {
    /// Project identifier used for the API calls
    pub project_id: String,
    /// Project path (`owner/repo`)
    pub project_path: String,
    /// Web URL of the created merge request
    pub merge_request_url: String,
    /// Project-scoped merge request number
    pub merge_request_number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_action_defaults_to_create() {
        assert_eq!(CommitAction::default(), CommitAction::Create);
    }

    #[test]
    fn test_commit_action_from_str() {
        assert_eq!("update".parse::<CommitAction>().unwrap(), CommitAction::Update);
        assert!("rename".parse::<CommitAction>().is_err());
    }

    #[test]
    fn test_publish_input_defaults() {
        let input: PublishInput = serde_json::from_str(
            r#"{"repoUrl":"gitlab.com?repo=repo&owner=owner","title":"t","branchName":"b"}"#,
        )
        .unwrap();

        assert_eq!(input.commit_action, CommitAction::Create);
        assert_eq!(input.target_path, "");
        assert!(!input.draft);
        assert!(input.assignee.is_none());
    }

    #[test]
    fn test_publish_input_commit_action_from_json() {
        let input: PublishInput = serde_json::from_str(
            r#"{"repoUrl":"gitlab.com?repo=r&owner=o","title":"t","branchName":"b","commitAction":"delete"}"#,
        )
        .unwrap();
        assert_eq!(input.commit_action, CommitAction::Delete);
    }

    #[test]
    fn test_delete_change_omits_content_on_wire() {
        let json = serde_json::to_value(FileChange::delete("foo/bar5")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "action": "delete", "file_path": "foo/bar5" })
        );
    }

    #[test]
    fn test_binary_change_carries_encoding() {
        let json =
            serde_json::to_value(FileChange::base64(CommitAction::Update, "a.bin", "AAE=".into()))
                .unwrap();
        assert_eq!(json["encoding"], "base64");
        assert_eq!(json["content"], "AAE=");
    }

    #[test]
    fn test_repo_slug() {
        let repo = RepoRef {
            host: "gitlab.com".into(),
            owner: "group/sub".into(),
            repo: "proj".into(),
        };
        assert_eq!(repo.slug(), "group/sub/proj");
    }
}
