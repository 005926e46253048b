//! Test data factories for glmr types

#![allow(dead_code)]

use crate::common::mock_gitlab::MockGitLabClient;
use glmr::auth::{Credentials, GitLabIntegrationConfig, ScmIntegrations, TokenSource};
use glmr::platform::GitLabClient;
use glmr::publish::MergeRequestPublisher;
use glmr::types::{CommitAction, PublishInput};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Two hosts: gitlab.com with a token, hosted.gitlab.com without one
pub fn integrations() -> ScmIntegrations {
    let mut gitlab = GitLabIntegrationConfig::new("gitlab.com")
        .with_token("token", TokenSource::Config);
    gitlab.api_base_url = "https://api.gitlab.com".to_string();

    let mut hosted = GitLabIntegrationConfig::new("hosted.gitlab.com");
    hosted.api_base_url = "https://api.hosted.gitlab.com".to_string();

    ScmIntegrations::new(vec![gitlab, hosted])
}

/// Publish input targeting `owner/repo` on gitlab.com
pub fn make_input(commit_action: Option<CommitAction>) -> PublishInput {
    PublishInput {
        repo_url: "gitlab.com?repo=repo&owner=owner".to_string(),
        title: "Create my new MR".to_string(),
        branch_name: "new-mr".to_string(),
        description: "This MR is really good".to_string(),
        commit_action: commit_action.unwrap_or_default(),
        target_path: "source".to_string(),
        draft: true,
        remove_source_branch: false,
        assignee: None,
        token: None,
    }
}

/// Workspace with one file under `source/` and one under `irrelevant/`
pub fn make_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("source")).unwrap();
    fs::create_dir_all(dir.path().join("irrelevant")).unwrap();
    fs::write(dir.path().join("source/foo.txt"), "Hello there!").unwrap();
    fs::write(
        dir.path().join("irrelevant/bar.txt"),
        "Nothing to see here",
    )
    .unwrap();
    dir
}

/// Publisher whose factory hands out `mock` and records the credentials it saw
pub fn make_publisher(
    integrations: ScmIntegrations,
    mock: &Arc<MockGitLabClient>,
) -> (MergeRequestPublisher, Arc<Mutex<Vec<Credentials>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_factory = Arc::clone(&seen);
    let client = Arc::clone(mock);

    let publisher = MergeRequestPublisher::new(integrations, move |credentials| {
        seen_in_factory.lock().unwrap().push(credentials.clone());
        Ok(Arc::clone(&client) as Arc<dyn GitLabClient>)
    });

    (publisher, seen)
}
