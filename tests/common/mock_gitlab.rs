//! Mock GitLab client for testing

#![allow(dead_code)]

use async_trait::async_trait;
use glmr::error::{Error, Result};
use glmr::platform::GitLabClient;
use glmr::types::{FileChange, MergeRequest, MergeRequestOptions};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub project: String,
    pub branch: String,
    pub reference: String,
}

/// Call record for `create_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommitCall {
    pub project: String,
    pub branch: String,
    pub message: String,
    pub changes: Vec<FileChange>,
}

/// Call record for `create_merge_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMrCall {
    pub project: String,
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub options: MergeRequestOptions,
}

/// Mock GitLab client
///
/// Hand-written rather than mockall so calls can be inspected in order.
///
/// Features:
/// - Auto-incrementing MR numbers
/// - Call tracking for verification
/// - Known users for assignee lookup
/// - Error injection per operation
pub struct MockGitLabClient {
    default_branch: String,
    next_iid: AtomicU64,
    users: Mutex<HashMap<String, u64>>,
    // Call tracking
    operations: Mutex<Vec<&'static str>>,
    branch_calls: Mutex<Vec<CreateBranchCall>>,
    commit_calls: Mutex<Vec<CreateCommitCall>>,
    mr_calls: Mutex<Vec<CreateMrCall>>,
    user_lookups: Mutex<Vec<String>>,
    // Error injection
    error_on_project: Mutex<Option<String>>,
    error_on_branch: Mutex<Option<String>>,
    error_on_commit: Mutex<Option<String>>,
    error_on_mr: Mutex<Option<String>>,
    error_on_user: Mutex<Option<String>>,
}

impl Default for MockGitLabClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitLabClient {
    /// Mock whose projects default to `main`
    pub fn new() -> Self {
        Self::with_default_branch("main")
    }

    /// Mock with a specific default branch
    pub fn with_default_branch(branch: &str) -> Self {
        Self {
            default_branch: branch.to_string(),
            next_iid: AtomicU64::new(1),
            users: Mutex::new(HashMap::new()),
            operations: Mutex::new(Vec::new()),
            branch_calls: Mutex::new(Vec::new()),
            commit_calls: Mutex::new(Vec::new()),
            mr_calls: Mutex::new(Vec::new()),
            user_lookups: Mutex::new(Vec::new()),
            error_on_project: Mutex::new(None),
            error_on_branch: Mutex::new(None),
            error_on_commit: Mutex::new(None),
            error_on_mr: Mutex::new(None),
            error_on_user: Mutex::new(None),
        }
    }

    /// Register a user for assignee lookup
    pub fn add_user(&self, username: &str, id: u64) {
        self.users.lock().unwrap().insert(username.to_string(), id);
    }

    // === Error injection methods ===

    pub fn fail_project(&self, msg: &str) {
        *self.error_on_project.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_branch(&self, msg: &str) {
        *self.error_on_branch.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_commit(&self, msg: &str) {
        *self.error_on_commit.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_merge_request(&self, msg: &str) {
        *self.error_on_mr.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_user_lookup(&self, msg: &str) {
        *self.error_on_user.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Operation names in call order
    pub fn operations(&self) -> Vec<&'static str> {
        self.operations.lock().unwrap().clone()
    }

    pub fn branch_calls(&self) -> Vec<CreateBranchCall> {
        self.branch_calls.lock().unwrap().clone()
    }

    pub fn commit_calls(&self) -> Vec<CreateCommitCall> {
        self.commit_calls.lock().unwrap().clone()
    }

    pub fn mr_calls(&self) -> Vec<CreateMrCall> {
        self.mr_calls.lock().unwrap().clone()
    }

    pub fn user_lookups(&self) -> Vec<String> {
        self.user_lookups.lock().unwrap().clone()
    }

    /// Assert that `create_commit` was called exactly once with these arguments
    pub fn assert_commit_called_with(
        &self,
        project: &str,
        branch: &str,
        message: &str,
        changes: &[FileChange],
    ) {
        let calls = self.commit_calls();
        assert_eq!(
            calls,
            vec![CreateCommitCall {
                project: project.to_string(),
                branch: branch.to_string(),
                message: message.to_string(),
                changes: changes.to_vec(),
            }]
        );
    }

    fn record(&self, op: &'static str) {
        self.operations.lock().unwrap().push(op);
    }

    fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
        match slot.lock().unwrap().as_ref() {
            Some(msg) => Err(Error::GitLabApi(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitLabClient for MockGitLabClient {
    async fn default_branch(&self, _project: &str) -> Result<String> {
        self.record("default_branch");
        Self::injected(&self.error_on_project)?;
        Ok(self.default_branch.clone())
    }

    async fn create_branch(&self, project: &str, branch: &str, reference: &str) -> Result<()> {
        self.record("create_branch");
        self.branch_calls.lock().unwrap().push(CreateBranchCall {
            project: project.to_string(),
            branch: branch.to_string(),
            reference: reference.to_string(),
        });
        Self::injected(&self.error_on_branch)
    }

    async fn create_commit(
        &self,
        project: &str,
        branch: &str,
        message: &str,
        changes: &[FileChange],
    ) -> Result<()> {
        self.record("create_commit");
        self.commit_calls.lock().unwrap().push(CreateCommitCall {
            project: project.to_string(),
            branch: branch.to_string(),
            message: message.to_string(),
            changes: changes.to_vec(),
        });
        Self::injected(&self.error_on_commit)
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<u64>> {
        self.record("find_user_id");
        self.user_lookups.lock().unwrap().push(username.to_string());
        Self::injected(&self.error_on_user)?;
        Ok(self.users.lock().unwrap().get(username).copied())
    }

    async fn create_merge_request(
        &self,
        project: &str,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        options: &MergeRequestOptions,
    ) -> Result<MergeRequest> {
        self.record("create_merge_request");
        self.mr_calls.lock().unwrap().push(CreateMrCall {
            project: project.to_string(),
            source_branch: source_branch.to_string(),
            target_branch: target_branch.to_string(),
            title: title.to_string(),
            options: options.clone(),
        });
        Self::injected(&self.error_on_mr)?;

        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        Ok(MergeRequest {
            iid,
            web_url: format!("https://gitlab.com/{project}/-/merge_requests/{iid}"),
            source_branch: source_branch.to_string(),
            target_branch: target_branch.to_string(),
            title: title.to_string(),
        })
    }

    async fn current_user(&self) -> Result<String> {
        self.record("current_user");
        Ok("mock-user".to_string())
    }
}
