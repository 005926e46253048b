//! GitLab REST client

use crate::error::{Error, Result};
use crate::platform::GitLabClient;
use crate::types::{FileChange, MergeRequest, MergeRequestOptions};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base_url: String,
}

#[derive(Deserialize)]
struct Project {
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct User {
    id: u64,
    username: String,
}

#[derive(Serialize)]
struct CreateBranchPayload<'a> {
    branch: &'a str,
    #[serde(rename = "ref")]
    reference: &'a str,
}

#[derive(Serialize)]
struct CreateCommitPayload<'a> {
    branch: &'a str,
    commit_message: &'a str,
    actions: &'a [FileChange],
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    description: &'a str,
    remove_source_branch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a new GitLab service for an API root like `https://gitlab.com/api/v4`
    pub fn new(token: String, api_base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    fn project_url(&self, project: &str, path: &str) -> String {
        self.api_url(&format!(
            "/projects/{}{}",
            urlencoding::encode(project),
            path
        ))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("PRIVATE-TOKEN", &self.token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authed(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::GitLabApi(format!("{status}: {}", body.trim())))
    }
}

#[async_trait]
impl GitLabClient for GitLabService {
    async fn default_branch(&self, project: &str) -> Result<String> {
        let url = self.project_url(project, "");
        debug!(%url, "fetching project");

        let project_info: Project = self.send(self.client.get(&url)).await?.json().await?;

        project_info
            .default_branch
            .ok_or_else(|| Error::GitLabApi(format!("project {project} has no default branch")))
    }

    async fn create_branch(&self, project: &str, branch: &str, reference: &str) -> Result<()> {
        let url = self.project_url(project, "/repository/branches");
        info!(project, branch, reference, "creating branch");

        self.send(self.client.post(&url).json(&CreateBranchPayload {
            branch,
            reference,
        }))
        .await?;

        Ok(())
    }

    async fn create_commit(
        &self,
        project: &str,
        branch: &str,
        message: &str,
        changes: &[FileChange],
    ) -> Result<()> {
        let url = self.project_url(project, "/repository/commits");
        info!(project, branch, actions = changes.len(), "creating commit");

        self.send(self.client.post(&url).json(&CreateCommitPayload {
            branch,
            commit_message: message,
            actions: changes,
        }))
        .await?;

        Ok(())
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<u64>> {
        let url = self.api_url("/users");

        let users: Vec<User> = self
            .send(self.client.get(&url).query(&[("username", username)]))
            .await?
            .json()
            .await?;

        Ok(users
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .map(|u| u.id))
    }

    async fn create_merge_request(
        &self,
        project: &str,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        options: &MergeRequestOptions,
    ) -> Result<MergeRequest> {
        let url = self.project_url(project, "/merge_requests");
        info!(project, source_branch, target_branch, "creating merge request");

        let payload = CreateMrPayload {
            source_branch,
            target_branch,
            title,
            description: &options.description,
            remove_source_branch: options.remove_source_branch,
            assignee_id: options.assignee_id,
        };

        let mr: MergeRequest = self
            .send(self.client.post(&url).json(&payload))
            .await?
            .json()
            .await?;

        Ok(mr)
    }

    async fn current_user(&self) -> Result<String> {
        let url = self.api_url("/user");

        let user: User = self.send(self.client.get(&url)).await?.json().await?;

        Ok(user.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitAction;

    #[test]
    fn test_project_url_encodes_nested_path() {
        let service = GitLabService::new("t".into(), "https://gitlab.com/api/v4/".into());
        assert_eq!(
            service.project_url("group/sub/proj", "/repository/commits"),
            "https://gitlab.com/api/v4/projects/group%2Fsub%2Fproj/repository/commits"
        );
    }

    #[test]
    fn test_commit_payload_shape() {
        let changes = vec![
            FileChange::text(CommitAction::Create, "source/foo.txt", "hello"),
            FileChange::delete("source/old.txt"),
        ];
        let payload = CreateCommitPayload {
            branch: "new-mr",
            commit_message: "Create my new MR",
            actions: &changes,
        };

        insta::assert_yaml_snapshot!(payload, @r###"
        branch: new-mr
        commit_message: Create my new MR
        actions:
          - action: create
            file_path: source/foo.txt
            content: hello
          - action: delete
            file_path: source/old.txt
        "###);
    }
}
