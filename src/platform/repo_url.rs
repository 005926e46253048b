//! Repository reference parsing
//!
//! Repo URLs come from the host engine in query form:
//! `gitlab.example.com?owner=group/sub&repo=project`.

use crate::error::{Error, Result};
use crate::types::RepoRef;
use url::Url;

/// Parse a query-style repo URL into host, owner and repo
pub fn parse_repo_url(repo_url: &str) -> Result<RepoRef> {
    let trimmed = repo_url.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("repo URL is empty".to_string()));
    }

    // Scheme is optional; url needs one to find the host.
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| Error::InvalidInput(format!("cannot parse repo URL {repo_url}: {e}")))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::InvalidInput(format!("repo URL {repo_url} has no host")))?;

    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let mut owner = None;
    let mut repo = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "owner" => owner = Some(value.into_owned()),
            "repo" => repo = Some(value.into_owned()),
            _ => {}
        }
    }

    let owner = owner
        .map(|o| o.trim_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .ok_or_else(|| {
            Error::InvalidInput(format!("invalid repo URL {repo_url}, missing owner"))
        })?;
    let repo = repo.filter(|r| !r.is_empty()).ok_or_else(|| {
        Error::InvalidInput(format!("invalid repo URL {repo_url}, missing repo"))
    })?;

    Ok(RepoRef { host, owner, repo })
}
