//! Phase 1: Workspace collection
//!
//! Finds the files staged under the target directory and turns them into
//! commit actions.

use crate::error::{Error, Result};
use crate::types::{CommitAction, FileChange};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use glob::MatchOptions;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A file found in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFile {
    /// Path inside the repository, relative to the workspace root, `/`-separated
    pub repo_path: String,
    /// Location on disk
    pub local_path: PathBuf,
}

/// Resolve `target_path` inside `workspace`
///
/// Empty and `.` mean the workspace root. Absolute paths and `..` are rejected.
pub fn resolve_target_dir(workspace: &Path, target_path: &str) -> Result<PathBuf> {
    let target = Path::new(target_path);
    let mut resolved = workspace.to_path_buf();

    for component in target.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidInput(format!(
                    "target path {target_path} must be relative and stay inside the workspace"
                )));
            }
        }
    }

    Ok(resolved)
}

/// List every file under `workspace/target_path`, recursively
///
/// Dot-files are included; anything inside a `.git` directory is not.
/// A missing target directory yields no files, a missing workspace is an
/// error. Results are sorted by `repo_path`.
///
/// This walks the filesystem synchronously; async callers should run it on
/// the blocking pool.
pub fn collect_files(workspace: &Path, target_path: &str) -> Result<Vec<WorkspaceFile>> {
    // glob drops a leading `./` from its matches, so relative workspaces
    // would never strip cleanly.
    let workspace = workspace.canonicalize().map_err(|e| {
        Error::InvalidInput(format!("workspace {} is not usable: {e}", workspace.display()))
    })?;
    let workspace = workspace.as_path();
    let root = resolve_target_dir(workspace, target_path)?;
    let root_str = root.to_str().ok_or_else(|| {
        Error::InvalidInput(format!("path {} is not valid UTF-8", root.display()))
    })?;

    let pattern = format!("{}/**/*", glob::Pattern::escape(root_str));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(&pattern, options)
        .map_err(|e| Error::Internal(format!("invalid glob pattern {pattern}: {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let local_path = entry.map_err(glob::GlobError::into_error)?;
        if !local_path.is_file() {
            continue;
        }

        let Some(repo_path) = repo_relative_path(workspace, &local_path) else {
            continue;
        };
        if repo_path.split('/').any(|part| part == ".git") {
            continue;
        }

        debug!(path = %repo_path, "found workspace file");
        files.push(WorkspaceFile {
            repo_path,
            local_path,
        });
    }

    files.sort_by(|a, b| a.repo_path.cmp(&b.repo_path));
    Ok(files)
}

fn repo_relative_path(workspace: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(workspace).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Build one change per file
///
/// Deletes never read the file. Non-UTF-8 content is sent base64-encoded.
pub async fn build_changes(
    files: &[WorkspaceFile],
    action: CommitAction,
) -> Result<Vec<FileChange>> {
    let mut changes = Vec::with_capacity(files.len());

    for file in files {
        if action == CommitAction::Delete {
            changes.push(FileChange::delete(&file.repo_path));
            continue;
        }

        let bytes = tokio::fs::read(&file.local_path).await?;
        let change = match String::from_utf8(bytes) {
            Ok(text) => FileChange::text(action, &file.repo_path, text),
            Err(e) => {
                debug!(path = %file.repo_path, "binary file, using base64");
                FileChange::base64(action, &file.repo_path, BASE64.encode(e.into_bytes()))
            }
        };
        changes.push(change);
    }

    Ok(changes)
}
