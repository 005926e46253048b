//! glmr - publish workspace files to GitLab as a merge request
//!
//! Reads files staged in a local workspace directory, turns them into commit
//! actions (create/update/delete) and submits a branch, a commit and a merge
//! request through a [`platform::GitLabClient`].

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod publish;
pub mod types;
