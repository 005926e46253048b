//! Progress callback trait for interface-agnostic updates
//!
//! The CLI renders these as spinners; a host engine can forward them to its
//! own task log.

use crate::types::{FileChange, MergeRequest};
use async_trait::async_trait;
use std::fmt;

/// Publish phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Parsing the repo URL and resolving credentials
    Resolving,
    /// Reading files from the workspace
    Collecting,
    /// Creating the source branch
    CreatingBranch,
    /// Creating the commit
    Committing,
    /// Opening the merge request
    CreatingMergeRequest,
    /// Publish complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolving => "Resolving repository",
            Self::Collecting => "Collecting files",
            Self::CreatingBranch => "Creating branch",
            Self::Committing => "Committing changes",
            Self::CreatingMergeRequest => "Creating merge request",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the change list is known
    async fn on_changes(&self, changes: &[FileChange]);

    /// Called when the merge request is created
    async fn on_merge_request(&self, mr: &MergeRequest);

    /// Called for problems that do not abort the run
    async fn on_warning(&self, message: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_changes(&self, _changes: &[FileChange]) {}
    async fn on_merge_request(&self, _mr: &MergeRequest) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}
