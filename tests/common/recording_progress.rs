//! Progress callback that records what it was told

#![allow(dead_code)]

use async_trait::async_trait;
use glmr::publish::{Phase, ProgressCallback};
use glmr::types::{FileChange, MergeRequest};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingProgress {
    pub phases: Mutex<Vec<Phase>>,
    pub changes: Mutex<Vec<FileChange>>,
    pub merge_requests: Mutex<Vec<MergeRequest>>,
    pub warnings: Mutex<Vec<String>>,
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn on_changes(&self, changes: &[FileChange]) {
        self.changes.lock().unwrap().extend_from_slice(changes);
    }

    async fn on_merge_request(&self, mr: &MergeRequest) {
        self.merge_requests.lock().unwrap().push(mr.clone());
    }

    async fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
