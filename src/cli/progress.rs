//! CLI progress callback with spinners
//!
//! Everything is drawn on stderr; stdout is reserved for the result.

use crate::cli::style::{Stylize, arrow, check, spinner_style};
use anstream::eprintln;
use async_trait::async_trait;
use glmr::publish::{Phase, ProgressCallback};
use glmr::types::{FileChange, MergeRequest};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Most files listed before the rest is summarized
const MAX_LISTED_FILES: usize = 20;

/// Spinner-per-phase progress output
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create progress output with no active spinner
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Stop the current spinner, leaving a checkmark line behind
    pub fn finish(&self) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        if let Some(spinner) = guard.take() {
            let msg = spinner.message();
            spinner.finish_and_clear();
            eprintln!("{} {}", check().for_stderr(), msg);
        }
    }

    /// Stop the current spinner without marking it done
    pub fn abandon(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut guard| guard.take()) {
            spinner.finish_and_clear();
        }
    }

    fn suspend(&self, f: impl FnOnce()) {
        match self.spinner.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(spinner) => spinner.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        self.finish();
        if phase == Phase::Complete {
            return;
        }

        let spinner = ProgressBar::new_spinner()
            .with_style(spinner_style())
            .with_message(phase.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    async fn on_changes(&self, changes: &[FileChange]) {
        self.suspend(|| {
            if changes.is_empty() {
                eprintln!("  {}", "no files found".muted());
                return;
            }
            for change in changes.iter().take(MAX_LISTED_FILES) {
                eprintln!(
                    "  {} {} {}",
                    arrow().for_stderr(),
                    change.action.muted().for_stderr(),
                    change.file_path.accent().for_stderr()
                );
            }
            if changes.len() > MAX_LISTED_FILES {
                eprintln!(
                    "  {}",
                    format!("... and {} more", changes.len() - MAX_LISTED_FILES).muted()
                );
            }
        });
    }

    async fn on_merge_request(&self, mr: &MergeRequest) {
        let iid = format!("!{}", mr.iid);
        self.suspend(|| {
            eprintln!(
                "  {} opened {} into {}",
                arrow().for_stderr(),
                iid.accent().for_stderr(),
                mr.target_branch.accent().for_stderr()
            );
        });
    }

    async fn on_warning(&self, message: &str) {
        self.suspend(|| eprintln!("{}: {}", "warning".warn(), message));
    }

    async fn on_message(&self, message: &str) {
        self.suspend(|| eprintln!("{}", message.muted().for_stderr()));
    }
}
