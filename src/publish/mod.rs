//! Three-phase publish engine
//!
//! 1. Collection - find the staged files and build commit actions
//! 2. Planning - assemble the commit and merge request to create
//! 3. Execution - create branch, commit and merge request on GitLab

mod execute;
mod plan;
mod progress;
mod workspace;

pub use execute::{MergeRequestPublisher, execute_plan};
pub use plan::{PublishPlan, create_publish_plan, merge_request_title};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use workspace::{WorkspaceFile, build_changes, collect_files, resolve_target_dir};
