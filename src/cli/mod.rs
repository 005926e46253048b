//! CLI commands
//!
//! Command implementations for the `glmr` binary.

mod auth;
mod progress;
mod publish;
mod style;

pub use auth::{run_auth_setup, run_auth_test};
pub use publish::{PublishArgs, run_publish};
