//! glmr - GitLab merge request publisher
//!
//! CLI binary that commits workspace files to a new branch and opens a merge request.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "glmr")]
#[command(about = "Publish workspace files to GitLab as a merge request")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/glmr/config.toml)
    #[arg(long, global = true, env = "GLMR_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit workspace files to a new branch and open a merge request
    Publish(cli::PublishArgs),

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication against a host
    Test {
        /// GitLab host (defaults to GITLAB_HOST or gitlab.com)
        #[arg(long)]
        host: Option<String>,
    },
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't interfere with JSON output on stdout.
    let default_level = if cli.verbose { "glmr=debug" } else { "glmr=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Publish(args) => {
            cli::run_publish(args, cli.config.as_deref()).await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test { host } => {
                cli::run_auth_test(host.as_deref(), cli.config.as_deref()).await?;
            }
            AuthAction::Setup => cli::run_auth_setup(),
        },
    }

    Ok(())
}
