//! Publish command - commit workspace files and open a merge request

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stream, Stylize, arrow, check, hyperlink_url};
use anstream::println;
use clap::Args;
use glmr::auth::ScmIntegrations;
use glmr::config::Config;
use glmr::error::{Error, Result};
use glmr::publish::{MergeRequestPublisher, PublishPlan, create_publish_plan};
use glmr::types::{CommitAction, MergeRequestResult, PublishInput};
use std::path::{Path, PathBuf};

/// Arguments of `glmr publish`
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Read the action input from a JSON file instead of flags
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Repository, e.g. `gitlab.com?owner=group&repo=project`
    #[arg(long, required_unless_present = "input")]
    repo_url: Option<String>,

    /// Merge request title (also the commit message)
    #[arg(long, required_unless_present = "input")]
    title: Option<String>,

    /// Branch to create
    #[arg(long, required_unless_present = "input")]
    branch_name: Option<String>,

    /// Merge request description
    #[arg(long, default_value = "")]
    description: String,

    /// Action applied to every file: create, update or delete
    #[arg(long, default_value_t = CommitAction::Create)]
    commit_action: CommitAction,

    /// Workspace subdirectory to commit
    #[arg(long, default_value = "")]
    target_path: String,

    /// Open the merge request as a draft
    #[arg(long)]
    draft: bool,

    /// Delete the source branch once merged
    #[arg(long)]
    remove_source_branch: bool,

    /// Username to assign the merge request to
    #[arg(long)]
    assignee: Option<String>,

    /// Token overriding the configured one
    #[arg(long, env = "GLMR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Workspace directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Show what would be committed without contacting GitLab
    #[arg(long)]
    dry_run: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl PublishArgs {
    fn into_input(self) -> Result<PublishInput> {
        if let Some(path) = &self.input {
            let content = std::fs::read_to_string(path)?;
            let mut input: PublishInput = serde_json::from_str(&content)?;
            if input.token.is_none() {
                input.token = self.token;
            }
            return Ok(input);
        }

        let missing = |flag: &str| Error::InvalidInput(format!("--{flag} is required"));
        Ok(PublishInput {
            repo_url: self.repo_url.ok_or_else(|| missing("repo-url"))?,
            title: self.title.ok_or_else(|| missing("title"))?,
            branch_name: self.branch_name.ok_or_else(|| missing("branch-name"))?,
            description: self.description,
            commit_action: self.commit_action,
            target_path: self.target_path,
            draft: self.draft,
            remove_source_branch: self.remove_source_branch,
            assignee: self.assignee,
            token: self.token,
        })
    }
}

/// Run the publish command
pub async fn run_publish(args: PublishArgs, config_path: Option<&Path>) -> Result<()> {
    let workspace = args.workspace.clone();
    let (dry_run, json) = (args.dry_run, args.json);
    let input = args.into_input()?;

    if dry_run {
        let plan = create_publish_plan(&input, &workspace).await?;
        print_plan(&plan, json)?;
        return Ok(());
    }

    let config = Config::load_or_default(config_path)?;
    let integrations = ScmIntegrations::from_config_and_env(&config);
    let publisher = MergeRequestPublisher::with_default_client(integrations);

    let progress = CliProgress::new();
    let result = publisher.execute(&input, &workspace, &progress).await;
    progress.abandon();
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &MergeRequestResult) {
    println!();
    println!(
        "{} Created merge request {} in {}",
        check(),
        format!("!{}", result.merge_request_number).accent(),
        result.project_path.emphasis()
    );
    println!(
        "  {}",
        hyperlink_url(Stream::Stdout, &result.merge_request_url)
    );
}

fn print_plan(plan: &PublishPlan, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    let commit = &plan.commit;
    println!("{}", "Dry run - no changes will be made".muted());
    println!(
        "Would create branch {} in {}",
        commit.branch.accent(),
        commit.project.emphasis()
    );
    println!(
        "Would commit {} file{} ({})",
        commit.changes.len(),
        if commit.changes.len() == 1 { "" } else { "s" },
        commit.message.muted()
    );
    for change in &commit.changes {
        println!(
            "  {} {} {}",
            arrow(),
            change.action.muted(),
            change.file_path.accent()
        );
    }
    println!(
        "Would open merge request {}",
        plan.merge_request_title.emphasis()
    );
    Ok(())
}
