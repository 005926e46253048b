//! Auth command - test and explain authentication

use glmr::auth::ScmIntegrations;
use glmr::config::Config;
use glmr::error::Result;
use glmr::platform::create_client;
use std::env;
use std::path::Path;

/// Run the auth test command
pub async fn run_auth_test(host: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let host = host
        .map(String::from)
        .or_else(|| env::var("GITLAB_HOST").ok())
        .unwrap_or_else(|| "gitlab.com".to_string());

    println!("Testing GitLab authentication for {host}...");

    let config = Config::load_or_default(config_path)?;
    let integrations = ScmIntegrations::from_config_and_env(&config);
    let credentials = integrations.credentials_for(&host, None)?;
    let client = create_client(&credentials)?;
    let username = client.current_user().await?;

    println!("Authenticated as: {username}");
    println!("Token source: {:?}", credentials.source);
    println!("Web: {}", credentials.base_url);
    println!("API: {}", credentials.api_base_url);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    let config_path = Config::default_path().map_or_else(
        || "<config dir>/glmr/config.toml".to_string(),
        |p| p.display().to_string(),
    );

    println!("GitLab Authentication Setup");
    println!("===========================");
    println!();
    println!("Option 1: Config file ({config_path})");
    println!("  [[integrations.gitlab]]");
    println!("  host = \"gitlab.com\"");
    println!("  token = \"<personal access token with api scope>\"");
    println!();
    println!("  Add one entry per host. Self-hosted instances may set");
    println!("  api_base_url if the API is not at https://<host>/api/v4,");
    println!("  and base_url if the web UI is not at https://<host>.");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITLAB_TOKEN or GL_TOKEN");
    println!("  Set GITLAB_HOST for a self-hosted instance");
    println!();
    println!("Option 3: Per run");
    println!("  glmr publish --token <token> ...  (or GLMR_TOKEN)");
}
