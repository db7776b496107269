mod commands;
mod config;
mod display;
mod error;
mod github;

use clap::Parser;
use config::TOKEN_ENV;
use github::GithubClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "orgrepos",
    version,
    about = "List repositories for one or all of your GitHub organizations"
)]
pub struct Cli {
    /// Name of the organization (all organizations when omitted)
    #[arg(long)]
    organization: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Show debug output on stderr
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    // octocrab logs its own request failures; those are already reported as warnings.
    let default_level = if verbose { "debug" } else { "warn,octocrab=off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: &Cli) -> error::Result<bool> {
    let config = config::load_config()?;
    let credential = config::resolve_credential(std::env::var(TOKEN_ENV).ok(), &config);
    if credential.is_none() {
        display::warn(&format!(
            "GitHub access token not found. Please set the {TOKEN_ENV} environment variable."
        ));
    }

    let client = GithubClient::new(credential.as_ref(), &config)?;
    tracing::debug!(base_url = config.base_url(), "client ready");

    commands::repos::run(&client, commands::selector(&cli.organization), cli.json).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            display::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
