//! rmcloud - minimal reMarkable cloud client
//!
//! This binary can:
//! - Pair this machine as a device using a one-time code
//! - Print a freshly issued user token
//! - Upload a document to the root of the cloud library

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use rmcloud_core::{cloud, CloudClient, FileCommandDetector, FileCredentialStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for `token` output
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("rmcloud={},rmcloud_core={}", log_level, log_level).into()
                }),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Config file: {}", cloud::config::get_config_file_path_string());

    let config = cloud::load_endpoint_config();
    let client = CloudClient::with_config(&config);
    let store = FileCredentialStore::new(&config.token_file);
    let detector = FileCommandDetector::default();

    commands::dispatch(
        &cli.command,
        &client,
        &store,
        &detector,
        &mut std::io::stdout(),
    )
    .await
}
