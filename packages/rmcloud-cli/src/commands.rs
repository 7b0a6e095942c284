//! Command handlers.
//!
//! Each handler is one linear sequence of core calls. Collaborators are
//! passed in so the handlers can run against mock servers and temporary
//! token files.

use crate::cli::{Commands, LoginArgs, UploadArgs};
use anyhow::{Context, Result};
use rmcloud_core::{auth, upload, CloudClient, CredentialStore, MimeDetector};
use std::io::Write;

pub async fn dispatch(
    command: &Commands,
    client: &CloudClient,
    store: &dyn CredentialStore,
    detector: &dyn MimeDetector,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Login(args) => cmd_login(args, client, store).await,
        Commands::Token => cmd_token(client, store, out).await,
        Commands::Upload(args) => cmd_upload(args, client, store, detector).await,
    }
}

pub async fn cmd_login(
    args: &LoginArgs,
    client: &CloudClient,
    store: &dyn CredentialStore,
) -> Result<()> {
    auth::login(client, store, &args.code)
        .await
        .context("Failed to pair device")
}

pub async fn cmd_token(
    client: &CloudClient,
    store: &dyn CredentialStore,
    out: &mut dyn Write,
) -> Result<()> {
    let token = auth::user_token(client, store)
        .await
        .context("Failed to obtain user token")?;
    writeln!(out, "{}", token).context("Failed to write token")?;
    Ok(())
}

pub async fn cmd_upload(
    args: &UploadArgs,
    client: &CloudClient,
    store: &dyn CredentialStore,
    detector: &dyn MimeDetector,
) -> Result<()> {
    upload::upload_file(client, store, detector, &args.file)
        .await
        .with_context(|| format!("Failed to upload {}", args.file.display()))
}
