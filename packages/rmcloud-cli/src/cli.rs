use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rmcloud")]
#[command(version)]
#[command(about = "Pair a device with the reMarkable cloud and upload documents")]
#[command(long_about = "
rmcloud is a minimal client for the reMarkable cloud. It pairs this machine
as a device, derives short-lived user tokens and uploads documents to the
root of your document library.

Quick start:
  1. Get a one-time code from https://my.remarkable.com/#desktop
  2. Pair:    rmcloud login --code <code>
  3. Upload:  rmcloud upload --file report.pdf

The device token is stored as plain text in ./device-token.
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register this device using a one-time pairing code
    Login(LoginArgs),

    /// Print a freshly issued user token
    Token,

    /// Upload a file to the root of the document library
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Code generated via https://my.remarkable.com/#desktop
    #[arg(short, long)]
    pub code: String,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    #[arg(short, long)]
    pub file: PathBuf,
}
