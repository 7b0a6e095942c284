//! rmcloud Core Library
//!
//! This crate provides the functionality behind the `rmcloud` command:
//! - Device pairing (one-time code exchanged for a long-lived device token)
//! - User token issuance (short-lived, derived on every call)
//! - Document upload to the cloud document root
//! - Plaintext device token storage
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use rmcloud_core::{auth, cloud, upload};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> rmcloud_core::Result<()> {
//!     let config = cloud::load_endpoint_config();
//!     let client = cloud::CloudClient::with_config(&config);
//!     let store = auth::FileCredentialStore::new(&config.token_file);
//!
//!     // Pair this device using a code from the web app
//!     auth::login(&client, &store, "abcdefgh").await?;
//!
//!     // Upload a document to the root folder
//!     let detector = upload::FileCommandDetector::default();
//!     upload::upload_file(&client, &store, &detector, Path::new("report.pdf")).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cloud;
pub mod error;
pub mod upload;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use auth::{CredentialStore, FileCredentialStore};
pub use cloud::{CloudClient, ConfigSource, EndpointConfig};
pub use error::{CloudError, Result};
pub use upload::{FileCommandDetector, MimeDetector, UploadMetadata};
