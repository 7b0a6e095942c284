//! Document upload.
//!
//! Uploads always land in the document root. The whole file is read into
//! memory before sending.

mod mime;

pub use mime::{FileCommandDetector, MimeDetector};

use crate::auth::{self, CredentialStore};
use crate::cloud::CloudClient;
use crate::error::{CloudError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::path::Path;

/// Metadata sent alongside an upload in the `Rm-Meta` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadMetadata {
    /// Target folder ID; empty means the root
    pub parent: String,
    pub file_name: String,
}

impl UploadMetadata {
    /// Metadata for uploading `path` to the root folder, named by its basename.
    pub fn for_path(path: &Path) -> Self {
        Self {
            parent: String::new(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Base64 of the compact JSON encoding.
    ///
    /// Non-ASCII file names are written as raw UTF-8 rather than `\uXXXX`
    /// escapes. Both decode to the same JSON value and the payload is
    /// base64, so the header stays ASCII either way.
    pub fn to_header_value(&self) -> Result<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| CloudError::InvalidHeader(format!("upload metadata: {}", e)))?;
        Ok(STANDARD.encode(json))
    }
}

/// Upload the file at `path` to the document root.
///
/// The file is read and its type detected before the user token is derived.
pub async fn upload_file(
    client: &CloudClient,
    store: &dyn CredentialStore,
    detector: &dyn MimeDetector,
    path: &Path,
) -> Result<()> {
    let data = std::fs::read(path)
        .map_err(|e| CloudError::io(format!("Failed to read {}", path.display()), e))?;

    let content_type = detector.detect(&data)?;
    let metadata = UploadMetadata::for_path(path);

    let user_token = auth::user_token(client, store).await?;

    client
        .upload_document(&user_token, &metadata, &content_type, data)
        .await
}
