use super::config::EndpointConfig;
use crate::error::{CloudError, Result};
use crate::upload::UploadMetadata;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;

/// Device description reported at registration
pub const DEVICE_DESC: &str = "desktop-linux";

/// Header carrying base64-encoded JSON [`UploadMetadata`]
pub const META_HEADER: &str = "Rm-Meta";

const DEVICE_NEW_PATH: &str = "/token/json/2/device/new";
const USER_NEW_PATH: &str = "/token/json/2/user/new";
const FILES_PATH: &str = "/doc/v2/files";

/// HTTP client for the token and document endpoints.
///
/// No timeout is configured and nothing is retried: each call is a single
/// request/response pair and any non-2xx answer is returned as an error.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    auth_url: String,
    docs_url: String,
}

impl CloudClient {
    pub fn with_config(config: &EndpointConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: config.auth_url.clone(),
            docs_url: config.docs_url.clone(),
        }
    }

    /// Exchange a pairing code for a device token.
    ///
    /// A fresh device ID is generated for every call. The trimmed response
    /// body is the token; persisting it is left to the caller.
    pub async fn register_device(&self, pairing_code: &str) -> Result<String> {
        let url = format!("{}{}", self.auth_url, DEVICE_NEW_PATH);

        let payload = DeviceRegistration {
            code: pairing_code.to_string(),
            device_id: uuid::Uuid::new_v4().to_string(),
            device_desc: DEVICE_DESC.to_string(),
        };

        tracing::debug!("Registering device {} at {}", payload.device_id, url);

        let resp = self.http.post(&url).json(&payload).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Device registration failed: {} - {}", status, body);
            return Err(CloudError::Auth { status, body });
        }

        let body = resp.text().await?;
        Ok(body.trim().to_string())
    }

    /// Derive a short-lived user token from the device token.
    ///
    /// Always performs a request; the result is never cached.
    pub async fn issue_user_token(&self, device_token: &str) -> Result<String> {
        let url = format!("{}{}", self.auth_url, USER_NEW_PATH);

        tracing::debug!("Requesting user token from {}", url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(device_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("User token request failed: {} - {}", status, body);
            return Err(CloudError::Auth { status, body });
        }

        let body = resp.text().await?;
        Ok(body.trim().to_string())
    }

    /// Upload raw document bytes into the folder named by `metadata`.
    ///
    /// `content` is sent unchanged with `content_type` as its Content-Type.
    /// The response body of a 2xx answer is ignored.
    pub async fn upload_document(
        &self,
        user_token: &str,
        metadata: &UploadMetadata,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        let url = format!("{}{}", self.docs_url, FILES_PATH);

        let content_type = HeaderValue::from_str(content_type)
            .map_err(|_| CloudError::InvalidHeader(format!("Content-Type {:?}", content_type)))?;
        let meta = HeaderValue::from_str(&metadata.to_header_value()?)
            .map_err(|_| CloudError::InvalidHeader(META_HEADER.to_string()))?;

        tracing::info!(
            "Uploading {} ({} bytes, {:?})",
            metadata.file_name,
            content.len(),
            content_type
        );

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .bearer_auth(user_token)
            .header(META_HEADER, meta)
            .body(content)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Upload failed: {} - {}", status, body);
            return Err(CloudError::Upload { status, body });
        }

        tracing::info!("{} uploaded successfully", metadata.file_name);
        Ok(())
    }
}

/// Body of the device registration request
#[derive(Debug, Serialize)]
struct DeviceRegistration {
    code: String,
    #[serde(rename = "deviceID")]
    device_id: String,
    #[serde(rename = "deviceDesc")]
    device_desc: String,
}
