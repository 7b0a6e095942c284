use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, CloudError>;

/// Every way a command can fail once its arguments have been parsed.
///
/// None of these are retried. They propagate to the process boundary and
/// end the invocation with a non-zero exit.
#[derive(Error, Debug)]
pub enum CloudError {
    /// The device token file does not exist; the device was never paired.
    #[error("no device token found at {path}; run `rmcloud login --code <code>` first")]
    MissingCredential { path: String },

    /// Non-2xx from the device registration or user token endpoint.
    #[error("authentication failed: {status} - {body}")]
    Auth { status: StatusCode, body: String },

    /// Non-2xx from the document upload endpoint.
    #[error("upload failed: {status} - {body}")]
    Upload { status: StatusCode, body: String },

    #[error("MIME type detection failed: {0}")]
    MimeDetection(String),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl CloudError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CloudError::Io {
            context: context.into(),
            source,
        }
    }

    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CloudError::Auth { status, .. } | CloudError::Upload { status, .. } => Some(*status),
            CloudError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_and_body() {
        let err = CloudError::Auth {
            status: StatusCode::UNAUTHORIZED,
            body: "invalid code".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: 401 Unauthorized - invalid code"
        );
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_missing_credential_has_no_status() {
        let err = CloudError::MissingCredential {
            path: "device-token".to_string(),
        };
        assert!(err.to_string().contains("device-token"));
        assert_eq!(err.status(), None);
    }
}
