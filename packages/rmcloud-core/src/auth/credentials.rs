//! Device token storage.
//!
//! The device token is kept as plain text in a single file, `device-token`
//! in the working directory unless configured otherwise. Nothing else is
//! persisted between runs.

use crate::error::{CloudError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default location of the device token, relative to the working directory
pub const DEFAULT_TOKEN_FILE: &str = "device-token";

/// Read/write access to the persisted device token.
pub trait CredentialStore {
    /// Overwrite the stored token with the trimmed `token`.
    fn save(&self, token: &str) -> Result<()>;

    /// Return the stored token with surrounding whitespace removed.
    ///
    /// Fails with [`CloudError::MissingCredential`] when nothing was saved.
    fn load(&self) -> Result<String>;

    /// Where the token lives, for log lines and error messages.
    fn location(&self) -> String;
}

/// Plaintext file-backed [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FILE)
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();

        // Owner read/write only; contents stay plain text
        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(|e| CloudError::io(format!("Failed to open {}", self.location()), e))?;
            file.write_all(token.as_bytes())
                .map_err(|e| CloudError::io(format!("Failed to write {}", self.location()), e))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, token)
                .map_err(|e| CloudError::io(format!("Failed to write {}", self.location()), e))?;
        }

        tracing::debug!("Device token saved to {:?}", self.path);
        Ok(())
    }

    fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                tracing::debug!("Device token loaded from {:?}", self.path);
                Ok(content.trim().to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CloudError::MissingCredential {
                path: self.location(),
            }),
            Err(e) => Err(CloudError::io(
                format!("Failed to read {}", self.location()),
                e,
            )),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_trims_and_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join(DEFAULT_TOKEN_FILE));

        store.save("  dtok-1\n").unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "dtok-1");
        assert_eq!(store.load().unwrap(), "dtok-1");
    }

    #[test]
    fn test_save_overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join(DEFAULT_TOKEN_FILE));

        store.save("a-much-longer-first-token").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.load().unwrap(), "second");
    }

    #[test]
    fn test_load_strips_whitespace_written_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TOKEN_FILE);
        fs::write(&path, "\n  dtok-2  \r\n").unwrap();

        assert_eq!(FileCredentialStore::new(path).load().unwrap(), "dtok-2");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("absent"));

        match store.load() {
            Err(CloudError::MissingCredential { path }) => assert!(path.ends_with("absent")),
            other => panic!("expected MissingCredential, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            FileCredentialStore::default().path(),
            Path::new(DEFAULT_TOKEN_FILE)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join(DEFAULT_TOKEN_FILE));
        store.save("dtok").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
