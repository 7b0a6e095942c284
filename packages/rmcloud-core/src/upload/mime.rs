//! Content type detection.

use crate::error::{CloudError, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Something that can name the MIME type of raw file content.
pub trait MimeDetector {
    fn detect(&self, data: &[u8]) -> Result<String>;
}

/// Detects content type by piping the bytes through `file --brief --mime-type -`.
#[derive(Debug, Clone)]
pub struct FileCommandDetector {
    program: String,
}

impl FileCommandDetector {
    /// Use a different `file`-compatible executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FileCommandDetector {
    fn default() -> Self {
        Self::with_program("file")
    }
}

impl MimeDetector for FileCommandDetector {
    fn detect(&self, data: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["--brief", "--mime-type", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CloudError::MimeDetection(format!("failed to run {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // `file` stops reading once it has seen enough of the input
            if let Err(e) = stdin.write_all(data) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(CloudError::MimeDetection(format!(
                        "failed to write to {}: {}",
                        self.program, e
                    )));
                }
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            CloudError::MimeDetection(format!("{} did not finish: {}", self.program, e))
        })?;

        if !output.status.success() {
            return Err(CloudError::MimeDetection(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mime = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if mime.is_empty() {
            return Err(CloudError::MimeDetection(format!(
                "{} produced no output",
                self.program
            )));
        }

        tracing::debug!("Detected content type {}", mime);
        Ok(mime)
    }
}
