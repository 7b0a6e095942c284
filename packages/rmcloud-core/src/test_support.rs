//! Shared test doubles.

use crate::auth::CredentialStore;
use crate::cloud::{CloudClient, EndpointConfig};
use crate::error::{CloudError, Result};
use crate::upload::MimeDetector;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

/// Client pointing both hosts at `server`
pub fn client_for(server: &MockServer) -> CloudClient {
    client_at(server.uri())
}

fn client_at(uri: String) -> CloudClient {
    CloudClient::with_config(&EndpointConfig {
        auth_url: uri.clone(),
        docs_url: uri,
        ..EndpointConfig::default()
    })
}

/// Client whose server answers every request with a 200 that promises a
/// 100 byte body, sends 4 bytes and hangs up
pub async fn truncated_body_server() -> CloudClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\ndtok")
                .await;
            let _ = socket.shutdown().await;
        }
    });

    client_at(format!("http://{}", addr))
}

/// Consume headers and a Content-Length body so closing doesn't reset the connection
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let body_len = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + body_len {
            return;
        }
    }
}

/// In-memory credential store
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.trim().to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self) -> Result<String> {
        self.token
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CloudError::MissingCredential {
                path: self.location(),
            })
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Detector returning a fixed MIME type
pub struct StaticMime(pub &'static str);

impl MimeDetector for StaticMime {
    fn detect(&self, _data: &[u8]) -> Result<String> {
        Ok(self.0.to_string())
    }
}
