use crate::auth::DEFAULT_TOKEN_FILE;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default host for device registration and user token issuance
pub const DEFAULT_AUTH_URL: &str = "https://webapp.cloud.remarkable.com";

/// Default host for the document API
pub const DEFAULT_DOCS_URL: &str = "https://web.cloud.remarkable.com";

/// Environment variable overriding the auth host
pub const ENV_AUTH_URL: &str = "RMCLOUD_AUTH_URL";

/// Environment variable overriding the document API host
pub const ENV_DOCS_URL: &str = "RMCLOUD_DOCS_URL";

/// Environment variable overriding the device token path
pub const ENV_TOKEN_FILE: &str = "RMCLOUD_TOKEN_FILE";

/// Configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    cloud: Option<CloudSection>,
    credentials: Option<CredentialsSection>,
}

#[derive(Debug, Deserialize, Default)]
struct CloudSection {
    /// Auth host (e.g., "https://webapp.cloud.remarkable.com")
    auth_url: Option<String>,
    /// Document API host (e.g., "https://web.cloud.remarkable.com")
    docs_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CredentialsSection {
    /// Path of the device token file; relative paths resolve against the working directory
    token_file: Option<String>,
}

/// Runtime endpoint configuration
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Base URL for the token endpoints
    pub auth_url: String,
    /// Base URL for the document endpoints
    pub docs_url: String,
    /// Device token file
    pub token_file: PathBuf,
    /// Highest-priority source that contributed a value
    pub source: ConfigSource,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            source: ConfigSource::Default,
        }
    }
}

/// Where the configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    /// Using default hardcoded values
    Default,
    /// Loaded from config file
    ConfigFile,
    /// Loaded from environment variable
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::ConfigFile => write!(f, "config file"),
            ConfigSource::Environment => write!(f, "environment variable"),
        }
    }
}

/// Get the path to the configuration file
fn get_config_file_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|p| p.join("rmcloud").join("config.toml"))
}

/// Parse configuration file content
pub fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}

/// Load configuration from the config file
fn load_config_file() -> Option<ConfigFile> {
    let path = get_config_file_path()?;

    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file {:?}: {}", path, e);
            None
        }
    }
}

fn normalize_url(url: &str) -> Option<String> {
    Some(url.trim().trim_end_matches('/').to_string()).filter(|u| !u.is_empty())
}

fn normalize_value(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Resolve each setting with priority:
/// 1. Environment variable (via `env`)
/// 2. Config file
/// 3. Default value
pub fn resolve_config<F>(env: F, file: Option<ConfigFile>) -> EndpointConfig
where
    F: Fn(&str) -> Option<String>,
{
    let file = file.unwrap_or_default();
    let cloud = file.cloud.unwrap_or_default();
    let credentials = file.credentials.unwrap_or_default();

    let mut config = EndpointConfig::default();

    let mut pick = |env_key: &str,
                    from_file: Option<String>,
                    normalize: fn(&str) -> Option<String>| {
        if let Some(v) = env(env_key).as_deref().and_then(normalize) {
            config.source = config.source.max(ConfigSource::Environment);
            return Some(v);
        }
        if let Some(v) = from_file.as_deref().and_then(normalize) {
            config.source = config.source.max(ConfigSource::ConfigFile);
            return Some(v);
        }
        None
    };

    let auth_url = pick(ENV_AUTH_URL, cloud.auth_url, normalize_url);
    let docs_url = pick(ENV_DOCS_URL, cloud.docs_url, normalize_url);
    let token_file = pick(ENV_TOKEN_FILE, credentials.token_file, normalize_value);

    if let Some(url) = auth_url {
        config.auth_url = url;
    }
    if let Some(url) = docs_url {
        config.docs_url = url;
    }
    if let Some(path) = token_file {
        config.token_file = PathBuf::from(path);
    }

    config
}

/// Load endpoint configuration from the environment and
/// `~/.config/rmcloud/config.toml`, falling back to the public service.
pub fn load_endpoint_config() -> EndpointConfig {
    let config = resolve_config(|key| std::env::var(key).ok(), load_config_file());

    tracing::debug!(
        "Using auth host {}, document host {}, token file {:?} (from {})",
        config.auth_url,
        config.docs_url,
        config.token_file,
        config.source
    );

    config
}

/// Get the path to the config file for documentation purposes
pub fn get_config_file_path_string() -> String {
    get_config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/rmcloud/config.toml".to_string())
}
