use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::Credentials;

const APP_NAME: &str = "gfycat-client";
const CONFIG_FILE: &str = "config.json";

/// Gfycat API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoints {
    /// Resource collection: POST to create, GET `{gfycats}/{gfyname}` to query
    #[serde(default = "default_gfycats")]
    pub gfycats: String,
    /// Multipart file drop for local uploads
    #[serde(default = "default_file_drop")]
    pub file_drop: String,
    /// Encode status prefix, the gfyname is appended directly
    #[serde(default = "default_upload_status")]
    pub upload_status: String,
    /// OAuth token exchange
    #[serde(default = "default_oauth_token")]
    pub oauth_token: String,
}

fn default_gfycats() -> String {
    "https://api.gfycat.com/v1/gfycats".to_string()
}

fn default_file_drop() -> String {
    "https://filedrop.gfycat.com".to_string()
}

fn default_upload_status() -> String {
    "https://api.gfycat.com/v1/gfycats/fetch/status/".to_string()
}

fn default_oauth_token() -> String {
    "https://api.gfycat.com/v1/oauth/token".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gfycats: default_gfycats(),
            file_drop: default_file_drop(),
            upload_status: default_upload_status(),
            oauth_token: default_oauth_token(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout_sec: default_request_timeout(),
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Loads the configuration from `path`
    ///
    /// A missing or unparseable file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path).context("Failed to read config file")?;
        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
            Self::default()
        }))
    }

    /// Writes the configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).context("Failed to write config file")?;
        Ok(())
    }

    /// Returns the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_NAME)
            .join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}
