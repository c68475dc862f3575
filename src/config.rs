//! Client configuration.
//!
//! Resolution order for the config file: explicit path, then the
//! `STOCKPILOT_CONFIG` environment variable, then the per-user project
//! directory. A missing file at an implicit location is not an error and
//! defaults apply; an explicitly passed path must exist. The
//! `STOCKPILOT_API_URL` / `STOCKPILOT_WS_URL` variables override whatever
//! the file provided.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// The push channel lives at a fixed path on the API host.
const WS_ENDPOINT_PATH: &str = "/ws/products/";

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    ws_url: Option<String>,
    token_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Full URL of the product push channel.
    pub ws_url: String,
    /// Where the persisted token pair lives.
    pub token_path: PathBuf,
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // An explicitly requested file must exist; only the implicit
        // locations fall back silently to defaults.
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::resolve(read_config_file(path)?));
        }

        let chosen = std::env::var("STOCKPILOT_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);

        let file = match chosen {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => ConfigFile::default(),
        };

        Ok(Self::resolve(file))
    }

    fn resolve(file: ConfigFile) -> Self {
        let api_url = std::env::var("STOCKPILOT_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();

        let ws_url = std::env::var("STOCKPILOT_WS_URL")
            .ok()
            .or(file.ws_url)
            .unwrap_or_else(|| derive_ws_url(&api_url));

        let token_path = file.token_path.unwrap_or_else(default_token_path);

        Self {
            api_url,
            ws_url,
            token_path,
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config at {}", path.display()))
}

/// Derive the push-channel URL from the API base: same host, ws scheme.
fn derive_ws_url(api_url: &str) -> String {
    let base = if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{api_url}")
    };
    format!("{}{}", base.trim_end_matches('/'), WS_ENDPOINT_PATH)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "stockpilot", "stockpilot")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("stockpilot.toml"))
}

fn default_token_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("tokens.json"))
        .unwrap_or_else(|| PathBuf::from(".stockpilot-tokens.json"))
}
