use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const API_URL_ENV: &str = "USER_TABLE_API_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl AppConfig {
    /// Environment variable first, then `config.toml`, then the default.
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return Self::with_base_url(&url);
            }
        }

        let from_file = default_config_path().and_then(|path| {
            if path.exists() {
                Self::from_file(&path).map(Some)
            } else {
                Ok(None)
            }
        });

        match from_file {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let parsed: AppConfig = toml::from_str(content)?;
        Ok(Self::with_base_url(&parsed.api_base_url))
    }

    pub fn with_base_url(url: &str) -> Self {
        Self {
            api_base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "user-table")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    Ok(project_dirs.config_dir().join("config.toml"))
}
