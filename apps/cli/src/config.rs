//! Credentials and settings loading.
//!
//! Values come from the process environment (a `.env` file is loaded into it
//! at startup) and from a TOML settings file of `KEY = "value"` lines. The
//! environment wins when both define a key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use oac_core::errors::ConfigError;

pub const DEFAULT_SETTINGS_FILE: &str = ".streamlit/secrets.toml";
pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";

/// Values read from the settings file.
#[derive(Debug, Default)]
pub struct Settings {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

/// URL and key of the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub url: String,
    pub key: String,
}

impl Settings {
    /// Reads `path`. A missing file yields empty settings; a malformed one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file {} not found; using environment only", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let mut settings = Self::parse(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        settings.path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Parses top-level scalar entries; tables and arrays are ignored.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let values = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                toml::Value::Integer(i) => Some((key, i.to_string())),
                toml::Value::Float(f) => Some((key, f.to_string())),
                toml::Value::Boolean(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect();
        Ok(Self { path: None, values })
    }

    /// Looks `key` up in `env` first, then in the file. Blank values count as missing.
    pub fn resolve_with<F>(&self, key: &str, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        env(key)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.values.get(key).cloned())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn remote_credentials(&self) -> Result<RemoteCredentials, ConfigError> {
        self.remote_credentials_with(|k| std::env::var(k).ok())
    }

    pub fn remote_credentials_with<F>(&self, env: F) -> Result<RemoteCredentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = |key: &str| {
            let source = match &self.path {
                Some(path) => format!("{} (environment, .env or {})", key, path.display()),
                None => format!("{} (environment or .env)", key),
            };
            ConfigError::MissingKey(source)
        };
        let url = self
            .resolve_with(SUPABASE_URL, &env)
            .ok_or_else(|| missing(SUPABASE_URL))?;
        let key = self
            .resolve_with(SUPABASE_KEY, &env)
            .ok_or_else(|| missing(SUPABASE_KEY))?;
        Ok(RemoteCredentials { url, key })
    }
}
