use crate::api::DEFAULT_MODEL;
use crate::error::InputError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted before the stored key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Values persisted between runs in `settings.json`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(
        rename = "geminiApiKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Trim a raw key and reject it if nothing is left
pub fn validate_api_key(raw: &str) -> Result<String, InputError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(InputError::MissingApiKey);
    }
    Ok(key.to_string())
}

impl Settings {
    /// Load settings from disk; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings =
            serde_json::from_str(&json).context("Failed to deserialize settings")?;

        tracing::info!(
            "Settings loaded from {} (api key stored: {})",
            path.display(),
            settings.api_key.is_some()
        );

        Ok(settings)
    }

    /// Load settings, starting over from defaults if the file is unreadable.
    /// Used where the caller is about to overwrite the file anyway.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk using atomic write pattern
    pub fn save(&self, path: &Path) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        std::fs::write(&temp_path, json).with_context(|| {
            format!(
                "Failed to write temporary settings file: {}",
                temp_path.display()
            )
        })?;

        std::fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        tracing::info!("Settings saved atomically to {}", path.display());
        Ok(())
    }

    pub fn set_api_key(&mut self, raw: &str) -> Result<(), InputError> {
        self.api_key = Some(validate_api_key(raw)?);
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Pick the key for a request: explicit argument, then environment, then stored
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Result<String, InputError> {
        resolve_key(explicit, env_api_key().as_deref(), self.api_key())
    }

    /// Key shown in the TUI form at startup: environment, then stored
    pub fn prefill_api_key(&self, env: Option<&str>) -> Option<String> {
        resolve_key(None, env, self.api_key()).ok()
    }
}

pub fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

fn resolve_key(
    explicit: Option<&str>,
    env: Option<&str>,
    stored: Option<&str>,
) -> Result<String, InputError> {
    [explicit, env, stored]
        .into_iter()
        .flatten()
        .find_map(|candidate| validate_api_key(candidate).ok())
        .ok_or(InputError::ApiKeyNotSet)
}
