//! Configuration management
//!
//! Settings live in `settings.json` inside the MyChits directory:
//! ```json
//! {
//!   "api": { "baseUrl": "https://api.mychits.example/api", "timeoutSecs": 30 },
//!   "connectivity": { "probeUrl": "https://clients3.google.com/generate_204", "probeIntervalSecs": 30 },
//!   "display": { "utcOffsetMinutes": 330 },
//!   "session": { "logoutBehavior": "clearIdentity" }
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::format::date::{DateFormatter, IST_OFFSET_MINUTES};
use crate::state::LogoutBehavior;

pub const SETTINGS_FILE: &str = "settings.json";
pub const BASE_URL_ENV: &str = "MYCHITS_BASE_URL";
pub const PROBE_URL_ENV: &str = "MYCHITS_PROBE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_PROBE_URL: &str = "https://clients3.google.com/generate_204";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 30;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    connectivity: ConnectivitySettings,
    #[serde(default)]
    display: DisplaySettings,
    #[serde(default)]
    session: SessionSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectivitySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    probe_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    probe_interval_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utc_offset_minutes: Option<i32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logout_behavior: Option<LogoutBehavior>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// MyChits configuration (resolved view of settings)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub probe_url: String,
    pub probe_interval_secs: u64,
    pub utc_offset_minutes: i32,
    pub logout_behavior: LogoutBehavior,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
            utc_offset_minutes: IST_OFFSET_MINUTES,
            logout_behavior: LogoutBehavior::default(),
        }
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
        SettingsFile::default()
    }))
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load config from the MyChits directory
    ///
    /// `MYCHITS_BASE_URL` and `MYCHITS_PROBE_URL` override the file.
    pub fn load(mychits_dir: &Path) -> Result<Self> {
        let raw = read_settings(&mychits_dir.join(SETTINGS_FILE))?;
        let defaults = Self::default();

        Ok(Self {
            base_url: env_override(BASE_URL_ENV)
                .or(raw.api.base_url)
                .unwrap_or(defaults.base_url),
            timeout_secs: raw.api.timeout_secs.unwrap_or(defaults.timeout_secs),
            probe_url: env_override(PROBE_URL_ENV)
                .or(raw.connectivity.probe_url)
                .unwrap_or(defaults.probe_url),
            probe_interval_secs: raw
                .connectivity
                .probe_interval_secs
                .unwrap_or(defaults.probe_interval_secs),
            utc_offset_minutes: raw
                .display
                .utc_offset_minutes
                .unwrap_or(defaults.utc_offset_minutes),
            logout_behavior: raw
                .session
                .logout_behavior
                .unwrap_or(defaults.logout_behavior),
        })
    }

    /// Save config to the MyChits directory, keeping settings we don't manage
    pub fn save(&self, mychits_dir: &Path) -> Result<()> {
        let settings_path = mychits_dir.join(SETTINGS_FILE);
        let mut settings = read_settings(&settings_path)?;

        settings.api.base_url = Some(self.base_url.clone());
        settings.api.timeout_secs = Some(self.timeout_secs);
        settings.connectivity.probe_url = Some(self.probe_url.clone());
        settings.connectivity.probe_interval_secs = Some(self.probe_interval_secs);
        settings.display.utc_offset_minutes = Some(self.utc_offset_minutes);
        settings.session.logout_behavior = Some(self.logout_behavior);

        std::fs::create_dir_all(mychits_dir)
            .with_context(|| format!("Failed to create {}", mychits_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }

    pub fn date_formatter(&self) -> crate::domain::result::Result<DateFormatter> {
        DateFormatter::from_offset_minutes(self.utc_offset_minutes)
    }
}
