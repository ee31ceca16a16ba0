use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use shared::domain::OwnerId;
use thiserror::Error;

use crate::notification::DEFAULT_NOTIFICATION_TIMEOUT;

pub const DEFAULT_CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub owner_id: OwnerId,
    pub notification_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080/".into(),
            owner_id: OwnerId(3380),
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    owner_id: Option<i64>,
    notification_timeout_ms: Option<u64>,
}

impl Settings {
    /// Defaults, then the settings file (if present), then environment overrides.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.merge_file(path)?;
        settings.merge_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        let file_cfg: FileSettings = toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(v) = file_cfg.api_url {
            self.api_url = v;
        }
        if let Some(v) = file_cfg.owner_id {
            self.owner_id = OwnerId(v);
        }
        if let Some(v) = file_cfg.notification_timeout_ms {
            self.notification_timeout = Duration::from_millis(v);
        }
        Ok(())
    }

    pub(crate) fn merge_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        let first = |keys: &[&str]| keys.iter().rev().find_map(|&key| lookup(key));

        if let Some(v) = first(&["TODO_API_URL", "APP__API_URL"]) {
            self.api_url = v;
        }
        if let Some(v) = first(&["TODO_OWNER_ID", "APP__OWNER_ID"]) {
            let parsed = v.trim().parse::<i64>().map_err(|_| SettingsError::InvalidValue {
                key: "owner_id",
                value: v.clone(),
            })?;
            self.owner_id = OwnerId(parsed);
        }
        if let Some(v) = first(&["APP__NOTIFICATION_TIMEOUT_MS"]) {
            let parsed = v.trim().parse::<u64>().map_err(|_| SettingsError::InvalidValue {
                key: "notification_timeout_ms",
                value: v.clone(),
            })?;
            self.notification_timeout = Duration::from_millis(parsed);
        }
        Ok(())
    }
}
