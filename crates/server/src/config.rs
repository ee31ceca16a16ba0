use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use shared::domain::{NewItem, OwnerId};

pub const DEFAULT_CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub seed: Vec<NewItem>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            seed: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeedItem {
    title: String,
    owner_id: i64,
    #[serde(default)]
    completed: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    #[serde(default)]
    seed: Vec<SeedItem>,
}

pub fn load_settings() -> Settings {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), &env)
}

pub(crate) fn load_settings_from(path: &Path, env: &HashMap<String, String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                settings.seed = file_cfg
                    .seed
                    .into_iter()
                    .map(|item| NewItem {
                        title: item.title,
                        owner_id: OwnerId(item.owner_id),
                        completed: item.completed,
                    })
                    .collect();
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring malformed settings file");
            }
        }
    }

    if let Some(v) = env.get("SERVER_BIND") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = env.get("APP__BIND_ADDR") {
        settings.server_bind = v.clone();
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
