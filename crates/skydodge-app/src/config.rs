//! Application settings, loaded from `skydodge.ron`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location of the settings file.
pub const CONFIG_FILE: &str = "skydodge.ron";

/// Runner settings. Every field has a default so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frames stepped per second by the frame loop.
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,
    /// Fixed RNG seed. `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Craft preset id.
    #[serde(default = "default_plane_id")]
    pub plane_id: String,
    /// Where the best score is kept.
    #[serde(default = "default_high_score_path")]
    pub high_score_path: PathBuf,
    #[serde(default)]
    pub flavor: FlavorConfig,
}

/// Settings for the mission-text service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_frame_rate_hz() -> u32 {
    60
}
fn default_plane_id() -> String {
    skydodge_core::planes::default_plane().id.to_string()
}
fn default_high_score_path() -> PathBuf {
    PathBuf::from("skydodge_highscore.json")
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_api_key_env() -> String {
    "API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: default_frame_rate_hz(),
            seed: None,
            plane_id: default_plane_id(),
            high_score_path: default_high_score_path(),
            flavor: FlavorConfig::default(),
        }
    }
}

impl Default for FlavorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load settings from `path`. A missing or invalid file yields defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Write settings to `path`. Logs on error.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.ron"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame_rate_hz, 60);
        assert_eq!(config.plane_id, "intercept");
        assert_eq!(config.flavor.model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_partial_file_fills_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(frame_rate_hz: 30, seed: Some(7), flavor: (timeout_secs: 3))")
            .unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.frame_rate_hz, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.flavor.timeout_secs, 3);
        assert_eq!(config.flavor.api_key_env, "API_KEY");
        assert_eq!(config.plane_id, "intercept");
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "this is not ron {").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = AppConfig {
            frame_rate_hz: 120,
            seed: Some(99),
            plane_id: "viper".into(),
            ..AppConfig::default()
        };
        config.save(&path);
        assert_eq!(AppConfig::load(&path), config);
    }
}
