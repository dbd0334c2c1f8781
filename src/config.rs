// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! Configuration is stored in TOML format through `confy`. Every field has a
//! serde default so that partial or older files keep loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use route_core::SceneOptions;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "routemap";
const CONFIG_NAME: &str = "config";

/// Default backend address.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable used by the web front-end's deployment.
pub const LEGACY_API_BASE_ENV: &str = "REACT_APP_API_BASE";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL serving `/airports` and `/flights`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Initial map center latitude
    #[serde(default = "default_center_lat")]
    pub map_center_lat: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_lon")]
    pub map_center_lon: f64,

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Per-request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

// Default value functions for serde
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_center_lat() -> f64 {
    SceneOptions::default().center.0
}

fn default_center_lon() -> f64 {
    SceneOptions::default().center.1
}

fn default_zoom() -> u8 {
    SceneOptions::default().zoom
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            map_center_lat: default_center_lat(),
            map_center_lon: default_center_lon(),
            default_zoom: default_zoom(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Load configuration from an explicit file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Map framing derived from this configuration
    #[must_use]
    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            center: (self.map_center_lat, self.map_center_lon),
            zoom: self.default_zoom,
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the backend address.
    ///
    /// Precedence: command-line flag (which also covers `ROUTEMAP_API_BASE`),
    /// then `REACT_APP_API_BASE`, then the config file. Empty values are
    /// skipped.
    #[must_use]
    pub fn resolve_api_base(&self, flag: Option<&str>) -> String {
        let legacy = std::env::var(LEGACY_API_BASE_ENV).ok();
        self.resolve_api_base_with(flag, legacy.as_deref())
    }

    fn resolve_api_base_with(&self, flag: Option<&str>, legacy_env: Option<&str>) -> String {
        [flag, legacy_env, Some(self.api_base.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.scene_options(), SceneOptions::default());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base = \"http://flights.example:9000\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base, "http://flights.example:9000");
        assert_eq!(config.default_zoom, 6);
        assert!((config.map_center_lat - 44.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig {
            request_timeout_secs: Some(15),
            default_zoom: 8,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_api_base_precedence() {
        let config = AppConfig {
            api_base: "http://from-config".to_string(),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_api_base_with(Some("http://from-flag"), Some("http://from-env")),
            "http://from-flag"
        );
        assert_eq!(
            config.resolve_api_base_with(None, Some("http://from-env")),
            "http://from-env"
        );
        assert_eq!(
            config.resolve_api_base_with(Some(" "), Some("")),
            "http://from-config"
        );

        let blank = AppConfig {
            api_base: String::new(),
            ..Default::default()
        };
        assert_eq!(blank.resolve_api_base_with(None, None), DEFAULT_API_BASE);
    }
}
