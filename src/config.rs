use log::{info, warn};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::errors::{CampusError, ConfigParseSnafu};
use crate::model::LatLon;
use crate::proximity::DEFAULT_THRESHOLD_DEG;
use crate::store::KeyValueBackend;

/// Optional JSON override, read from local storage on startup.
pub const CONFIG_STORAGE_KEY: &str = "campus_map_config";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
    pub maximum_age_ms: u32,
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age_ms: 0,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub center: LatLon,
    pub zoom: u32,
    pub tile_url: String,
    pub spot_icon_url: String,
    pub user_icon_url: String,
    pub proximity_threshold_deg: f64,
    pub watch: WatchOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Stony Brook University
            center: LatLon::new(40.9126, -73.1235),
            zoom: 15,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            spot_icon_url: "https://maps.gstatic.com/mapfiles/ms2/micons/red-dot.png".into(),
            user_icon_url: "https://maps.gstatic.com/mapfiles/ms2/micons/blue-dot.png".into(),
            proximity_threshold_deg: DEFAULT_THRESHOLD_DEG,
            watch: WatchOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, CampusError> {
        serde_json::from_str(raw).context(ConfigParseSnafu)
    }

    /// Defaults, overlaid with whatever the backend holds under [`CONFIG_STORAGE_KEY`].
    pub fn load(backend: &dyn KeyValueBackend) -> Self {
        let raw = match backend.get_item(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("{}; using default config", e);
                return Self::default();
            }
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                info!("loaded config override from {}", CONFIG_STORAGE_KEY);
                config
            }
            Err(e) => {
                warn!("{}; using default config", snafu::Report::from_error(e));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[test]
    fn defaults_match_campus_setup() {
        let config = AppConfig::default();
        assert_eq!(config.center, LatLon::new(40.9126, -73.1235));
        assert_eq!(config.zoom, 15);
        assert_eq!(config.proximity_threshold_deg, 0.0008);
        assert_eq!(
            config.watch,
            WatchOptions {
                enable_high_accuracy: true,
                maximum_age_ms: 0,
                timeout_ms: 10_000,
            }
        );
    }

    #[test]
    fn partial_json_falls_back_per_field() {
        let config =
            AppConfig::from_json(r#"{"zoom": 17, "watch": {"timeout_ms": 5000}}"#).unwrap();
        assert_eq!(config.zoom, 17);
        assert_eq!(config.watch.timeout_ms, 5000);
        assert!(config.watch.enable_high_accuracy);
        assert_eq!(config.proximity_threshold_deg, DEFAULT_THRESHOLD_DEG);
    }

    #[test]
    fn load_ignores_broken_override() {
        let backend = MemoryBackend::new();
        assert_eq!(AppConfig::load(&backend), AppConfig::default());

        backend.set_item(CONFIG_STORAGE_KEY, "{not json").unwrap();
        assert_eq!(AppConfig::load(&backend), AppConfig::default());

        backend
            .set_item(CONFIG_STORAGE_KEY, r#"{"proximity_threshold_deg": 0.001}"#)
            .unwrap();
        assert_eq!(AppConfig::load(&backend).proximity_threshold_deg, 0.001);
    }
}
