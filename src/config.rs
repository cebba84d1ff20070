//! Configuration loading for the detection pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::detector::DetectorParams;
use crate::double_clap::DoubleClapConfig;

/// Top-level clap_config.json shape (written by the host application).
///
/// Both sections and every field inside them are optional; missing values
/// fall back to the shipped defaults, so a host can override a single
/// threshold without restating the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClapConfig {
    pub detector: DetectorParams,
    pub double_clap: DoubleClapConfig,
}

/// Read a clap config file, falling back to defaults if it is missing or
/// unparseable.
pub fn read_clap_config(path: &Path) -> ClapConfig {
    read_json_file(path).unwrap_or_default()
}

/// Generic helper: read a JSON file and deserialize it.
fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(val) => Some(val),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {}: {}", path.display(), e);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("clap-core-test-{name}"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("clap-core-test-does-not-exist.json");
        assert_eq!(read_clap_config(&path), ClapConfig::default());
    }

    #[test]
    fn invalid_json_yields_defaults() {
        let path = write_temp("invalid.json", "not json {");
        assert_eq!(read_clap_config(&path), ClapConfig::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_config_fills_remaining_fields() {
        let path = write_temp(
            "partial.json",
            r#"{"detector": {"threshold": 20.0}, "double_clap": {"cooldown": 1.0}}"#,
        );
        let config = read_clap_config(&path);
        assert_eq!(config.detector.threshold, 20.0);
        assert_eq!(config.detector.clap_ratio, DetectorParams::default().clap_ratio);
        assert_eq!(config.double_clap.cooldown, 1.0);
        assert_eq!(config.double_clap.min_gap, DoubleClapConfig::default().min_gap);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn full_round_trip() {
        let mut config = ClapConfig::default();
        config.detector.hf_ratio_min = 0.42;
        config.double_clap.max_gap = 0.8;

        let json = serde_json::to_string(&config).unwrap();
        let path = write_temp("roundtrip.json", &json);
        assert_eq!(read_clap_config(&path), config);
        std::fs::remove_file(&path).ok();
    }
}
