// =============================================================================
// Scanner Configuration — JSON-backed settings with atomic save
// =============================================================================
//
// Every tunable of the scanner lives here. Persistence uses an atomic
// tmp + rename pattern to prevent corruption on crash. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file.
//
// The classification tiers (350/250/150/50) and the history/velocity window
// are fixed constants of the score engine, not configuration.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3400".to_string()
}

fn default_hot_velocity_min() -> f64 {
    30.0
}

fn default_scalp_score_min() -> f64 {
    200.0
}

fn default_scalp_velocity_min() -> f64 {
    20.0
}

fn default_scalp_flow_min() -> f64 {
    40.0
}

// =============================================================================
// ScannerConfig
// =============================================================================

/// Top-level configuration for the scanner service.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Optional bearer token required on `POST /tv-webhook`. When unset the
    /// ingest endpoint is open.
    #[serde(default)]
    pub webhook_token: Option<String>,

    /// Minimum |velocity| for a non-EXTREME symbol to count as a hot mover.
    #[serde(default = "default_hot_velocity_min")]
    pub hot_velocity_min: f64,

    /// Minimum |score| for a scalp setup.
    #[serde(default = "default_scalp_score_min")]
    pub scalp_score_min: f64,

    /// Minimum |velocity| for a scalp setup.
    #[serde(default = "default_scalp_velocity_min")]
    pub scalp_velocity_min: f64,

    /// Minimum |flow| for a scalp setup.
    #[serde(default = "default_scalp_flow_min")]
    pub scalp_flow_min: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            webhook_token: None,
            hot_velocity_min: default_hot_velocity_min(),
            scalp_score_min: default_scalp_score_min(),
            scalp_velocity_min: default_scalp_velocity_min(),
            scalp_flow_min: default_scalp_flow_min(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scanner config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse scanner config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            "scanner config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise scanner config to JSON")?;

        // Atomic write: write to a temporary sibling file, then rename.
        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "scanner config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = ScannerConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3400");
        assert!(cfg.webhook_token.is_none());
        assert!((cfg.hot_velocity_min - 30.0).abs() < f64::EPSILON);
        assert!((cfg.scalp_score_min - 200.0).abs() < f64::EPSILON);
        assert!((cfg.scalp_velocity_min - 20.0).abs() < f64::EPSILON);
        assert!((cfg.scalp_flow_min - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: ScannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3400");
        assert!(cfg.webhook_token.is_none());
        assert!((cfg.hot_velocity_min - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "bind_addr": "127.0.0.1:9000", "webhook_token": "s3cret" }"#;
        let cfg: ScannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.webhook_token.as_deref(), Some("s3cret"));
        assert!((cfg.scalp_flow_min - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn roundtrip_serialisation() {
        let mut cfg = ScannerConfig::default();
        cfg.webhook_token = Some("token".to_string());
        cfg.hot_velocity_min = 45.0;
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: ScannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.bind_addr, cfg2.bind_addr);
        assert_eq!(cfg.webhook_token, cfg2.webhook_token);
        assert!((cfg.hot_velocity_min - cfg2.hot_velocity_min).abs() < f64::EPSILON);
    }
}
