//! TOML-based engine configuration.
//!
//! Stores:
//! - Conflict detector thresholds and energy windows
//! - Strategy engine revision and heuristic constants
//! - Remote negotiation endpoint and timeout
//!
//! Configuration is stored at `~/.config/dayplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::conflict::DetectorOptions;
use crate::error::ConfigError;
use crate::negotiation::NegotiationConfig;
use crate::strategy::StrategyConfig;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorOptions,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub negotiation: NegotiationConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) => {
                    return Err(invalid("is a section; set one of its keys".to_string()))
                }
                // Optional strings: empty clears them
                serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::flatten(&path, child, out);
                }
            }
            other => out.push((prefix.to_string(), Self::display(other))),
        }
    }

    fn display(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        Some(Self::display(val))
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// The whole config is re-validated, so a value of the wrong shape
    /// (say, `25:00` for a time) is rejected and nothing changes.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    /// Every leaf key with its current value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            Self::flatten("", &json, &mut out);
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TimeOfDay;
    use crate::conflict::OverlapScan;
    use crate::strategy::EngineRevision;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.detector.min_meeting_buffer_minutes, 10);
        assert_eq!(parsed.negotiation.timeout_secs, 8);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [detector]
            max_focus_minutes = 90

            [strategy]
            revision = "v1"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.detector.max_focus_minutes, 90);
        assert_eq!(parsed.detector.overlap_scan, OverlapScan::Sweep);
        assert_eq!(parsed.strategy.revision, EngineRevision::V1);
        assert_eq!(parsed.strategy.reschedule_target, TimeOfDay::from_hm(17, 0));
    }

    #[test]
    fn get_reads_dot_paths() {
        let cfg = Config::default();
        assert_eq!(cfg.get("detector.working_hours.start").as_deref(), Some("08:00"));
        assert_eq!(cfg.get("strategy.revision").as_deref(), Some("v2"));
        assert_eq!(cfg.get("negotiation.enabled").as_deref(), Some("false"));
        assert_eq!(cfg.get("negotiation.endpoint").as_deref(), Some(""));
        assert!(cfg.get("detector.nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn update_parses_by_existing_type() {
        let mut cfg = Config::default();
        cfg.update("detector.min_meeting_buffer_minutes", "15").unwrap();
        cfg.update("detector.check_energy", "false").unwrap();
        cfg.update("strategy.overlap_compression", "0.5").unwrap();
        cfg.update("strategy.reschedule_target", "16:30").unwrap();
        cfg.update("detector.overlap_scan", "adjacent").unwrap();
        cfg.update("negotiation.endpoint", "https://example.com/negotiate").unwrap();

        assert_eq!(cfg.detector.min_meeting_buffer_minutes, 15);
        assert!(!cfg.detector.check_energy);
        assert_eq!(cfg.strategy.overlap_compression, 0.5);
        assert_eq!(cfg.strategy.reschedule_target, TimeOfDay::from_hm(16, 30));
        assert_eq!(cfg.detector.overlap_scan, OverlapScan::Adjacent);
        assert_eq!(cfg.negotiation.endpoint.as_deref(), Some("https://example.com/negotiate"));

        cfg.update("negotiation.endpoint", "").unwrap();
        assert_eq!(cfg.negotiation.endpoint.as_deref(), Some(""));
    }

    #[test]
    fn update_rejects_bad_keys_and_values() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.update("detector.unknown", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.update("", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.update("detector.check_energy", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.update("strategy.reschedule_target", "25:00"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(cfg.update("detector", "1"), Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, Config::default());
        assert!(path.exists());

        let mut cfg = loaded;
        cfg.update("strategy.admin_fallback_step_minutes", "45").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().strategy.admin_fallback_step_minutes, 45);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "detector = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn entries_lists_leaf_keys() {
        let entries = Config::default().entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"detector.high_energy_window.end"));
        assert!(keys.contains(&"strategy.allow_fuzzy_targets"));
        assert!(keys.contains(&"negotiation.timeout_secs"));
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
