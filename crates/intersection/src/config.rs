//! # Traffic Light Configuration
//!
//! The cycle bounds and poll slice are fixed design constants. `LightConfig`
//! carries them so embedders and tests can scale timing down; its defaults
//! are the constants.
//!
//! ## File Format
//!
//! ```toml
//! name = "main-and-5th"
//! min_cycle_ms = 4000
//! max_cycle_ms = 6000
//! poll_slice_ms = 1
//! seed = 42            # optional, fixes the cycle sequence
//! ```
//!
//! Missing keys fall back to the defaults.

use crate::error::{LightError, LightResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Shortest cycle between two toggles (ms, inclusive).
pub const DEFAULT_MIN_CYCLE_MS: u64 = 4000;

/// Longest cycle between two toggles (ms, inclusive).
pub const DEFAULT_MAX_CYCLE_MS: u64 = 6000;

/// Sleep between two timer checks in the toggling loop (ms).
pub const DEFAULT_POLL_SLICE_MS: u64 = 1;

/// Timing and identity of one traffic light.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    /// Label used in the thread name and log fields.
    pub name: String,
    /// Shortest cycle (ms, inclusive).
    pub min_cycle_ms: u64,
    /// Longest cycle (ms, inclusive).
    pub max_cycle_ms: u64,
    /// Timer check interval (ms).
    pub poll_slice_ms: u64,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            name: String::from("intersection"),
            min_cycle_ms: DEFAULT_MIN_CYCLE_MS,
            max_cycle_ms: DEFAULT_MAX_CYCLE_MS,
            poll_slice_ms: DEFAULT_POLL_SLICE_MS,
            seed: None,
        }
    }
}

impl LightConfig {
    /// Checks that the cycle bounds and poll slice are usable.
    ///
    /// # Errors
    ///
    /// Returns [`LightError::InvalidConfig`] if either bound or the poll
    /// slice is zero, or if the bounds are inverted.
    pub fn validate(&self) -> LightResult<()> {
        if self.min_cycle_ms == 0 {
            return Err(LightError::InvalidConfig(
                "min_cycle_ms must be greater than zero".to_string(),
            ));
        }
        if self.min_cycle_ms > self.max_cycle_ms {
            return Err(LightError::InvalidConfig(format!(
                "min_cycle_ms ({}) exceeds max_cycle_ms ({})",
                self.min_cycle_ms, self.max_cycle_ms
            )));
        }
        if self.poll_slice_ms == 0 {
            return Err(LightError::InvalidConfig(
                "poll_slice_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LightError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`LightError::InvalidConfig`] if validation fails.
    pub fn from_toml_str(source: &str) -> LightResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LightError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> LightResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LightError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Timer check interval.
    #[inline]
    #[must_use]
    pub fn poll_slice(&self) -> Duration {
        Duration::from_millis(self.poll_slice_ms)
    }

    /// Shortest cycle.
    #[inline]
    #[must_use]
    pub fn min_cycle(&self) -> Duration {
        Duration::from_millis(self.min_cycle_ms)
    }

    /// Longest cycle.
    #[inline]
    #[must_use]
    pub fn max_cycle(&self) -> Duration {
        Duration::from_millis(self.max_cycle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = LightConfig::default();
        assert_eq!(config.min_cycle(), Duration::from_secs(4));
        assert_eq!(config.max_cycle(), Duration::from_secs(6));
        assert_eq!(config.poll_slice(), Duration::from_millis(1));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LightConfig::from_toml_str("name = \"north\"\nseed = 7").unwrap();
        assert_eq!(config.name, "north");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.min_cycle_ms, DEFAULT_MIN_CYCLE_MS);
        assert_eq!(config.max_cycle_ms, DEFAULT_MAX_CYCLE_MS);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(LightConfig::from_toml_str("").unwrap(), LightConfig::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = LightConfig::from_toml_str("min_cycle_ms = 10\nmax_cycle_ms = 5").unwrap_err();
        assert!(matches!(err, LightError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        for source in ["min_cycle_ms = 0", "poll_slice_ms = 0"] {
            let err = LightConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, LightError::InvalidConfig(_)), "{source}");
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = LightConfig::from_toml_str("cycle = 5").unwrap_err();
        assert!(matches!(err, LightError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("intersection_no_such_config.toml");
        let err = LightConfig::load(&path).unwrap_err();
        assert!(matches!(err, LightError::ConfigIo { .. }));
        assert!(err.to_string().contains("intersection_no_such_config.toml"));
    }

    #[test]
    fn test_load_file() {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("test_light_config_{id}.toml"));
        std::fs::write(&path, "min_cycle_ms = 100\nmax_cycle_ms = 200\n").unwrap();

        let config = LightConfig::load(&path).unwrap();
        assert_eq!(config.min_cycle(), Duration::from_millis(100));
        assert_eq!(config.max_cycle(), Duration::from_millis(200));

        std::fs::remove_file(&path).ok();
    }
}
