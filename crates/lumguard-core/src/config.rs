//! Controller configuration.
//!
//! Loaded from a JSON file with PascalCase keys. Every field has a default,
//! so a partial file (or no file at all) is valid. Out-of-range values are
//! replaced by their defaults in [`Config::validate`] before the controller
//! ever sees them.
//!
//! ```rust
//! use lumguard_core::Config;
//!
//! let mut config: Config = serde_json::from_str(r#"{ "ActivateFactor": 1.5 }"#).unwrap();
//! let fixed = config.validate();
//! assert_eq!(fixed, vec!["ActivateFactor"]);
//! assert_eq!(config.activate_factor, 0.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::ConfigError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    /// Gain multiplier applied on panic activation, in [0, 1).
    pub activate_factor: f32,
    /// Manual recovery speed, gain units per second.
    pub reset_rate: f32,
    /// Control tick frequency in Hz.
    pub update_frequency: f32,
    /// Sound played when panic reduces the gain.
    pub activate_sound: String,
    /// Sound played when a manual reset starts.
    pub reset_sound: String,
    /// Image-driven dimming settings.
    pub auto: AutoConfig,
}

/// Automatic (image-driven) dimming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AutoConfig {
    /// Whether luminance sampling and auto-dimming run at all.
    pub enabled: bool,
    /// Luminance sampling frequency in Hz.
    pub brightness_frequency: f32,
    /// Image brightness above which rate limiting applies.
    pub dynamic_min_brightness: f32,
    /// Maximum tolerated brightness rise per second.
    pub dynamic_max_rate: f32,
    /// Headroom kept below the static cap while recovering.
    pub recover_margin: f32,
    /// Automatic recovery speed, gain units per second.
    pub recover_rate: f32,
    /// Maximum tolerated image brightness at full gain.
    pub static_max_brightness: f32,
    /// Sound played when auto-dimming kicks in.
    pub activate_sound: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            activate_factor: 0.5,
            reset_rate: 0.25,
            update_frequency: 60.0,
            activate_sound: "activate.wav".into(),
            reset_sound: "reset.wav".into(),
            auto: AutoConfig::default(),
        }
    }
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            brightness_frequency: 10.0,
            dynamic_min_brightness: 0.25,
            dynamic_max_rate: 1.0,
            recover_margin: 0.05,
            recover_rate: 0.25,
            static_max_brightness: 0.5,
            activate_sound: "auto-activate.wav".into(),
        }
    }
}

/// Replaces `value` with `default` when `valid` rejects it.
fn check(
    fixed: &mut Vec<&'static str>,
    name: &'static str,
    value: &mut f32,
    default: f32,
    rule: &str,
    valid: impl Fn(f32) -> bool,
) {
    if value.is_finite() && valid(*value) {
        return;
    }
    warn!("{name} must be {rule}, got {value}. Defaulting to {default}.");
    *value = default;
    fixed.push(name);
}

impl Config {
    /// Replaces out-of-range values with defaults.
    ///
    /// Returns the names of corrected fields, in declaration order.
    pub fn validate(&mut self) -> Vec<&'static str> {
        let def = Self::default();
        let mut fixed = Vec::new();

        check(
            &mut fixed,
            "ActivateFactor",
            &mut self.activate_factor,
            def.activate_factor,
            "at least 0 and less than 1",
            |v| (0.0..1.0).contains(&v),
        );
        check(&mut fixed, "ResetRate", &mut self.reset_rate, def.reset_rate, "greater than 0", |v| v > 0.0);
        check(
            &mut fixed,
            "UpdateFrequency",
            &mut self.update_frequency,
            def.update_frequency,
            "greater than 0",
            |v| v > 0.0,
        );

        let auto = &mut self.auto;
        let def = def.auto;
        check(
            &mut fixed,
            "Auto.BrightnessFrequency",
            &mut auto.brightness_frequency,
            def.brightness_frequency,
            "greater than 0",
            |v| v > 0.0,
        );
        check(
            &mut fixed,
            "Auto.DynamicMinBrightness",
            &mut auto.dynamic_min_brightness,
            def.dynamic_min_brightness,
            "greater than 0",
            |v| v > 0.0,
        );
        check(
            &mut fixed,
            "Auto.DynamicMaxRate",
            &mut auto.dynamic_max_rate,
            def.dynamic_max_rate,
            "greater than 0",
            |v| v > 0.0,
        );
        check(
            &mut fixed,
            "Auto.RecoverMargin",
            &mut auto.recover_margin,
            def.recover_margin,
            "at least 0",
            |v| v >= 0.0,
        );
        check(
            &mut fixed,
            "Auto.RecoverRate",
            &mut auto.recover_rate,
            def.recover_rate,
            "greater than 0",
            |v| v > 0.0,
        );
        check(
            &mut fixed,
            "Auto.StaticMaxBrightness",
            &mut auto.static_max_brightness,
            def.static_max_brightness,
            "greater than 0",
            |v| v > 0.0,
        );

        fixed
    }

    /// Parses and validates configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Reads and validates configuration from a file.
    ///
    /// Unlike [`Config::load_or_default`], every failure is returned.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| io_err(e.into()))?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Loads configuration, falling back to defaults, then writes the
    /// normalized result back so every setting is visible in the file.
    ///
    /// A missing file silently yields defaults. Malformed files and write
    /// failures are logged and never abort.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let config = match Self::from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                error!("Failed to read configuration: {e}");
                Self::default()
            }
        };

        if let Err(e) = config.save(path) {
            error!("Failed to write configuration: {e}");
        }

        config
    }

    /// Control tick period in seconds.
    #[inline]
    pub fn process_period(&self) -> f64 {
        1.0 / f64::from(self.update_frequency)
    }

    /// Luminance sampling period in seconds.
    #[inline]
    pub fn image_period(&self) -> f64 {
        1.0 / f64::from(self.auto.brightness_frequency)
    }
}
