//! Configuration
//!
//! Optimizer tuning and the color table, loadable from `.toml` or `.json`.
//! Every section has defaults, so a file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::profiles::ColorTable;

/// Default distance between maintenance insertions (mm)
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 100.0;
/// Default forced insertion multiplier
pub const DEFAULT_FORCE_MULTIPLIER: f64 = 2.0;
/// Default lowest Z that counts as a retract (mm)
pub const DEFAULT_RETRACT_MIN_Z: f64 = 2.0;
/// Default contact height (mm)
pub const DEFAULT_CONTACT_Z: f64 = 0.0;

/// Optimizer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    /// Drawn distance after which a pickup is due (mm)
    pub distance_threshold: f64,
    /// Multiple of the threshold after which a pickup is forced
    pub force_multiplier: f64,
    /// Insert at the first motion past the threshold
    pub aggressive: bool,
    /// Emit progress diagnostics
    pub debug: bool,
    /// Rewrite generator Z moves and XY travel on output
    pub normalize_moves: bool,
    /// Lowest Z that lifts the brush off the paper (mm)
    pub retract_min_z: f64,
    /// Z at which the brush touches the paper (mm)
    pub contact_z: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            force_multiplier: DEFAULT_FORCE_MULTIPLIER,
            aggressive: false,
            debug: false,
            normalize_moves: false,
            retract_min_z: DEFAULT_RETRACT_MIN_Z,
            contact_z: DEFAULT_CONTACT_Z,
        }
    }
}

impl OptimizerSettings {
    /// Validate the settings
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.distance_threshold.is_finite() && self.distance_threshold > 0.0) {
            return Err(out_of_range(
                "optimizer.distance_threshold",
                self.distance_threshold,
            ));
        }
        if !(self.force_multiplier.is_finite() && self.force_multiplier >= 1.0) {
            return Err(out_of_range(
                "optimizer.force_multiplier",
                self.force_multiplier,
            ));
        }
        if !self.contact_z.is_finite() {
            return Err(out_of_range("optimizer.contact_z", self.contact_z));
        }
        if !(self.retract_min_z.is_finite() && self.retract_min_z > self.contact_z) {
            return Err(SettingsError::InvalidSetting {
                key: "optimizer.retract_min_z".to_string(),
                reason: format!(
                    "must be above contact_z ({}), got {}",
                    self.contact_z, self.retract_min_z
                ),
            });
        }
        Ok(())
    }
}

fn out_of_range(key: &str, value: f64) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Optimizer tuning
    pub optimizer: OptimizerSettings,
    /// Layer colors and maintenance templates
    pub colors: ColorTable,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.optimizer.validate()?;
        self.colors.validate()
    }

    /// Platform config file location, e.g. `~/.config/brushograph/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("brushograph").join("config.toml"))
    }

    /// Load the platform config file if one exists
    pub fn load_default() -> SettingsResult<Option<Self>> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.optimizer.distance_threshold, 100.0);
        assert_eq!(config.optimizer.force_multiplier, 2.0);
        assert!(!config.optimizer.aggressive);
        assert!(!config.optimizer.debug);
        assert!(!config.optimizer.normalize_moves);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_must_be_positive() {
        let mut settings = OptimizerSettings::default();
        settings.distance_threshold = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_force_multiplier_lower_bound() {
        let mut settings = OptimizerSettings::default();
        settings.force_multiplier = 0.5;
        assert!(settings.validate().is_err());
        settings.force_multiplier = 1.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_retract_above_contact() {
        let mut settings = OptimizerSettings::default();
        settings.retract_min_z = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [optimizer]
            distance_threshold = 50.0
            aggressive = true
            "#,
        )
        .unwrap();
        assert_eq!(config.optimizer.distance_threshold, 50.0);
        assert!(config.optimizer.aggressive);
        assert_eq!(config.optimizer.force_multiplier, 2.0);
        assert_eq!(config.colors, ColorTable::builtin());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }
}
