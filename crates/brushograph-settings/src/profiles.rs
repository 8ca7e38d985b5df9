//! Color profiles and the layer color table
//!
//! The color table is configuration: it is loaded once, validated, and never
//! changes during a run.

use std::collections::BTreeMap;

use brushograph_core::{ColorName, GcodeError, LayerId};
use brushograph_gcode::classify;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, SettingsResult};
use crate::templates::{
    color2_sequence, COLOR1_SEQUENCE, COLOR3_SEQUENCE, ENDING_SEQUENCE, HOMING_SEQUENCE,
    WASHING_SEQUENCE,
};

/// Name of the wash-only profile
pub const WASHING: &str = "Washing";

/// Opaque block of motion commands emitted verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintenanceTemplate(String);

impl MaintenanceTemplate {
    /// Create a template from its G-Code text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Raw template text
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Template lines, without terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    /// Check every motion line parses cleanly
    ///
    /// # Errors
    /// Returns [`GcodeError::InvalidTemplate`] naming the first motion line with
    /// a malformed numeric word.
    pub fn validate(&self, name: &str) -> Result<(), GcodeError> {
        for (index, line) in self.lines().enumerate() {
            let command = classify(line);
            let Some(motion) = command.as_motion() else {
                continue;
            };
            if let Some(letter) = motion.invalid_words.first() {
                return Err(GcodeError::InvalidTemplate {
                    template: name.to_string(),
                    line_number: (index + 1) as u32,
                    reason: format!("malformed {} word in '{}'", letter, line.trim()),
                });
            }
        }
        Ok(())
    }
}

impl From<&str> for MaintenanceTemplate {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A named color and the sequence that loads the brush with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorProfile {
    /// Color name, e.g. "Color 1"
    pub name: ColorName,
    /// Pickup sequence
    pub template: MaintenanceTemplate,
}

impl ColorProfile {
    /// Create a new color profile
    pub fn new(name: impl Into<ColorName>, template: impl Into<MaintenanceTemplate>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Layer to color mapping plus the fixed start and end blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTable {
    /// Profile used for layers with no mapping
    pub default_color: ColorName,
    /// Profile emitted before a pickup when the color changes
    pub wash_color: ColorName,
    /// Block emitted before the first source line
    pub preamble: MaintenanceTemplate,
    /// Block emitted after the last source line
    pub closing: MaintenanceTemplate,
    /// Layer id to color name
    pub layers: BTreeMap<LayerId, ColorName>,
    /// Every known color
    pub profiles: Vec<ColorProfile>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorTable {
    /// Stock paint station table
    pub fn builtin() -> Self {
        let profiles = vec![
            ColorProfile::new("Color 1", COLOR1_SEQUENCE),
            ColorProfile::new("Color 2", color2_sequence().as_str()),
            ColorProfile::new("Color 3", COLOR3_SEQUENCE),
            ColorProfile::new(WASHING, WASHING_SEQUENCE),
        ];

        let layers = [
            ("Green", "Color 1"),
            ("Blue", "Color 2"),
            ("Red", "Color 3"),
            ("C03", "Color 3"),
            ("C00", "Color 1"),
            ("Wash", WASHING),
        ]
        .into_iter()
        .map(|(layer, color)| (layer.to_string(), color.to_string()))
        .collect();

        Self {
            default_color: WASHING.to_string(),
            wash_color: WASHING.to_string(),
            preamble: MaintenanceTemplate::new(HOMING_SEQUENCE),
            closing: MaintenanceTemplate::new(ENDING_SEQUENCE),
            layers,
            profiles,
        }
    }

    /// Look up a profile by color name
    pub fn profile(&self, name: &str) -> Option<&ColorProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Check every reference resolves and every template parses
    pub fn validate(&self) -> SettingsResult<()> {
        self.validate_references()?;

        for profile in &self.profiles {
            profile.template.validate(&profile.name)?;
        }
        self.preamble.validate("preamble")?;
        self.closing.validate("closing")?;
        Ok(())
    }

    fn validate_references(&self) -> ConfigResult<()> {
        let require = |color: &str, referenced_by: String| {
            if self.profile(color).is_some() {
                Ok(())
            } else {
                Err(ConfigError::UnknownColor {
                    color: color.to_string(),
                    referenced_by,
                })
            }
        };

        require(&self.default_color, "default_color".to_string())?;
        require(&self.wash_color, "wash_color".to_string())?;
        for (layer, color) in &self.layers {
            require(color, format!("layer '{}'", layer))?;
        }
        Ok(())
    }
}
