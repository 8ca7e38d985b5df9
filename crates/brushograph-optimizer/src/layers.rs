//! Layer and color resolution
//!
//! Maps layer ids to color profiles and decides which layer markers start a
//! new layer. A section marker (`M8`) announces a layer a few lines later;
//! bare layer markers are only trusted before any layer has started.

use std::collections::BTreeMap;

use brushograph_core::{ColorName, Error, LayerId, Result};
use brushograph_settings::{ColorTable, ConfigError, SettingsError};

use crate::window::LineWindow;

/// Lines searched after a section marker for its layer marker
pub const SECTION_LOOKAHEAD_LINES: usize = 6;

/// A color profile with its template split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// Color name
    pub name: ColorName,
    /// Template lines, emitted verbatim
    pub lines: Vec<String>,
}

impl ResolvedProfile {
    fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

/// Immutable view of a validated [`ColorTable`]
#[derive(Debug, Clone)]
pub struct ColorResolver {
    profiles: BTreeMap<ColorName, ResolvedProfile>,
    layers: BTreeMap<LayerId, ColorName>,
    default_profile: ResolvedProfile,
    wash_profile: ResolvedProfile,
    preamble: Vec<String>,
    closing: Vec<String>,
}

impl ColorResolver {
    /// Validate a color table and prepare it for lookups
    pub fn new(table: &ColorTable) -> Result<Self> {
        table.validate().map_err(settings_error)?;

        let profiles: BTreeMap<ColorName, ResolvedProfile> = table
            .profiles
            .iter()
            .map(|p| (p.name.clone(), ResolvedProfile::new(&p.name, p.template.text())))
            .collect();

        let lookup = |name: &str| {
            profiles
                .get(name)
                .cloned()
                .ok_or_else(|| Error::other(format!("Unknown color '{}'", name)))
        };
        let default_profile = lookup(&table.default_color)?;
        let wash_profile = lookup(&table.wash_color)?;

        Ok(Self {
            layers: table.layers.clone(),
            default_profile,
            wash_profile,
            preamble: table.preamble.lines().map(str::to_string).collect(),
            closing: table.closing.lines().map(str::to_string).collect(),
            profiles,
        })
    }

    /// Profile for a layer; unmapped layers get the default profile
    pub fn resolve(&self, layer: &str) -> &ResolvedProfile {
        self.layers
            .get(layer)
            .and_then(|color| self.profiles.get(color))
            .unwrap_or(&self.default_profile)
    }

    /// Profile emitted before a pickup when the color changes
    pub fn wash(&self) -> &ResolvedProfile {
        &self.wash_profile
    }

    /// Lines emitted before the first source line
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// Lines emitted after the last source line
    pub fn closing(&self) -> &[String] {
        &self.closing
    }

    /// Every color name, for zeroed pickup counters
    pub fn color_names(&self) -> impl Iterator<Item = &ColorName> {
        self.profiles.keys()
    }
}

/// Map a settings validation failure onto the engine error
pub(crate) fn settings_error(err: SettingsError) -> Error {
    match err {
        SettingsError::Template(gcode) => Error::Gcode(gcode),
        SettingsError::InvalidSetting { key, reason } => Error::InvalidSetting { key, reason },
        SettingsError::Config(ConfigError::ValueOutOfRange { key, value }) => {
            Error::InvalidSetting {
                key,
                reason: format!("value {} is out of range", value),
            }
        }
        SettingsError::Config(ConfigError::UnknownColor {
            color,
            referenced_by,
        }) => Error::InvalidSetting {
            key: referenced_by,
            reason: format!("unknown color '{}'", color),
        },
        other => Error::other(other.to_string()),
    }
}

/// Layer announced by the section marker at the window's current line
pub fn find_section_layer<'a>(window: &LineWindow<'a>) -> Option<&'a str> {
    (1..=SECTION_LOOKAHEAD_LINES)
        .filter_map(|offset| window.ahead(offset))
        .find_map(|command| command.layer_id())
}

/// Whether a layer marker outside a section starts a layer
pub fn honors_bare_marker(section_pending: bool, active_layer: Option<&str>) -> bool {
    !section_pending && active_layer.is_none()
}
