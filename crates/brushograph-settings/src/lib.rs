//! Brushograph Settings Crate
//!
//! Handles optimizer configuration, the layer color table and the built-in
//! maintenance sequences.

pub mod config;
pub mod error;
pub mod profiles;
pub mod templates;

pub use config::{Config, OptimizerSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use profiles::{ColorProfile, ColorTable, MaintenanceTemplate, WASHING};
pub use templates::offset_x;
