//! # Brushograph
//!
//! G-Code optimizer for multi-color painting plotters. Reads a plot, inserts
//! color pickups and brush washes where pausing the stroke is safe, and writes
//! the result next to a run report.
//!
//! ## Architecture
//!
//! Brushograph is organized as a workspace with multiple crates:
//!
//! 1. **brushograph-core** - Errors and geometry types
//! 2. **brushograph-gcode** - Line classifier, line processors, file I/O, analysis
//! 3. **brushograph-settings** - Configuration, color table, maintenance templates
//! 4. **brushograph-optimizer** - The single-pass insertion engine and its report
//! 5. **brushograph** - Logging setup, run helpers and the CLI binary

use std::path::{Path, PathBuf};

use anyhow::Context;

pub use brushograph_core::{Error, FileError, GcodeError, Point2D, Result};
pub use brushograph_gcode::{
    analyze, classify_all, default_output_path, write_output, Command, FileReadStats,
    GcodeFileReader, StructureAnalysis,
};
pub use brushograph_optimizer::{
    MaintenanceEvent, OptimizationResult, Optimizer, RunReport, Urgency,
};
pub use brushograph_settings::{ColorTable, Config, OptimizerSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - stderr output, so the summary on stdout stays clean
/// - RUST_LOG environment variable support, falling back to INFO or DEBUG
/// - JSON lines instead of text when `json` is set
pub fn init_logging(debug: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(debug)
            .with_level(true)
            .with_line_number(debug)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

/// Options for one optimizer run, after command line parsing
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Input G-Code file
    pub input: PathBuf,
    /// Output file; `<stem>_optimized<ext>` when absent
    pub output: Option<PathBuf>,
    /// Config file; the platform default is used when absent and present on disk
    pub config: Option<PathBuf>,
    /// Overrides `optimizer.distance_threshold`
    pub distance_threshold: Option<f64>,
    /// Overrides `optimizer.force_multiplier`
    pub force_multiplier: Option<f64>,
    /// Forces `optimizer.aggressive` on
    pub aggressive: bool,
    /// Forces `optimizer.debug` on
    pub debug: bool,
    /// Forces `optimizer.normalize_moves` on
    pub normalize: bool,
    /// Where to write the JSON run report
    pub report_json: Option<PathBuf>,
}

impl RunOptions {
    /// Options for `input` with everything else left to the config
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Apply command line overrides on top of file values
    pub fn apply_overrides(&self, config: &mut Config) {
        let optimizer = &mut config.optimizer;
        if let Some(distance) = self.distance_threshold {
            optimizer.distance_threshold = distance;
        }
        if let Some(multiplier) = self.force_multiplier {
            optimizer.force_multiplier = multiplier;
        }
        optimizer.aggressive |= self.aggressive;
        optimizer.debug |= self.debug;
        optimizer.normalize_moves |= self.normalize;
    }

    /// Resolved output path
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// Load the configuration for a run
///
/// An explicit path must exist; otherwise the platform config file is used
/// when present, and built-in defaults when not.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::load_default().context("Failed to load default config")? {
            Some(config) => {
                tracing::debug!("Using config from {:?}", Config::default_path());
                config
            }
            None => Config::default(),
        },
    };
    Ok(config)
}

/// Outcome of [`run_optimize`]
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Where the optimized G-Code was written
    pub output_path: PathBuf,
    /// Input read statistics
    pub read_stats: FileReadStats,
    /// Run report
    pub report: RunReport,
}

/// Read, optimize and write one file
///
/// Nothing is written unless the input was read in full.
pub fn run_optimize(options: &RunOptions, mut config: Config) -> anyhow::Result<RunOutcome> {
    options.apply_overrides(&mut config);
    let optimizer = Optimizer::new(&config).context("Invalid optimizer configuration")?;

    let reader = GcodeFileReader::new(&options.input)?;
    let (lines, read_stats) = reader.read_lines()?;
    tracing::info!(
        "Read {} lines ({} bytes) from {} in {} ms",
        read_stats.lines_read,
        read_stats.bytes_read,
        options.input.display(),
        read_stats.read_time_ms
    );

    let settings = optimizer.settings();
    tracing::info!(
        "Distance threshold {:.1} mm, force multiplier {:.1}, aggressive {}",
        settings.distance_threshold,
        settings.force_multiplier,
        settings.aggressive
    );

    let OptimizationResult { output, report } = optimizer.optimize(&lines);

    let output_path = options.output_path();
    write_output(&output_path, &output)?;
    tracing::info!(
        "Wrote {} lines to {}",
        report.lines_written,
        output_path.display()
    );

    if let Some(report_path) = &options.report_json {
        write_output(report_path, &report.to_json()?)?;
        tracing::info!("Wrote run report to {}", report_path.display());
    }

    Ok(RunOutcome {
        output_path,
        read_stats,
        report,
    })
}

/// Count drawing structure in a file without optimizing it
pub fn run_analyze(input: &Path, contact_z: f64) -> anyhow::Result<StructureAnalysis> {
    let reader = GcodeFileReader::new(input)?;
    let (lines, _) = reader.read_lines()?;
    let commands = classify_all(&lines);
    Ok(analyze(&commands, contact_z))
}
