//! Optimization driver
//!
//! One forward pass over a fully loaded line buffer. Every line is classified
//! up front; the scan then walks the buffer once, emitting each source line
//! followed by whatever the layer resolver or the transition classifier
//! decided to insert after it.

use brushograph_core::Result;
use brushograph_gcode::{classify_all, normalization_pipeline, Command, ProcessorPipeline};
use brushograph_settings::{Config, OptimizerSettings};

use crate::assembler::OutputAssembler;
use crate::injector::MaintenanceInjector;
use crate::layers::{find_section_layer, honors_bare_marker, settings_error, ColorResolver};
use crate::report::RunReport;
use crate::state::ScanState;
use crate::transition::TransitionClassifier;
use crate::window::LineWindow;

/// Lines between progress diagnostics in debug mode
pub const PROGRESS_INTERVAL: usize = 100;

/// Output text and report of one run
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Rewritten G-Code, one `\n` per line
    pub output: String,
    /// Distances, events and counts
    pub report: RunReport,
}

/// Maintenance insertion engine
///
/// Holds only immutable configuration; each [`Optimizer::optimize`] call owns
/// its own scan state, so a run is deterministic for a given input.
pub struct Optimizer {
    settings: OptimizerSettings,
    resolver: ColorResolver,
    classifier: TransitionClassifier,
    pipeline: Option<ProcessorPipeline>,
}

impl Optimizer {
    /// Create an optimizer from a configuration
    ///
    /// # Errors
    /// Returns an error if the optimizer settings are out of range or the color
    /// table does not validate.
    pub fn new(config: &Config) -> Result<Self> {
        config.optimizer.validate().map_err(settings_error)?;

        let resolver = ColorResolver::new(&config.colors)?;
        let pipeline = config
            .optimizer
            .normalize_moves
            .then(normalization_pipeline);

        Ok(Self {
            settings: config.optimizer.clone(),
            classifier: TransitionClassifier::from_settings(&config.optimizer),
            resolver,
            pipeline,
        })
    }

    /// Optimizer settings in effect
    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Run the scan over `lines`
    pub fn optimize<S: AsRef<str>>(&self, lines: &[S]) -> OptimizationResult {
        let commands = classify_all(lines);
        let injector = MaintenanceInjector::new(&self.resolver, self.settings.contact_z);
        let mut state = ScanState::new(self.resolver.color_names());

        let size_hint: usize = lines.iter().map(|l| l.as_ref().len() + 1).sum();
        let mut out = OutputAssembler::with_capacity(size_hint + size_hint / 4);
        out.push_lines(self.resolver.preamble());

        for (index, line) in lines.iter().enumerate() {
            let Some(window) = LineWindow::new(&commands, index) else {
                break;
            };
            self.emit_source_line(&mut out, line.as_ref());

            let inserted = self.step(&mut state, &injector, &window);
            out.push_lines(inserted);

            let processed = index + 1;
            if self.settings.debug && processed % PROGRESS_INTERVAL == 0 {
                tracing::debug!(
                    "Processed {} lines so far, current path length: {:.2}mm",
                    processed,
                    state.motion.total_mm
                );
            }
        }

        out.push_lines(self.resolver.closing());

        let report = RunReport {
            total_length_mm: state.motion.total_mm,
            layer_lengths: state.motion.layer_mm,
            path_lengths: state.motion.path_mm,
            maintenance_events: state.events,
            pickup_counts: state.pickup_counts,
            residual_mm: state.motion.since_maintenance_mm,
            lines_read: lines.len(),
            lines_written: out.line_count(),
        };

        tracing::info!(
            "Optimized {} lines: {:.2} mm drawn, {} distance pickups",
            report.lines_read,
            report.total_length_mm,
            report.maintenance_events.len()
        );

        OptimizationResult {
            output: out.finish(),
            report,
        }
    }

    fn emit_source_line(&self, out: &mut OutputAssembler, line: &str) {
        match &self.pipeline {
            Some(pipeline) => out.push_lines(pipeline.process_line_or_keep(line)),
            None => out.push_line(line),
        }
    }

    /// Process the window's current line; returns the lines to insert after it
    fn step(
        &self,
        state: &mut ScanState,
        injector: &MaintenanceInjector<'_>,
        window: &LineWindow<'_>,
    ) -> Vec<String> {
        match window.current() {
            Command::SectionMarker { .. } => {
                state.section_pending = true;
                match find_section_layer(window) {
                    Some(id) if state.active_layer.as_deref() != Some(id) => {
                        tracing::info!("Layer transition to {}", id);
                        injector.start_layer(state, id)
                    }
                    _ => Vec::new(),
                }
            }
            Command::LayerMarker { id } => {
                let honored =
                    honors_bare_marker(state.section_pending, state.active_layer.as_deref());
                state.section_pending = false;
                if honored {
                    tracing::info!("Layer label {} starts the first layer", id);
                    injector.start_layer(state, id)
                } else {
                    Vec::new()
                }
            }
            Command::PathMarker { id } => {
                if let Some(length) = state.motion.path_mm.get(&state.current_path) {
                    tracing::debug!("Path {} length: {:.2} mm", state.current_path, length);
                }
                state.current_path = id.clone();
                state.motion.start_path(id);
                Vec::new()
            }
            Command::Motion(motion) => {
                if !motion.is_well_formed() {
                    tracing::debug!(
                        "Malformed {:?} on line {}, distance skipped",
                        motion.invalid_words,
                        window.index() + 1
                    );
                }

                let layer = state.attribution_layer().to_string();
                let path = state.current_path.clone();
                state.motion.apply(motion, &layer, &path, &self.settings);

                match self
                    .classifier
                    .classify(state.motion.since_maintenance_mm, window)
                {
                    Some(urgency) => injector.maintain(state, window, urgency),
                    None => Vec::new(),
                }
            }
            Command::Other => Vec::new(),
        }
    }
}
