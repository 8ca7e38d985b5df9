//! Motion state tracking
//!
//! Follows the brush position and contact state, and accumulates drawn
//! distance into the total, per-layer, per-path, since-maintenance and segment
//! counters.

use std::collections::BTreeMap;

use brushograph_core::{LayerId, PathId, Point2D};
use brushograph_gcode::MotionCommand;
use brushograph_settings::OptimizerSettings;

/// Position, contact flag and distance counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionState {
    /// Most recent XY target
    pub current_position: Option<Point2D>,
    /// XY target before the current one
    pub previous_position: Option<Point2D>,
    /// Brush is in contact with the paper
    pub drawing: bool,
    /// Drawn distance since the last maintenance insertion or layer start
    pub since_maintenance_mm: f64,
    /// Drawn distance since the last pickup of any kind
    pub segment_mm: f64,
    /// Total drawn distance
    pub total_mm: f64,
    /// Drawn distance per layer
    pub layer_mm: BTreeMap<LayerId, f64>,
    /// Drawn distance per path
    pub path_mm: BTreeMap<PathId, f64>,
}

impl MotionState {
    /// Create a new state with no position and the brush raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one motion line
    ///
    /// Contact changes are evaluated first, independently of XY. Positions
    /// update only when both X and Y are present. Distance is added only for a
    /// well-formed draw-type move while drawing from a known position.
    ///
    /// Returns the distance added, if any.
    pub fn apply(
        &mut self,
        motion: &MotionCommand,
        layer: &str,
        path: &str,
        settings: &OptimizerSettings,
    ) -> Option<f64> {
        if motion.is_retract(settings.retract_min_z) {
            self.drawing = false;
        }
        if motion.is_plunge(settings.contact_z) {
            self.drawing = true;
        }

        let target = motion.xy()?;
        self.previous_position = self.current_position.replace(target);

        if !self.drawing || motion.rapid || !motion.is_well_formed() {
            return None;
        }

        let distance = self.previous_position?.distance_to(&target);
        self.add_distance(distance, layer, path);
        Some(distance)
    }

    fn add_distance(&mut self, distance: f64, layer: &str, path: &str) {
        self.total_mm += distance;
        self.since_maintenance_mm += distance;
        self.segment_mm += distance;
        *self.layer_mm.entry(layer.to_string()).or_insert(0.0) += distance;
        *self.path_mm.entry(path.to_string()).or_insert(0.0) += distance;
    }

    /// Zero the since-maintenance and segment counters
    pub fn reset_maintenance(&mut self) {
        self.since_maintenance_mm = 0.0;
        self.segment_mm = 0.0;
    }

    /// Make sure a layer has a length entry
    pub fn ensure_layer(&mut self, layer: &str) {
        self.layer_mm.entry(layer.to_string()).or_insert(0.0);
    }

    /// Start a path, resetting its length
    pub fn start_path(&mut self, path: &str) {
        self.path_mm.insert(path.to_string(), 0.0);
    }
}
