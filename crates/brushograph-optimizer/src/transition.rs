//! Transition-safety classification
//!
//! Once the drawn distance since the last maintenance passes the threshold,
//! every motion line is graded for how safe it is to pause the stroke there.
//! The best tier that applies wins; `None` means keep drawing.

use std::fmt;

use brushograph_gcode::Command;
use brushograph_settings::OptimizerSettings;
use serde::{Deserialize, Serialize};

use crate::window::LineWindow;

/// Lines searched for an upcoming lift before forcing an insertion
pub const FORCED_LOOKAHEAD_LINES: usize = 20;
/// A lift this close makes a forced insertion wait for it
pub const DEFER_WITHIN_LINES: usize = 10;
/// Multiple of the threshold at which insertion is unconditional
pub const EMERGENCY_MULTIPLIER: f64 = 3.0;

/// How good the insertion point was
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    /// At a rapid lift, or anywhere in aggressive mode
    Ideal,
    /// At the end of a stroke, right before a reposition
    Good,
    /// Past the force multiplier with no lift coming up
    Forced,
    /// Past three times the threshold
    Emergency,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Ideal => write!(f, "IDEAL"),
            Urgency::Good => write!(f, "GOOD"),
            Urgency::Forced => write!(f, "FORCED"),
            Urgency::Emergency => write!(f, "EMERGENCY"),
        }
    }
}

/// Grades insertion points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionClassifier {
    distance_threshold: f64,
    force_multiplier: f64,
    aggressive: bool,
}

impl TransitionClassifier {
    /// Create a classifier
    pub fn new(distance_threshold: f64, force_multiplier: f64, aggressive: bool) -> Self {
        Self {
            distance_threshold,
            force_multiplier,
            aggressive,
        }
    }

    /// Create a classifier from optimizer settings
    pub fn from_settings(settings: &OptimizerSettings) -> Self {
        Self::new(
            settings.distance_threshold,
            settings.force_multiplier,
            settings.aggressive,
        )
    }

    /// Whether a maintenance insertion is due
    pub fn is_due(&self, since_mm: f64) -> bool {
        since_mm > self.distance_threshold
    }

    /// Distance at which insertion is forced
    pub fn forced_bound(&self) -> f64 {
        self.force_multiplier * self.distance_threshold
    }

    /// Distance at which insertion is unconditional
    pub fn emergency_bound(&self) -> f64 {
        EMERGENCY_MULTIPLIER * self.distance_threshold
    }

    /// Grade the current line of `window`
    pub fn classify(&self, since_mm: f64, window: &LineWindow<'_>) -> Option<Urgency> {
        if !self.is_due(since_mm) || !window.current().is_motion() {
            return None;
        }

        self.preferred(since_mm, window).or_else(|| {
            (since_mm >= self.emergency_bound()).then_some(Urgency::Emergency)
        })
    }

    fn preferred(&self, since_mm: f64, window: &LineWindow<'_>) -> Option<Urgency> {
        if self.aggressive || window.current().is_lift() {
            return Some(Urgency::Ideal);
        }

        let after_stroke = window.previous().is_some_and(Command::is_draw);
        let before_reposition = window.next().is_some_and(Command::is_reposition);
        if after_stroke && before_reposition {
            return Some(Urgency::Good);
        }

        if since_mm < self.forced_bound() {
            return None;
        }

        match window.find_ahead(FORCED_LOOKAHEAD_LINES, Command::is_lift) {
            Some(offset) if offset < DEFER_WITHIN_LINES => {
                tracing::debug!(
                    "Lift {} lines after line {}, deferring insertion at {:.2}mm",
                    offset,
                    window.index() + 1,
                    since_mm
                );
                None
            }
            _ => Some(Urgency::Forced),
        }
    }
}
