//! Typed G-Code line commands
//!
//! Every source line is classified exactly once into a [`Command`]. Downstream
//! logic works on these variants instead of re-matching the raw text.

use brushograph_core::Point2D;
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing a Z word against the contact height
pub const Z_EPSILON: f64 = 1e-9;

/// A `G0`/`G1` motion line with its extracted words
///
/// Missing words are `None`. A word whose numeric value could not be parsed is
/// also `None`, and its letter is recorded in `invalid_words`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionCommand {
    /// Target X (mm)
    pub x: Option<f64>,
    /// Target Y (mm)
    pub y: Option<f64>,
    /// Target Z, the brush depth (mm)
    pub z: Option<f64>,
    /// Feed rate (F word)
    pub feed: Option<f64>,
    /// Signal power (S word)
    pub power: Option<f64>,
    /// `G0` reposition rather than a `G1` draw-type move
    pub rapid: bool,
    /// Letters of words that carried a malformed numeric value
    pub invalid_words: Vec<char>,
}

impl MotionCommand {
    /// Create a rapid (`G0`) motion with no words
    pub fn rapid() -> Self {
        Self {
            rapid: true,
            ..Self::default()
        }
    }

    /// Create a draw-type (`G1`) motion with no words
    pub fn linear() -> Self {
        Self::default()
    }

    /// Set the XY target
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the Z target
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Set the feed rate
    pub fn with_feed(mut self, feed: f64) -> Self {
        self.feed = Some(feed);
        self
    }

    /// XY target, only when both X and Y are present
    pub fn xy(&self) -> Option<Point2D> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point2D::new(x, y)),
            _ => None,
        }
    }

    /// Whether every numeric word on the line parsed cleanly
    pub fn is_well_formed(&self) -> bool {
        self.invalid_words.is_empty()
    }

    /// `G1` move carrying an X or Y word
    pub fn is_draw(&self) -> bool {
        !self.rapid && (self.x.is_some() || self.y.is_some())
    }

    /// `G0` move of any kind
    pub fn is_reposition(&self) -> bool {
        self.rapid
    }

    /// `G0` move that raises Z above the surface
    pub fn is_lift(&self) -> bool {
        self.rapid && self.z.is_some_and(|z| z > 0.0)
    }

    /// Z raised to at least `min_z`
    pub fn is_retract(&self, min_z: f64) -> bool {
        self.z.is_some_and(|z| z >= min_z)
    }

    /// Z lowered exactly to `contact_z`
    pub fn is_plunge(&self, contact_z: f64) -> bool {
        self.z.is_some_and(|z| (z - contact_z).abs() < Z_EPSILON)
    }
}

/// A classified G-Code line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// `G0`/`G1` motion
    Motion(MotionCommand),
    /// `;Layer <id>` comment
    LayerMarker {
        /// Layer identifier
        id: String,
    },
    /// `; Path <n>` comment
    PathMarker {
        /// Path identifier
        id: String,
    },
    /// Section start (`M8`), usually followed by a layer marker
    SectionMarker {
        /// The marker word, e.g. "M8"
        kind: String,
    },
    /// Anything else; passed through untouched
    Other,
}

impl Command {
    /// Motion payload, if this is a motion line
    pub fn as_motion(&self) -> Option<&MotionCommand> {
        match self {
            Command::Motion(motion) => Some(motion),
            _ => None,
        }
    }

    /// Whether this is a motion line
    pub fn is_motion(&self) -> bool {
        matches!(self, Command::Motion(_))
    }

    /// Layer id, if this is a layer marker
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            Command::LayerMarker { id } => Some(id),
            _ => None,
        }
    }

    /// Draw-type motion (`G1` with X or Y)
    pub fn is_draw(&self) -> bool {
        self.as_motion().is_some_and(MotionCommand::is_draw)
    }

    /// Rapid reposition (`G0`)
    pub fn is_reposition(&self) -> bool {
        self.as_motion().is_some_and(MotionCommand::is_reposition)
    }

    /// Rapid lift (`G0` with positive Z)
    pub fn is_lift(&self) -> bool {
        self.as_motion().is_some_and(MotionCommand::is_lift)
    }
}
