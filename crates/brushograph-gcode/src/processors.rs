//! Output line processors
//!
//! Rewrites applied to source lines when move normalization is enabled. Each
//! rewrite replaces a whole line with a commented, machine-friendly variant.

use std::sync::Arc;

use regex::Regex;

use crate::pipeline::{LineProcessor, ProcessorPipeline};

/// Rewritten raise command
pub const RAISE_BRUSH_LINE: &str = "G1 Z3 F1000;         ; Raise brush";
/// Rewritten surface positioning command
pub const SURFACE_LINE: &str = "G1 Z0 F1000;         ; Position at surface";
/// Rewritten plunge command
pub const PLUNGE_LINE: &str = "G1 Z-0.1 F1000;      ; Plunge brush to painting depth";

/// Rewrites the fixed-precision Z moves emitted by the toolpath generator
///
/// - `G1 Z3.0000` becomes a commented raise
/// - `G1 Z0.0000` becomes a commented surface positioning
/// - `G1 Z-0.1000 F500` becomes a commented plunge at painting depth
#[derive(Debug, Clone, Default)]
pub struct ZMoveNormalizer;

impl ZMoveNormalizer {
    /// Create a new Z move normalizer
    pub fn new() -> Self {
        Self
    }
}

impl LineProcessor for ZMoveNormalizer {
    fn name(&self) -> &str {
        "z_move_normalizer"
    }

    fn process(&self, line: &str) -> Result<Vec<String>, String> {
        let rewritten = if line.contains("G1 Z3.0000") {
            RAISE_BRUSH_LINE
        } else if line.contains("G1 Z0.0000") {
            SURFACE_LINE
        } else if line.contains("G1 Z-0.1000 F500") {
            PLUNGE_LINE
        } else {
            return Ok(vec![line.to_string()]);
        };
        Ok(vec![rewritten.to_string()])
    }
}

/// Turns a full-line `G1 X.. Y.. F1200` travel into a `G0` reposition
#[derive(Debug, Clone, Default)]
pub struct RepositionRewriter;

impl RepositionRewriter {
    /// Create a new reposition rewriter
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static REPOSITION_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
        REPOSITION_REGEX
            .get_or_init(|| Regex::new(r"^G1 (X.*Y.* F1200)$").expect("invalid regex pattern"))
    }
}

impl LineProcessor for RepositionRewriter {
    fn name(&self) -> &str {
        "reposition_rewriter"
    }

    fn process(&self, line: &str) -> Result<Vec<String>, String> {
        match Self::regex().captures(line) {
            Some(caps) => Ok(vec![format!(
                "G0 {}   ; Move to starting position",
                &caps[1]
            )]),
            None => Ok(vec![line.to_string()]),
        }
    }
}

/// Pipeline with every move normalization rewrite registered
pub fn normalization_pipeline() -> ProcessorPipeline {
    let mut pipeline = ProcessorPipeline::new();
    pipeline
        .register(Arc::new(ZMoveNormalizer::new()))
        .register(Arc::new(RepositionRewriter::new()));
    pipeline
}
