//! Structure analysis
//!
//! Counts the motion patterns of a drawing without optimizing it. A drawing
//! area is a rapid lift, immediately followed by a rapid XY reposition and then
//! a draw-type move down to the contact height.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Result of [`analyze`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// Number of input lines
    pub total_lines: usize,
    /// Lift, reposition, contact triples
    pub drawing_areas: usize,
    /// Rapid moves raising Z above the surface
    pub lift_moves: usize,
    /// Draw-type moves to the contact height
    pub contact_moves: usize,
    /// Rapid moves carrying X or Y
    pub reposition_moves: usize,
    /// Motion lines with a malformed numeric word; their distance is skipped
    pub malformed_moves: usize,
}

impl fmt::Display for StructureAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total lines: {}", self.total_lines)?;
        writeln!(f, "  Detected drawing areas: {}", self.drawing_areas)?;
        writeln!(f, "  Z movements (lifts): {}", self.lift_moves)?;
        writeln!(f, "  Z0 movements (drawing): {}", self.contact_moves)?;
        writeln!(f, "  G0 positioning moves: {}", self.reposition_moves)?;
        write!(f, "  Malformed motion lines: {}", self.malformed_moves)
    }
}

fn is_xy_reposition(command: &Command) -> bool {
    command
        .as_motion()
        .is_some_and(|m| m.rapid && m.xy().is_some())
}

fn is_contact(command: &Command, contact_z: f64) -> bool {
    command
        .as_motion()
        .is_some_and(|m| !m.rapid && m.is_plunge(contact_z))
}

/// Analyze a classified line buffer
pub fn analyze(commands: &[Command], contact_z: f64) -> StructureAnalysis {
    let mut analysis = StructureAnalysis {
        total_lines: commands.len(),
        ..StructureAnalysis::default()
    };

    for (index, command) in commands.iter().enumerate() {
        let Some(motion) = command.as_motion() else {
            continue;
        };

        if motion.is_lift() {
            analysis.lift_moves += 1;
            if let [next, after, ..] = &commands[index + 1..] {
                if is_xy_reposition(next) && is_contact(after, contact_z) {
                    analysis.drawing_areas += 1;
                    tracing::debug!("Drawing area at line {}", index + 2);
                }
            }
        }

        if is_contact(command, contact_z) {
            analysis.contact_moves += 1;
        }

        if motion.rapid && (motion.x.is_some() || motion.y.is_some()) {
            analysis.reposition_moves += 1;
        }

        if !motion.is_well_formed() {
            analysis.malformed_moves += 1;
            tracing::debug!(
                "Malformed {:?} on line {}",
                motion.invalid_words,
                index + 1
            );
        }
    }

    analysis
}
