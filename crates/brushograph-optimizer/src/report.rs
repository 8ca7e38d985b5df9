//! Run report
//!
//! Read-only summary of a run: distances per layer and path, the
//! distance-triggered maintenance log and pickup counts.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use brushograph_core::{ColorName, Error, LayerId, PathId, Result};
use serde::{Deserialize, Serialize};

use crate::transition::Urgency;

/// A distance-triggered maintenance insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    /// Layer being drawn
    pub layer: LayerId,
    /// Color picked up
    pub color: ColorName,
    /// Distance drawn since the previous maintenance (mm)
    pub length_mm: f64,
    /// Insertion point grade
    pub urgency: Urgency,
    /// 1-based input line the insertion follows
    pub line_number: usize,
}

/// Summary of one optimizer run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Total drawn distance (mm)
    pub total_length_mm: f64,
    /// Drawn distance per layer (mm)
    pub layer_lengths: BTreeMap<LayerId, f64>,
    /// Drawn distance per path (mm)
    pub path_lengths: BTreeMap<PathId, f64>,
    /// Distance-triggered insertions in order
    pub maintenance_events: Vec<MaintenanceEvent>,
    /// Pickups per color, washes included
    pub pickup_counts: BTreeMap<ColorName, u32>,
    /// Distance drawn after the last maintenance (mm)
    pub residual_mm: f64,
    /// Input lines processed
    pub lines_read: usize,
    /// Output lines written, preamble and closing included
    pub lines_written: usize,
}

impl RunReport {
    /// Number of distance-triggered insertions with the given urgency
    pub fn count_urgency(&self, urgency: Urgency) -> usize {
        self.maintenance_events
            .iter()
            .filter(|event| event.urgency == urgency)
            .count()
    }

    /// Total pickups across all colors
    pub fn total_pickups(&self) -> u32 {
        self.pickup_counts.values().sum()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Summary:");
        let _ = writeln!(
            out,
            "Total drawing path length: {:.2} mm ({:.2} meters)",
            self.total_length_mm,
            self.total_length_mm / 1000.0
        );

        let _ = writeln!(out, "\nLayer Lengths:");
        for (layer, length) in &self.layer_lengths {
            let _ = writeln!(out, "Layer {}: {:.2} mm", layer, length);
        }

        let _ = writeln!(out, "\nPath Segments Between Color Pickups:");
        for event in &self.maintenance_events {
            let _ = writeln!(
                out,
                "Layer {}, Color {}: {:.2} mm ({})",
                event.layer, event.color, event.length_mm, event.urgency
            );
        }

        let _ = writeln!(out, "\nInsertion Points:");
        for urgency in [
            Urgency::Ideal,
            Urgency::Good,
            Urgency::Forced,
            Urgency::Emergency,
        ] {
            let _ = writeln!(out, "{}: {}", urgency, self.count_urgency(urgency));
        }

        let _ = writeln!(out, "\nColor Pickup Insertions:");
        for (color, count) in self.pickup_counts.iter().filter(|(_, &count)| count > 0) {
            let _ = writeln!(out, "{}: {} pickups added", color, count);
        }

        out
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("Failed to serialize report: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport {
            total_length_mm: 1234.5,
            layer_lengths: [("Green".to_string(), 1234.5)].into_iter().collect(),
            maintenance_events: vec![MaintenanceEvent {
                layer: "Green".to_string(),
                color: "Color 1".to_string(),
                length_mm: 101.25,
                urgency: Urgency::Ideal,
                line_number: 42,
            }],
            pickup_counts: [("Color 1".to_string(), 2), ("Washing".to_string(), 0)]
                .into_iter()
                .collect(),
            ..RunReport::default()
        }
    }

    #[test]
    fn test_summary_text() {
        let text = sample().summary();
        assert!(text.contains("Total drawing path length: 1234.50 mm (1.23 meters)"));
        assert!(text.contains("Layer Green: 1234.50 mm"));
        assert!(text.contains("Layer Green, Color Color 1: 101.25 mm (IDEAL)"));
        assert!(text.contains("Color 1: 2 pickups added"));
        assert!(text.contains("IDEAL: 1\nGOOD: 0\nFORCED: 0\nEMERGENCY: 0"));
        assert!(!text.contains("Washing:"));
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.total_pickups(), 2);
        assert_eq!(report.count_urgency(Urgency::Ideal), 1);
        assert_eq!(report.count_urgency(Urgency::Forced), 0);
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["maintenance_events"][0]["urgency"], "IDEAL");
        assert_eq!(value["pickup_counts"]["Color 1"], 2);
    }
}
