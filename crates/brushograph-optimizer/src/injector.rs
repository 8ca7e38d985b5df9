//! Maintenance injection
//!
//! Builds the lines inserted after the current source line: an optional wash,
//! the color pickup and, when a stroke was interrupted, the moves that put the
//! brush back where it left off.

use crate::layers::ColorResolver;
use crate::report::MaintenanceEvent;
use crate::state::ScanState;
use crate::transition::Urgency;
use crate::window::LineWindow;

/// Comment heading the stroke recovery moves
pub const RECOVERY_COMMENT: &str = "; Return to drawing position";

/// Emits maintenance sequences and keeps the scan state's counters in step
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceInjector<'a> {
    resolver: &'a ColorResolver,
    contact_z: f64,
}

impl<'a> MaintenanceInjector<'a> {
    /// Create an injector over a resolved color table
    pub fn new(resolver: &'a ColorResolver, contact_z: f64) -> Self {
        Self {
            resolver,
            contact_z,
        }
    }

    /// Confirmed transition to layer `id`
    ///
    /// Resets the maintenance counters, washes if the color changes and picks
    /// up the layer's color. Layer-start pickups are not logged as events.
    pub fn start_layer(&self, state: &mut ScanState, id: &str) -> Vec<String> {
        state.motion.reset_maintenance();
        state.motion.ensure_layer(id);

        let profile = self.resolver.resolve(id);
        tracing::info!("Layer {} - Using {}", id, profile.name);

        let mut lines = self.color_change(state, &profile.name);
        lines.extend(profile.lines.iter().cloned());
        state.count_pickup(&profile.name);

        state.active_layer = Some(id.to_string());
        state.active_color = Some(profile.name.clone());
        lines
    }

    /// Distance-triggered insertion after the window's current line
    pub fn maintain(
        &self,
        state: &mut ScanState,
        window: &LineWindow<'_>,
        urgency: Urgency,
    ) -> Vec<String> {
        let layer = state.attribution_layer().to_string();
        let profile = self.resolver.resolve(&layer);
        let length_mm = state.motion.since_maintenance_mm;

        tracing::debug!(
            "{} {} pickup after {:.2} mm at line {}",
            urgency,
            profile.name,
            length_mm,
            window.index() + 1
        );

        let mut lines = self.color_change(state, &profile.name);
        lines.extend(profile.lines.iter().cloned());
        state.count_pickup(&profile.name);
        state.active_color = Some(profile.name.clone());

        state.events.push(MaintenanceEvent {
            layer,
            color: profile.name.clone(),
            length_mm,
            urgency,
            line_number: window.index() + 1,
        });
        state.motion.reset_maintenance();

        if let Some(recovery) = self.recovery(state, window) {
            lines.extend(recovery);
        }
        lines
    }

    fn color_change(&self, state: &mut ScanState, next_color: &str) -> Vec<String> {
        let previous = match state.active_color.as_deref() {
            Some(previous) if previous != next_color => previous.to_string(),
            _ => return Vec::new(),
        };

        tracing::debug!(
            "Adding washing sequence for color change: {} -> {}",
            previous,
            next_color
        );
        let wash = self.resolver.wash();
        state.count_pickup(&wash.name);
        wash.lines.clone()
    }

    /// Moves back to the interrupted stroke, if one was interrupted
    pub fn recovery(&self, state: &ScanState, window: &LineWindow<'_>) -> Option<Vec<String>> {
        let next = window.next()?;
        let interrupted = state.motion.drawing
            && next.is_draw()
            && !window.current().is_lift()
            && !next.is_reposition();
        if !interrupted {
            return None;
        }

        let position = state.motion.current_position?;
        Some(vec![
            RECOVERY_COMMENT.to_string(),
            format!("G0 X{:.3} Y{:.3} F1200", position.x, position.y),
            format!("G1 Z{} F1000", self.contact_z),
        ])
    }
}

/// Whether a line is a recovery comment
pub fn is_recovery_comment(line: &str) -> bool {
    line.trim() == RECOVERY_COMMENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use brushograph_core::Point2D;
    use brushograph_gcode::classify_all;
    use brushograph_settings::ColorTable;

    fn resolver() -> ColorResolver {
        ColorResolver::new(&ColorTable::builtin()).unwrap()
    }

    fn fresh_state(resolver: &ColorResolver) -> ScanState {
        ScanState::new(resolver.color_names())
    }

    #[test]
    fn test_first_layer_has_no_wash() {
        let resolver = resolver();
        let injector = MaintenanceInjector::new(&resolver, 0.0);
        let mut state = fresh_state(&resolver);
        state.motion.since_maintenance_mm = 40.0;

        let lines = injector.start_layer(&mut state, "Green");

        assert_eq!(lines, resolver.resolve("Green").lines);
        assert_eq!(state.pickup_counts["Color 1"], 1);
        assert_eq!(state.pickup_counts["Washing"], 0);
        assert_eq!(state.motion.since_maintenance_mm, 0.0);
        assert_eq!(state.active_layer.as_deref(), Some("Green"));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_color_change_washes_first() {
        let resolver = resolver();
        let injector = MaintenanceInjector::new(&resolver, 0.0);
        let mut state = fresh_state(&resolver);
        injector.start_layer(&mut state, "Green");

        let lines = injector.start_layer(&mut state, "Blue");

        let wash_len = resolver.wash().lines.len();
        assert_eq!(&lines[..wash_len], resolver.wash().lines.as_slice());
        assert_eq!(&lines[wash_len..], resolver.resolve("Blue").lines.as_slice());
        assert_eq!(state.pickup_counts["Washing"], 1);

        // Same color again: no wash.
        let lines = injector.start_layer(&mut state, "Blue");
        assert_eq!(lines, resolver.resolve("Blue").lines);
        assert_eq!(state.pickup_counts["Washing"], 1);
    }

    #[test]
    fn test_maintain_logs_and_resets() {
        let resolver = resolver();
        let injector = MaintenanceInjector::new(&resolver, 0.0);
        let mut state = fresh_state(&resolver);
        injector.start_layer(&mut state, "Red");
        state.motion.since_maintenance_mm = 150.0;
        state.motion.segment_mm = 150.0;

        let commands = classify_all(&["G1 X1 Y1", "G0 Z5", "G0 X9 Y9"]);
        let window = LineWindow::new(&commands, 1).unwrap();
        let lines = injector.maintain(&mut state, &window, Urgency::Ideal);

        assert_eq!(lines, resolver.resolve("Red").lines);
        assert_eq!(state.motion.since_maintenance_mm, 0.0);
        assert_eq!(state.motion.segment_mm, 0.0);
        assert_eq!(state.pickup_counts["Color 3"], 2);
        assert_eq!(
            state.events,
            vec![MaintenanceEvent {
                layer: "Red".to_string(),
                color: "Color 3".to_string(),
                length_mm: 150.0,
                urgency: Urgency::Ideal,
                line_number: 2,
            }]
        );
    }

    #[test]
    fn test_recovery_after_interrupted_stroke() {
        let resolver = resolver();
        let injector = MaintenanceInjector::new(&resolver, 0.0);
        let mut state = fresh_state(&resolver);
        state.motion.drawing = true;
        state.motion.current_position = Some(Point2D::new(12.5, 3.0));

        let commands = classify_all(&["G1 X12.5 Y3", "G1 X13 Y3"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(
            injector.recovery(&state, &window),
            Some(vec![
                "; Return to drawing position".to_string(),
                "G0 X12.500 Y3.000 F1200".to_string(),
                "G1 Z0 F1000".to_string(),
            ])
        );
    }

    #[test]
    fn test_no_recovery_cases() {
        let resolver = resolver();
        let injector = MaintenanceInjector::new(&resolver, 0.0);
        let mut state = fresh_state(&resolver);
        state.motion.drawing = true;
        state.motion.current_position = Some(Point2D::new(1.0, 1.0));

        // Next line is a reposition.
        let commands = classify_all(&["G1 X1 Y1", "G0 X5 Y5"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(injector.recovery(&state, &window), None);

        // Current line is a lift.
        let commands = classify_all(&["G0 Z5", "G1 X2 Y2"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(injector.recovery(&state, &window), None);

        // Last line of the buffer.
        let commands = classify_all(&["G1 X1 Y1"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(injector.recovery(&state, &window), None);

        // Brush raised.
        state.motion.drawing = false;
        let commands = classify_all(&["G1 X1 Y1", "G1 X2 Y2"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(injector.recovery(&state, &window), None);
    }

    #[test]
    fn test_recovery_comment() {
        assert!(is_recovery_comment("; Return to drawing position"));
        assert!(!is_recovery_comment("; Return"));
    }
}
