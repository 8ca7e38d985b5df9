//! Driver scan state

use std::collections::BTreeMap;

use brushograph_core::{ColorName, LayerId, PathId, DEFAULT_LAYER_ID, NO_PATH_ID};

use crate::motion::MotionState;
use crate::report::MaintenanceEvent;

/// Everything the forward scan mutates, owned by one driver run
#[derive(Debug, Clone)]
pub struct ScanState {
    /// Position, contact flag and distance counters
    pub motion: MotionState,
    /// A section marker was seen and its layer marker has not been reached
    pub section_pending: bool,
    /// Layer started by the last confirmed transition
    pub active_layer: Option<LayerId>,
    /// Color of the last pickup
    pub active_color: Option<ColorName>,
    /// Path of the last path marker
    pub current_path: PathId,
    /// Pickups emitted per color, washes included
    pub pickup_counts: BTreeMap<ColorName, u32>,
    /// Distance-triggered insertions
    pub events: Vec<MaintenanceEvent>,
}

impl ScanState {
    /// Fresh state with a zeroed counter for every color
    pub fn new<'a>(colors: impl IntoIterator<Item = &'a ColorName>) -> Self {
        Self {
            motion: MotionState::new(),
            section_pending: false,
            active_layer: None,
            active_color: None,
            current_path: NO_PATH_ID.to_string(),
            pickup_counts: colors.into_iter().map(|c| (c.clone(), 0)).collect(),
            events: Vec::new(),
        }
    }

    /// Layer drawn distance is attributed to
    pub fn attribution_layer(&self) -> &str {
        self.active_layer.as_deref().unwrap_or(DEFAULT_LAYER_ID)
    }

    /// Count one pickup of `color`
    pub fn count_pickup(&mut self, color: &str) {
        *self.pickup_counts.entry(color.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let colors = vec!["Color 1".to_string(), "Washing".to_string()];
        let state = ScanState::new(&colors);
        assert_eq!(state.attribution_layer(), "default");
        assert_eq!(state.current_path, "None");
        assert_eq!(state.pickup_counts.len(), 2);
        assert!(state.pickup_counts.values().all(|&count| count == 0));
        assert!(state.active_color.is_none());
    }

    #[test]
    fn test_count_pickup() {
        let mut state = ScanState::new(std::iter::empty());
        state.count_pickup("Color 2");
        state.count_pickup("Color 2");
        assert_eq!(state.pickup_counts["Color 2"], 2);
    }
}
