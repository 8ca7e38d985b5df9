//! # Brushograph Optimizer
//!
//! Single-pass engine that inserts color pickups and brush washes into a
//! plotter's G-Code at geometrically safe points.
//!
//! ```ignore
//! let optimizer = Optimizer::new(&Config::default())?;
//! let result = optimizer.optimize(&lines);
//! println!("{}", result.report.summary());
//! ```

pub mod assembler;
pub mod driver;
pub mod injector;
pub mod layers;
pub mod motion;
pub mod report;
pub mod state;
pub mod transition;
pub mod window;

pub use assembler::OutputAssembler;
pub use driver::{OptimizationResult, Optimizer, PROGRESS_INTERVAL};
pub use injector::{is_recovery_comment, MaintenanceInjector, RECOVERY_COMMENT};
pub use layers::{ColorResolver, ResolvedProfile, SECTION_LOOKAHEAD_LINES};
pub use motion::MotionState;
pub use report::{MaintenanceEvent, RunReport};
pub use state::ScanState;
pub use transition::{
    TransitionClassifier, Urgency, DEFER_WITHIN_LINES, EMERGENCY_MULTIPLIER,
    FORCED_LOOKAHEAD_LINES,
};
pub use window::LineWindow;
