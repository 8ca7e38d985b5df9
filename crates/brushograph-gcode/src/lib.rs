//! # Brushograph G-Code
//!
//! Line-level G-Code handling for the optimizer: the line classifier, output
//! line processors, file I/O and structure analysis.

pub mod analysis;
pub mod command;
pub mod file_io;
pub mod parser;
pub mod pipeline;
pub mod processors;

pub use analysis::{analyze, StructureAnalysis};
pub use command::{Command, MotionCommand, Z_EPSILON};
pub use file_io::{default_output_path, write_output, FileReadStats, GcodeFileReader};
pub use parser::{classify, classify_all, code_part};
pub use pipeline::{LineProcessor, ProcessorHandle, ProcessorPipeline};
pub use processors::{normalization_pipeline, RepositionRewriter, ZMoveNormalizer};
