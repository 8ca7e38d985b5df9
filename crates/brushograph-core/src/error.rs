//! Error handling for Brushograph
//!
//! Provides the error types shared by every layer of the optimizer:
//! - File errors (reading the input stream, committing the output)
//! - G-Code errors (maintenance templates and other authored blocks)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// File error type
///
/// Raised by the file collaborator around the engine. A read failure is fatal
/// and aborts the run before any output is produced.
#[derive(Error, Debug, Clone)]
pub enum FileError {
    /// Input could not be read (missing, unreadable, not UTF-8)
    #[error("Failed to read input '{path}': {reason}")]
    InputRead {
        /// The path that was being read.
        path: String,
        /// The reason the read failed.
        reason: String,
    },

    /// Output could not be written
    #[error("Failed to write output '{path}': {reason}")]
    OutputWrite {
        /// The path that was being written.
        path: String,
        /// The reason the write failed.
        reason: String,
    },

    /// Path exists but is not a regular file
    #[error("Path is not a file: {path}")]
    NotAFile {
        /// The offending path.
        path: String,
    },
}

/// G-Code error type
///
/// Represents errors in G-Code that the optimizer authors or loads itself,
/// such as maintenance templates. Errors in the input stream are never fatal.
#[derive(Error, Debug, Clone)]
pub enum GcodeError {
    /// A maintenance template contains a motion line that cannot be parsed
    #[error("Invalid template '{template}' at line {line_number}: {reason}")]
    InvalidTemplate {
        /// The template (color profile) name.
        template: String,
        /// The 1-based line number inside the template.
        line_number: u32,
        /// The reason the line was rejected.
        reason: String,
    },

    /// Generic G-Code error
    #[error("G-Code error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for Brushograph
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// File error
    #[error(transparent)]
    File(#[from] FileError),

    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration value rejected at startup
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Setting key, e.g. `optimizer.distance_threshold`
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a file error
    pub fn is_file_error(&self) -> bool {
        matches!(self, Error::File(_))
    }

    /// Check if this is the fatal input read error
    pub fn is_input_read_error(&self) -> bool {
        matches!(self, Error::File(FileError::InputRead { .. }))
    }

    /// Check if this is a rejected configuration value
    pub fn is_invalid_setting(&self) -> bool {
        matches!(self, Error::InvalidSetting { .. })
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
