//! # Brushograph Core
//!
//! Core types and error handling shared by the Brushograph crates.

pub mod error;
pub mod types;

pub use error::{Error, FileError, GcodeError, Result};

pub use types::{ColorName, LayerId, PathId, Point2D, DEFAULT_LAYER_ID, NO_PATH_ID};
