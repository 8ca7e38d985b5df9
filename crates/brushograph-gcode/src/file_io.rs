//! File I/O
//!
//! Thin collaborator around the optimizer: loads the whole input into a line
//! buffer and commits the assembled output with a single write. A read failure
//! is fatal and surfaces as [`FileError::InputRead`] before anything is written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use brushograph_core::{FileError, Result};
use serde::{Deserialize, Serialize};

/// Suffix appended to the input stem for the default output name
pub const OPTIMIZED_SUFFIX: &str = "_optimized";

/// File read statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total lines read
    pub lines_read: u64,
    /// Lines that ended in `\r\n`
    pub crlf_lines: u64,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
}

/// G-code file reader
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Errors
    /// Returns [`FileError::InputRead`] if the file does not exist and
    /// [`FileError::NotAFile`] if the path is a directory or similar.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let metadata = fs::metadata(&path).map_err(|e| FileError::InputRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(FileError::NotAFile {
                path: path.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            path,
            file_size: metadata.len(),
        })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entire file into memory
    ///
    /// # Errors
    /// Returns [`FileError::InputRead`] if the file cannot be read or is not
    /// valid UTF-8
    pub fn read_all(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| self.read_error(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| self.read_error(e.to_string()).into())
    }

    /// Read the file as a buffer of lines with line terminators removed
    ///
    /// Both `\n` and `\r\n` terminators are accepted, and a missing final
    /// terminator does not produce an extra empty line.
    pub fn read_lines(&self) -> Result<(Vec<String>, FileReadStats)> {
        let start_time = SystemTime::now();
        let content = self.read_all()?;

        let crlf_lines = content.matches("\r\n").count() as u64;
        let lines: Vec<String> = content.lines().map(str::to_string).collect();

        let stats = FileReadStats {
            bytes_read: content.len() as u64,
            lines_read: lines.len() as u64,
            crlf_lines,
            read_time_ms: start_time.elapsed().unwrap_or_default().as_millis() as u64,
        };

        tracing::debug!(
            "Read {} lines ({} bytes) from {}",
            stats.lines_read,
            stats.bytes_read,
            self.path.display()
        );

        Ok((lines, stats))
    }

    fn read_error(&self, reason: String) -> FileError {
        FileError::InputRead {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

/// Write the complete output in one operation
///
/// # Errors
/// Returns [`FileError::OutputWrite`] if the file cannot be written
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|e| FileError::OutputWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Default output path: `<stem>_optimized<ext>` in the working directory
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OPTIMIZED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OPTIMIZED_SUFFIX),
    };
    PathBuf::from(name)
}
