//! Sources a finished trial's log text can be read from.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::LogError;

/// Log file the benchmark writes when no other location is configured.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Anything that can hand over the complete text of a trial log.
///
/// Implementations must release any handle they open before returning, on
/// success and on failure alike.
pub trait LogSource {
    fn read_text(&self) -> Result<String, LogError>;

    /// Short description used in error messages and log records.
    fn describe(&self) -> String;
}

impl<T: LogSource + ?Sized> LogSource for &T {
    fn read_text(&self) -> Result<String, LogError> {
        (**self).read_text()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A log stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl LogSource for FileLog {
    fn read_text(&self) -> Result<String, LogError> {
        let unreadable = |error| LogError::Unreadable {
            source_name: self.describe(),
            error,
        };

        // The handle is dropped when this scope ends, whatever the outcome.
        let mut file = File::open(&self.path).map_err(unreadable)?;
        let mut text = String::new();
        file.read_to_string(&mut text).map_err(unreadable)?;
        Ok(text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A log already held in memory, e.g. captured from a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLog {
    text: String,
}

impl InMemoryLog {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LogSource for InMemoryLog {
    fn read_text(&self) -> Result<String, LogError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("<memory:{} bytes>", self.text.len())
    }
}
