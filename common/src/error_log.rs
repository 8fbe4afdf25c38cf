//! # Error log
//!
//! Append-only journal of everything that went wrong during a run but did not stop it.
//! Each entry is one line of the form `row <n>:<context> -> <reason>`, where `n` is the
//! line of the target file the event traces back to.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::fmt::Display;

use tracing::warn;

use crate::error::ScanError;

pub const DEFAULT_ERROR_LOG: &str = "log_err.txt";

pub struct ErrorLog {
    file: Option<(PathBuf, File)>,
    entries: Vec<String>,
}

impl ErrorLog {
    /// Opens (or creates) `path` in append mode. Existing content is kept.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ScanError::config(path, e))?;

        Ok(Self {
            file: Some((path.to_path_buf(), file)),
            entries: Vec::new(),
        })
    }

    /// A log that only keeps entries in memory.
    pub fn in_memory() -> Self {
        Self {
            file: None,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, row: usize, context: impl Display, reason: impl Display) {
        let entry = format!("row {row}:{context} -> {reason}");

        if let Some((path, file)) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{entry}") {
                warn!("Could not append to {}: {e}", path.display());
            }
        }

        self.entries.push(entry);
    }

    /// Entries recorded by this instance, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|(path, _)| path.as_path())
    }
}
