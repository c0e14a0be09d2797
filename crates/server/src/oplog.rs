//! Append-only operational error log.
//!
//! One timestamped line per error. Writes stop once the file reaches its size
//! cap; there is no rotation and no locking, so concurrent writers may
//! overshoot the cap by a line or two.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

pub struct OpLog {
    path: PathBuf,
    max_bytes: u64,
}

impl OpLog {
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` as `YYYY-MM-DD HH:MM:SS | message`.
    ///
    /// Failures are traced and otherwise swallowed so that logging never
    /// changes the response of the request being handled.
    pub fn record(&self, message: &str) {
        if let Err(e) = self.append(message) {
            warn!(path = %self.path.display(), error = %e, "failed to write operational log");
        }
    }

    /// Returns `Ok(false)` when the line was skipped because the file is at
    /// its cap.
    fn append(&self, message: &str) -> std::io::Result<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.len() >= self.max_bytes => return Ok(false),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        let line = format!("{} | {message}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(true)
    }
}
