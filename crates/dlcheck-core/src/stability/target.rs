//! What the poller is waiting for.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How the expected file is identified inside the download directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedName {
    /// Exactly this file name.
    Exact(String),
    /// Any entry whose name contains this fragment (browsers may rename on
    /// collision, e.g. `report (1).pdf`).
    Fragment(String),
}

impl ExpectedName {
    pub fn as_str(&self) -> &str {
        match self {
            ExpectedName::Exact(s) | ExpectedName::Fragment(s) => s,
        }
    }
}

/// A pending download: directory, expected name and absolute deadline.
/// Immutable once created.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    directory: PathBuf,
    name: ExpectedName,
    started: Instant,
    deadline: Instant,
}

impl DownloadTarget {
    /// Start the clock now; the deadline is `now + timeout`.
    ///
    /// Rejects a zero timeout and an empty or path-like name.
    pub fn new(directory: impl Into<PathBuf>, name: ExpectedName, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::invalid("timeout must be positive"));
        }
        let raw = name.as_str();
        if raw.is_empty() {
            return Err(Error::invalid("expected file name is empty"));
        }
        if raw.contains('/') || raw.contains(std::path::MAIN_SEPARATOR) {
            return Err(Error::invalid(format!(
                "expected file name must not contain a path separator: {raw}"
            )));
        }
        let started = Instant::now();
        Ok(DownloadTarget {
            directory: directory.into(),
            name,
            started,
            deadline: started + timeout,
        })
    }

    /// Shorthand for an exact file name.
    pub fn exact(directory: impl Into<PathBuf>, name: &str, timeout: Duration) -> Result<Self> {
        Self::new(directory, ExpectedName::Exact(name.to_string()), timeout)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn name(&self) -> &ExpectedName {
        &self.name
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Path reported when nothing better is known (no candidate ever seen).
    pub fn nominal_path(&self) -> PathBuf {
        self.directory.join(self.name.as_str())
    }
}
