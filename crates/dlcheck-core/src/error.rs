//! Error type shared by the core library.
//!
//! Timeouts and cancellation are not errors: the poller reports them as
//! outcomes carrying a `WaitReport`. Only bad input and filesystem failures
//! end up here.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before any filesystem work starts (zero timeout, empty name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A concrete filesystem operation failed.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fixture file is not the expected JSON shape.
    #[error("fixture {}: {source}", .path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Adapter for `map_err`: tags an `io::Error` with the operation and path.
pub(crate) fn io_at<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Error + 'a {
    move |source| Error::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_op_and_path() {
        let err = io_at("open", Path::new("/tmp/x.bin"))(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.starts_with("open /tmp/x.bin: "), "got {msg}");
    }

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid("timeout must be positive");
        assert_eq!(err.to_string(), "invalid argument: timeout must be positive");
    }
}
