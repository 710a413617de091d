//! One size-sample pair taken across the settle window.

use super::name::has_in_progress_suffix;
use crate::error::{io_at, Result};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Two sizes of the same path, `size_at_t0` before the settle sleep and
/// `size_at_t1` after it. Recomputed on every poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilitySample {
    pub size_at_t0: u64,
    pub size_at_t1: u64,
    pub name_has_incomplete_suffix: bool,
}

impl StabilitySample {
    /// Equal non-zero sizes and no in-progress suffix.
    pub fn is_stable(&self) -> bool {
        self.size_at_t0 == self.size_at_t1 && self.size_at_t0 > 0 && !self.name_has_incomplete_suffix
    }
}

/// Size of `path`, or `None` if it is gone.
fn current_size(path: &Path) -> Result<Option<u64>> {
    match fs::metadata(path) {
        Ok(m) => Ok(Some(m.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_at("stat", path)(e)),
    }
}

/// Sample `path` twice, `settle` apart.
///
/// Returns `None` when the file is missing at either sample, so a file that
/// disappears during the window never produces a decision.
pub fn sample_stability<S: AsRef<str>>(
    path: &Path,
    settle: Duration,
    suffixes: &[S],
) -> Result<Option<StabilitySample>> {
    let Some(size_at_t0) = current_size(path)? else {
        return Ok(None);
    };
    std::thread::sleep(settle);
    let Some(size_at_t1) = current_size(path)? else {
        return Ok(None);
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(StabilitySample {
        size_at_t0,
        size_at_t1,
        name_has_incomplete_suffix: has_in_progress_suffix(&name, suffixes),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stability::DEFAULT_IN_PROGRESS_SUFFIXES;

    fn sample(t0: u64, t1: u64, partial: bool) -> StabilitySample {
        StabilitySample {
            size_at_t0: t0,
            size_at_t1: t1,
            name_has_incomplete_suffix: partial,
        }
    }

    #[test]
    fn stability_rules() {
        assert!(sample(10, 10, false).is_stable());
        assert!(!sample(10, 12, false).is_stable());
        assert!(!sample(0, 0, false).is_stable());
        assert!(!sample(10, 10, true).is_stable());
    }

    #[test]
    fn missing_file_gives_no_sample() {
        let dir = tempfile::tempdir().unwrap();
        let s = sample_stability(
            &dir.path().join("nope"),
            Duration::from_millis(1),
            DEFAULT_IN_PROGRESS_SUFFIXES,
        )
        .unwrap();
        assert!(s.is_none());
    }

    #[test]
    fn sample_reads_sizes_and_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("movie.mp4.crdownload");
        fs::write(&p, b"12345").unwrap();
        let s = sample_stability(&p, Duration::from_millis(5), DEFAULT_IN_PROGRESS_SUFFIXES)
            .unwrap()
            .unwrap();
        assert_eq!(s, sample(5, 5, true));
        assert!(!s.is_stable());
    }
}
