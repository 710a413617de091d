//! In-progress suffixes and candidate resolution.

use super::target::{DownloadTarget, ExpectedName};
use crate::error::{io_at, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffixes browsers and download tools leave on unfinished files:
/// Chrome's `.crdownload`, the `.part` used by Firefox (and by segmented
/// downloaders before rename), and generic `.tmp`.
pub const DEFAULT_IN_PROGRESS_SUFFIXES: &[&str] = &[".crdownload", ".part", ".tmp"];

/// True if `name` ends with any of `suffixes`, ignoring ASCII case.
pub fn has_in_progress_suffix<S: AsRef<str>>(name: &str, suffixes: &[S]) -> bool {
    let lower = name.to_ascii_lowercase();
    suffixes
        .iter()
        .any(|s| lower.ends_with(&s.as_ref().to_ascii_lowercase()))
}

/// Find the file the target refers to, if it currently exists.
///
/// For an exact name this is `directory/name` when present. For a fragment,
/// every directory entry whose name contains it is a match; entries without an
/// in-progress suffix win, then the lexically smallest name. A missing
/// directory is treated as "not there yet".
pub fn resolve_candidate<S: AsRef<str>>(
    target: &DownloadTarget,
    suffixes: &[S],
) -> Result<Option<PathBuf>> {
    match target.name() {
        ExpectedName::Exact(name) => {
            let path = target.directory().join(name);
            match fs::metadata(&path) {
                Ok(m) if m.is_file() => Ok(Some(path)),
                Ok(_) => Ok(None),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(io_at("stat", &path)(e)),
            }
        }
        ExpectedName::Fragment(fragment) => scan_for_fragment(target.directory(), fragment, suffixes),
    }
}

fn scan_for_fragment<S: AsRef<str>>(
    dir: &Path,
    fragment: &str,
    suffixes: &[S],
) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_at("read dir", dir)(e)),
    };
    let mut best: Option<(bool, String, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(io_at("read dir", dir))?;
        // a lossy rendering would name a file that does not exist
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if !name.contains(fragment) {
            continue;
        }
        // entries vanishing mid-scan are normal while a browser renames
        match entry.file_type() {
            Ok(ft) if ft.is_file() => {}
            _ => continue,
        }
        let in_progress = has_in_progress_suffix(&name, suffixes);
        let better = best
            .as_ref()
            .map_or(true, |(b_prog, b_name, _)| (in_progress, &name) < (*b_prog, b_name));
        if better {
            best = Some((in_progress, name, entry.path()));
        }
    }
    Ok(best.map(|(_, _, path)| path))
}
