//! Scratch directories: one isolated download directory per run.
//!
//! `ScratchDir::create` allocates a fresh, uniquely named directory; the
//! directory is removed by `destroy` or, failing that, when the handle drops.
//! `destroy_dir` is also usable on its own for any directory tree.

use crate::error::{io_at, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default name prefix for scratch directories.
pub const DEFAULT_PREFIX: &str = "dlcheck_downloads_";

/// A directory owned exclusively by the run that created it.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    // false once destroyed or kept; drop then leaves the path alone
    armed: bool,
}

impl ScratchDir {
    /// Create a new empty directory named `<prefix><random>` under `parent`
    /// (the system temp dir when `None`).
    pub fn create(prefix: &str, parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let tmp = match parent {
            Some(p) => builder.tempdir_in(p).map_err(io_at("create scratch dir in", p))?,
            None => {
                let base = std::env::temp_dir();
                builder
                    .tempdir_in(&base)
                    .map_err(io_at("create scratch dir in", &base))?
            }
        };
        let path = tmp.keep();
        tracing::debug!(path = %path.display(), "created scratch dir");
        Ok(ScratchDir { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it.
    pub fn destroy(mut self) -> Result<()> {
        self.armed = false;
        destroy_dir(&self.path)
    }

    /// Give up ownership: the directory survives the handle.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = destroy_dir(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "scratch dir cleanup failed");
        }
    }
}

/// Recursively delete `path`, deepest entries first, then `path` itself.
///
/// A missing path is not an error. Symlinks are unlinked, not followed.
pub fn destroy_dir(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_at("stat", path)(e)),
    };
    if !meta.is_dir() {
        return remove_entry(path, |p| fs::remove_file(p));
    }
    let entries = match fs::read_dir(path) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_at("read dir", path)(e)),
    };
    for entry in entries {
        let entry = entry.map_err(io_at("read dir", path))?;
        let child = entry.path();
        let ft = entry.file_type().map_err(io_at("stat", &child))?;
        if ft.is_dir() {
            destroy_dir(&child)?;
        } else {
            remove_entry(&child, |p| fs::remove_file(p))?;
        }
    }
    remove_entry(path, |p| fs::remove_dir(p))?;
    tracing::debug!(path = %path.display(), "destroyed directory");
    Ok(())
}

// Something else removing the entry first is fine.
fn remove_entry(path: &Path, remove: fn(&Path) -> io::Result<()>) -> Result<()> {
    match remove(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_at("remove", path)(e)),
    }
}
