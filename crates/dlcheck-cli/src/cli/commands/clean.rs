//! `dlcheck clean` – remove a directory tree.

use anyhow::Result;
use dlcheck_core::scratch;
use std::path::Path;

pub fn run_clean(path: &Path) -> Result<()> {
    scratch::destroy_dir(path)?;
    tracing::info!("removed {}", path.display());
    Ok(())
}
