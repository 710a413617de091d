//! `dlcheck scratch` – create a download directory for an external run.

use anyhow::Result;
use dlcheck_core::config::DlcheckConfig;
use dlcheck_core::scratch::ScratchDir;

/// The directory is kept on exit; remove it later with `dlcheck clean`.
pub fn run_scratch(cfg: &DlcheckConfig) -> Result<()> {
    let dir = ScratchDir::create(&cfg.scratch_prefix, cfg.scratch_parent.as_deref())?;
    let path = dir.keep();
    println!("{}", path.display());
    Ok(())
}
