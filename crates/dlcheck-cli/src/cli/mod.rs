//! CLI for dlcheck.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dlcheck_core::config::{self, DlcheckConfig};
use dlcheck_core::stability::{DownloadTarget, ExpectedName};
use std::path::{Path, PathBuf};
use std::time::Duration;

use commands::{run_checksum, run_clean, run_scratch, run_verify, run_wait};

/// Top-level CLI for dlcheck.
#[derive(Debug, Parser)]
#[command(name = "dlcheck")]
#[command(about = "dlcheck: wait for downloads to finish and verify them", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dlcheck/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which file to wait for, and for how long.
#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Directory the download lands in.
    pub dir: PathBuf,

    /// Expected file name.
    pub name: String,

    /// Give up after this many seconds (default from config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Treat NAME as a fragment: any file whose name contains it matches.
    #[arg(long)]
    pub fragment: bool,
}

impl WaitArgs {
    /// Build the target; the clock starts here.
    pub fn target(&self, cfg: &DlcheckConfig) -> Result<DownloadTarget> {
        let timeout = self
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| cfg.default_timeout());
        let name = if self.fragment {
            ExpectedName::Fragment(self.name.clone())
        } else {
            ExpectedName::Exact(self.name.clone())
        };
        Ok(DownloadTarget::new(&self.dir, name, timeout)?)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Wait until a download is complete and print its path.
    Wait {
        #[command(flatten)]
        args: WaitArgs,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Wait for a download, then checksum it (optionally against an expected digest).
    Verify {
        #[command(flatten)]
        args: WaitArgs,

        /// Expected SHA-256 hex digest; mismatch is an error.
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create a scratch download directory and print its path.
    Scratch,

    /// Recursively delete a directory (no error if it is already gone).
    Clean {
        /// Directory to remove.
        path: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<DlcheckConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Wait { args } => run_wait(&cfg, &args)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Verify { args, expect, json } => {
                run_verify(&cfg, &args, expect.as_deref(), json)?
            }
            CliCommand::Scratch => run_scratch(&cfg)?,
            CliCommand::Clean { path } => run_clean(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
