//! `dlcheck wait` – block until a download is stable.

use crate::cli::WaitArgs;
use anyhow::{bail, Result};
use dlcheck_core::config::DlcheckConfig;
use dlcheck_core::stability::{StabilityPoller, WaitOutcome};

pub fn run_wait(cfg: &DlcheckConfig, args: &WaitArgs) -> Result<()> {
    let poller = StabilityPoller::new(cfg.poll_policy()?)?;
    let target = args.target(cfg)?;
    match poller.wait(&target, None)? {
        WaitOutcome::Ready(file) => {
            println!("{}", file.path.display());
            Ok(())
        }
        WaitOutcome::TimedOut(report) | WaitOutcome::Cancelled(report) => bail!("{report}"),
    }
}
