//! The poll loop.

use super::name::{resolve_candidate, DEFAULT_IN_PROGRESS_SUFFIXES};
use super::sample::sample_stability;
use super::target::DownloadTarget;
use crate::control::CancelToken;
use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Timing and naming rules for a poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Sleep between iterations when nothing acceptable was found.
    pub poll_interval: Duration,
    /// Gap between the two size samples of one iteration.
    pub settle_window: Duration,
    /// Names ending in any of these are never accepted.
    pub in_progress_suffixes: Vec<String>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            settle_window: Duration::from_millis(1000),
            in_progress_suffixes: DEFAULT_IN_PROGRESS_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PollPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::invalid("poll interval must be positive"));
        }
        if self.settle_window.is_zero() {
            return Err(Error::invalid("settle window must be positive"));
        }
        if self.in_progress_suffixes.iter().any(|s| s.is_empty()) {
            return Err(Error::invalid("in-progress suffixes must not be empty strings"));
        }
        Ok(())
    }
}

/// A file that passed the stability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableFile {
    pub path: PathBuf,
    /// Size agreed on by both samples.
    pub size: u64,
}

/// Diagnostics for a wait that ended without a stable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReport {
    /// Last candidate seen, or `directory/name` if none ever appeared.
    pub path: PathBuf,
    pub elapsed: Duration,
    /// Size from the last completed sample pair, if any.
    pub last_size: Option<u64>,
    /// Number of loop iterations run.
    pub polls: u32,
}

impl fmt::Display for WaitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no stable file at {} after {:.1}s ({} polls",
            self.path.display(),
            self.elapsed.as_secs_f64(),
            self.polls
        )?;
        match self.last_size {
            Some(n) => write!(f, ", last observed size {} bytes)", n),
            None => write!(f, ", file never observed)"),
        }
    }
}

/// Terminal state of a wait. Only filesystem errors are `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready(StableFile),
    TimedOut(WaitReport),
    Cancelled(WaitReport),
}

impl WaitOutcome {
    pub fn ready(self) -> Option<StableFile> {
        match self {
            WaitOutcome::Ready(f) => Some(f),
            WaitOutcome::TimedOut(_) | WaitOutcome::Cancelled(_) => None,
        }
    }
}

/// Poll loop bound to a validated policy.
#[derive(Debug, Clone)]
pub struct StabilityPoller {
    policy: PollPolicy,
}

impl StabilityPoller {
    pub fn new(policy: PollPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Block until the target's file is stable, the deadline passes, or
    /// `cancel` is set. The deadline is fixed by the target and never extended.
    pub fn wait(&self, target: &DownloadTarget, cancel: Option<&CancelToken>) -> Result<WaitOutcome> {
        let suffixes = &self.policy.in_progress_suffixes;
        let deadline = target.deadline();
        let mut last_path: Option<PathBuf> = None;
        let mut last_size: Option<u64> = None;
        let mut polls = 0u32;

        let report = |last_path: Option<PathBuf>, last_size, polls| WaitReport {
            path: last_path.unwrap_or_else(|| target.nominal_path()),
            elapsed: target.started().elapsed(),
            last_size,
            polls,
        };

        while Instant::now() < deadline {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                let r = report(last_path, last_size, polls);
                tracing::info!(path = %r.path.display(), "wait cancelled");
                return Ok(WaitOutcome::Cancelled(r));
            }
            polls += 1;

            if let Some(path) = resolve_candidate(target, suffixes)? {
                match sample_stability(&path, self.policy.settle_window, suffixes)? {
                    Some(sample) if sample.is_stable() => {
                        tracing::info!(
                            path = %path.display(),
                            size = sample.size_at_t1,
                            polls,
                            "download stable"
                        );
                        return Ok(WaitOutcome::Ready(StableFile {
                            path,
                            size: sample.size_at_t1,
                        }));
                    }
                    Some(sample) => {
                        tracing::debug!(
                            path = %path.display(),
                            t0 = sample.size_at_t0,
                            t1 = sample.size_at_t1,
                            in_progress = sample.name_has_incomplete_suffix,
                            "not stable yet"
                        );
                        last_size = Some(sample.size_at_t1);
                    }
                    None => {
                        tracing::debug!(path = %path.display(), "candidate vanished during settle window");
                    }
                }
                last_path = Some(path);
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(self.policy.poll_interval.min(deadline - now));
        }

        let r = report(last_path, last_size, polls);
        tracing::info!(
            path = %r.path.display(),
            elapsed_ms = r.elapsed.as_millis() as u64,
            last_size = ?r.last_size,
            "wait timed out"
        );
        Ok(WaitOutcome::TimedOut(r))
    }
}

/// Wait up to `timeout` for `directory/name` to become stable with the
/// default policy. `Ok(None)` means it did not arrive in time.
pub fn wait_for_stable_file(directory: &Path, name: &str, timeout: Duration) -> Result<Option<PathBuf>> {
    let target = DownloadTarget::exact(directory, name, timeout)?;
    let poller = StabilityPoller::new(PollPolicy::default())?;
    Ok(poller.wait(&target, None)?.ready().map(|f| f.path))
}
