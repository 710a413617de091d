//! Download stability polling.
//!
//! The browser (or whatever produces the file) gives no completion signal, so
//! completion is inferred from the filesystem: the file must exist, keep the
//! same non-zero size across a settle window, and not carry an in-progress
//! suffix such as `.crdownload`. One sample pair per iteration decides; a
//! slow download that pauses longer than the settle window can be accepted
//! early.

mod name;
mod poll;
mod sample;
mod target;

pub use name::{has_in_progress_suffix, resolve_candidate, DEFAULT_IN_PROGRESS_SUFFIXES};
pub use poll::{wait_for_stable_file, PollPolicy, StableFile, StabilityPoller, WaitOutcome, WaitReport};
pub use sample::{sample_stability, StabilitySample};
pub use target::{DownloadTarget, ExpectedName};
