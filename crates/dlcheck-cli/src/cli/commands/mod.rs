//! CLI command handlers, one per file.

mod checksum;
mod clean;
mod scratch;
mod verify;
mod wait;

pub use checksum::run_checksum;
pub use clean::run_clean;
pub use scratch::run_scratch;
pub use verify::run_verify;
pub use wait::run_wait;
