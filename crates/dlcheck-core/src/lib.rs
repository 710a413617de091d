//! dlcheck core: decide when an externally written download is complete,
//! then verify it.
//!
//! The usual flow in a test run:
//!
//! 1. [`scratch::ScratchDir::create`] an isolated download directory and point
//!    the browser at it.
//! 2. Trigger the download, then build a [`stability::DownloadTarget`] and run
//!    [`verify::verify_download`].
//! 3. Assert on the [`verify::VerifyOutcome`]; drop or destroy the scratch dir.

pub mod checksum;
pub mod config;
pub mod control;
pub mod error;
pub mod logging;
pub mod scratch;
pub mod stability;
pub mod user_store;
pub mod verify;

pub use error::{Error, Result};
