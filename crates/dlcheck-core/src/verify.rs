//! Wait for a download, then checksum it.

use crate::checksum;
use crate::control::CancelToken;
use crate::error::Result;
use crate::stability::{DownloadTarget, StabilityPoller, WaitOutcome, WaitReport};
use serde::Serialize;
use std::path::PathBuf;

/// A download that passed the stability check and was hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedFile {
    path: PathBuf,
    size_bytes: u64,
    digest_hex: String,
}

impl VerifiedFile {
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Lowercase SHA-256 hex digest.
    pub fn digest_hex(&self) -> &str {
        &self.digest_hex
    }

    pub fn matches_digest(&self, expected: &str) -> bool {
        checksum::digests_match(&self.digest_hex, expected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified(VerifiedFile),
    TimedOut(WaitReport),
    Cancelled(WaitReport),
}

/// Run the poller on `target` and hash the accepted file.
///
/// Checksum failures (e.g. the file was deleted right after acceptance)
/// propagate as errors; they are not folded into a timeout.
pub fn verify_download(
    poller: &StabilityPoller,
    target: &DownloadTarget,
    cancel: Option<&CancelToken>,
) -> Result<VerifyOutcome> {
    let stable = match poller.wait(target, cancel)? {
        WaitOutcome::Ready(f) => f,
        WaitOutcome::TimedOut(r) => return Ok(VerifyOutcome::TimedOut(r)),
        WaitOutcome::Cancelled(r) => return Ok(VerifyOutcome::Cancelled(r)),
    };
    let digest_hex = checksum::sha256_path(&stable.path)?;
    tracing::info!(
        path = %stable.path.display(),
        size = stable.size,
        algorithm = checksum::ALGORITHM,
        digest = %digest_hex,
        "download verified"
    );
    Ok(VerifyOutcome::Verified(VerifiedFile {
        path: stable.path,
        size_bytes: stable.size,
        digest_hex,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stability::PollPolicy;
    use std::time::Duration;

    fn poller() -> StabilityPoller {
        StabilityPoller::new(PollPolicy {
            poll_interval: Duration::from_millis(10),
            settle_window: Duration::from_millis(30),
            ..PollPolicy::default()
        })
        .unwrap()
    }

    #[test]
    fn verified_file_carries_size_and_digest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc.txt"), b"abc").unwrap();
        let target = DownloadTarget::exact(dir.path(), "abc.txt", Duration::from_secs(2)).unwrap();
        match verify_download(&poller(), &target, None).unwrap() {
            VerifyOutcome::Verified(v) => {
                assert_eq!(v.size_bytes(), 3);
                assert!(v.matches_digest(
                    "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
                ));
                assert!(!v.matches_digest("00"));
            }
            other => panic!("expected verified, got {other:?}"),
        }
    }

    #[test]
    fn timeout_passes_report_through() {
        let dir = tempfile::tempdir().unwrap();
        let target = DownloadTarget::exact(dir.path(), "late.txt", Duration::from_millis(50)).unwrap();
        assert!(matches!(
            verify_download(&poller(), &target, None).unwrap(),
            VerifyOutcome::TimedOut(_)
        ));
    }

    #[test]
    fn serializes_for_reports() {
        let v = VerifiedFile {
            path: PathBuf::from("/tmp/a"),
            size_bytes: 1,
            digest_hex: "ab".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["size_bytes"], 1);
        assert_eq!(json["digest_hex"], "ab");
    }
}
