//! `dlcheck verify` – wait, hash, and optionally compare against an expected digest.

use crate::cli::WaitArgs;
use anyhow::{bail, Result};
use dlcheck_core::checksum;
use dlcheck_core::config::DlcheckConfig;
use dlcheck_core::stability::{StabilityPoller, WaitReport};
use dlcheck_core::verify::{verify_download, VerifiedFile, VerifyOutcome};
use serde_json::{json, Value};

pub fn run_verify(
    cfg: &DlcheckConfig,
    args: &WaitArgs,
    expect: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let poller = StabilityPoller::new(cfg.poll_policy()?)?;
    let target = args.target(cfg)?;
    let (status, report) = match verify_download(&poller, &target, None)? {
        VerifyOutcome::Verified(file) => {
            let matches = expect.map(|e| file.matches_digest(e));
            if as_json {
                println!("{}", verified_json(&file, matches));
            } else {
                println!(
                    "{}  {}  ({} bytes)",
                    file.digest_hex(),
                    file.path().display(),
                    file.size_bytes()
                );
            }
            if matches == Some(false) {
                bail!(
                    "digest mismatch for {}: expected {}, got {}",
                    file.path().display(),
                    expect.unwrap_or_default(),
                    file.digest_hex()
                );
            }
            return Ok(());
        }
        VerifyOutcome::TimedOut(r) => ("timed_out", r),
        VerifyOutcome::Cancelled(r) => ("cancelled", r),
    };
    if as_json {
        println!("{}", report_json(status, &report));
    }
    bail!("{report}")
}

fn verified_json(file: &VerifiedFile, matches_expected: Option<bool>) -> Value {
    json!({
        "status": "verified",
        "path": file.path().display().to_string(),
        "size_bytes": file.size_bytes(),
        "algorithm": checksum::ALGORITHM,
        "digest_hex": file.digest_hex(),
        "matches_expected": matches_expected,
    })
}

fn report_json(status: &str, report: &WaitReport) -> Value {
    json!({
        "status": status,
        "path": report.path.display().to_string(),
        "elapsed_ms": report.elapsed.as_millis() as u64,
        "last_size": report.last_size,
        "polls": report.polls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn report_json_fields() {
        let report = WaitReport {
            path: PathBuf::from("/tmp/dl/x.bin"),
            elapsed: Duration::from_millis(1500),
            last_size: Some(42),
            polls: 3,
        };
        let v = report_json("timed_out", &report);
        assert_eq!(v["status"], "timed_out");
        assert_eq!(v["path"], "/tmp/dl/x.bin");
        assert_eq!(v["elapsed_ms"], 1500);
        assert_eq!(v["last_size"], 42);
        assert_eq!(v["polls"], 3);
    }

    #[test]
    fn report_json_never_seen() {
        let report = WaitReport {
            path: PathBuf::from("x"),
            elapsed: Duration::ZERO,
            last_size: None,
            polls: 0,
        };
        assert!(report_json("cancelled", &report)["last_size"].is_null());
    }
}
