//! Append-only log of submissions, kept in the platform config directory.

use crate::controller::SubmitOutcome;
use crate::transaction::RawTransaction;
use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log file name
const SUBMISSION_LOG_FILE: &str = "submission_log.txt";

/// Get the directory where app data is stored
fn app_data_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("seqfeed"),
        // Fall back to current directory
        None => PathBuf::from("."),
    }
}

/// Default location of the submission log; the directory is created on first write
pub fn log_path() -> PathBuf {
    app_data_dir().join(SUBMISSION_LOG_FILE)
}

/// Record one finished submission in the log at `path`.
pub fn record_outcome(path: &Path, tx: &RawTransaction, outcome: &SubmitOutcome) -> Result<()> {
    append_entry(path, tx.chain_id, outcome_operation(outcome), outcome_details(tx, outcome))
}

fn outcome_operation(outcome: &SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Accepted { .. } => "submit_accepted",
        SubmitOutcome::Failed { .. } => "submit_failed",
    }
}

fn outcome_details(tx: &RawTransaction, outcome: &SubmitOutcome) -> String {
    let result = match outcome {
        SubmitOutcome::Accepted { status, .. } => format!("status: {}", status),
        SubmitOutcome::Failed { error, .. } => format!("error: {}", error),
    };
    format!(
        "nonce: {}\nfrom: {}\nto: {}\nvalue: {}\ngas_limit: {}\n{}",
        tx.nonce, tx.from, tx.to, tx.value, tx.gas_limit, result
    )
}

/// Append a structured log entry to `path`.
pub fn append_entry(path: &Path, chain_id: u64, operation: &str, details: impl AsRef<str>) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let timestamp = Utc::now().to_rfc3339();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    writeln!(
        file,
        "[{}] chain_id={} operation={}",
        timestamp, chain_id, operation
    )?;

    let body = details.as_ref();
    if body.trim().is_empty() {
        writeln!(file, "  (no additional details)")?;
    } else {
        for line in body.lines() {
            if line.trim().is_empty() {
                writeln!(file)?;
            } else {
                writeln!(file, "  {}", line)?;
            }
        }
    }

    writeln!(file)?;
    Ok(())
}

/// Read the entire log file content
#[cfg(test)]
pub(crate) fn read_log(path: &Path) -> Result<String> {
    if path.exists() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(String::new())
    }
}
