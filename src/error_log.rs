use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_COLUMNS: &str = "page_line\ttimestamp\terror";

/// Tab-delimited audit trail of listing slots that could not be extracted.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    /// Creates (or truncates) the log and writes the two header lines:
    /// creation time, then the column names.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut file = File::create(&path)
            .context(format!("Failed to create log file: {}", path.display()))?;

        writeln!(file, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.6f"))?;
        writeln!(file, "{}", LOG_COLUMNS)?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `{page}.{slot}\t{unix timestamp}\t{message}`.
    pub fn add_error(&self, page: usize, slot: usize, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .context(format!("Failed to open log file: {}", self.path.display()))?;

        let timestamp = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
        writeln!(
            file,
            "{}.{}\t{:.6}\t{}",
            page,
            slot,
            timestamp,
            flatten_message(message)
        )?;

        Ok(())
    }
}

fn flatten_message(message: &str) -> String {
    message
        .chars()
        .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
