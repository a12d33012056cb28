//! Timestamp-named report files.

use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::atomic::atomic_write;
use crate::error::{PersistenceError, Result};

/// File name prefix for saved reports.
pub const REPORT_PREFIX: &str = "assistant_report_";

/// Timestamp format embedded in report file names.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Saves reports as `assistant_report_YYYYMMDD_HHMMSS.md` in one directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Create a store writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a report saved at `at`.
    pub fn file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!("{}{}.md", REPORT_PREFIX, at.format(REPORT_TIMESTAMP_FORMAT))
    }

    /// Save a report stamped with the current local time.
    pub fn save(&self, report: &str) -> Result<PathBuf> {
        self.save_at(report, &Local::now())
    }

    /// Save a report stamped with `at`, returning its absolute path.
    pub fn save_at<Tz: TimeZone>(&self, report: &str, at: &DateTime<Tz>) -> Result<PathBuf>
    where
        Tz::Offset: std::fmt::Display,
    {
        let path = self.dir.join(Self::file_name(at));
        atomic_write(&path, report.as_bytes())?;

        let absolute = std::path::absolute(&path).map_err(|source| PersistenceError::ResolveError {
            path: path.clone(),
            source,
        })?;
        info!(path = %absolute.display(), bytes = report.len(), "Saved report");
        Ok(absolute)
    }
}
