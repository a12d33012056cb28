//! Mail and calendar sources.
//!
//! A [`MailSource`] hands back raw, untyped records; normalization happens
//! later. [`JsonExportSource`] reads the JSON files exported from the
//! desktop mail client.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};
use crate::timestamp::parse_event_timestamp;

/// Where unread mail and upcoming events come from.
pub trait MailSource {
    /// Up to `limit` unread emails, newest first.
    fn unread_emails(&self, limit: usize) -> SourceResult<Vec<Value>>;

    /// Events starting within the next `days_ahead` days.
    fn calendar_events(&self, days_ahead: u32) -> SourceResult<Vec<Value>>;
}

/// Reads exported inbox and calendar dumps from disk.
///
/// Each file holds a JSON array of records. Emails marked
/// `"unread": false` are skipped and the rest are ordered by received
/// time, newest first.
#[derive(Debug, Clone)]
pub struct JsonExportSource {
    emails_path: Option<PathBuf>,
    events_path: Option<PathBuf>,
    now: NaiveDateTime,
}

impl JsonExportSource {
    /// Create a source over the given export files.
    pub fn new(emails_path: Option<PathBuf>, events_path: Option<PathBuf>) -> Self {
        Self {
            emails_path,
            events_path,
            now: Local::now().naive_local(),
        }
    }

    /// Set the reference time for the event window.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Keep events that start no earlier than now and end within `days_ahead`.
    ///
    /// Unparsable starts are passed through; the composer decides. An
    /// unparsable end falls back to bounding the start.
    fn within_window(&self, event: &Value, days_ahead: u32) -> bool {
        let Some(start) = timestamp_field(event, &["start"]) else {
            return true;
        };
        let horizon = self.now + Duration::days(i64::from(days_ahead));
        let last = timestamp_field(event, &["end"]).unwrap_or(start);
        start >= self.now && last <= horizon
    }
}

/// Parsed timestamp under the first of `keys` holding a string.
fn timestamp_field(record: &Value, keys: &[&str]) -> Option<NaiveDateTime> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .and_then(parse_event_timestamp)
}

fn read_records(path: &Path) -> SourceResult<Vec<Value>> {
    let data = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&data).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(SourceError::InvalidExport {
            path: path.to_path_buf(),
            message: "expected a JSON array of records".to_string(),
        }),
    }
}

impl MailSource for JsonExportSource {
    fn unread_emails(&self, limit: usize) -> SourceResult<Vec<Value>> {
        let path = self
            .emails_path
            .as_deref()
            .ok_or_else(|| SourceError::Unavailable("no email export configured".to_string()))?;

        let records = read_records(path)?;
        let total = records.len();
        let mut unread: Vec<Value> = records
            .into_iter()
            .filter(|r| r.get("unread").and_then(Value::as_bool) != Some(false))
            .collect();
        // Newest first; unparsable timestamps sink to the end in file order
        unread.sort_by_key(|r| Reverse(timestamp_field(r, &["received_time", "received_at"])));
        unread.truncate(limit);

        info!(path = %path.display(), total, selected = unread.len(), "Read email export");
        Ok(unread)
    }

    fn calendar_events(&self, days_ahead: u32) -> SourceResult<Vec<Value>> {
        let path = self
            .events_path
            .as_deref()
            .ok_or_else(|| SourceError::Unavailable("no calendar export configured".to_string()))?;

        let records = read_records(path)?;
        let total = records.len();
        let events: Vec<Value> = records
            .into_iter()
            .filter(|e| self.within_window(e, days_ahead))
            .collect();

        debug!(now = %self.now, days_ahead, "Applied event window");
        info!(path = %path.display(), total, selected = events.len(), "Read calendar export");
        Ok(events)
    }
}
