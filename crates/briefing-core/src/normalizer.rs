//! Record normalization.
//!
//! Turns raw email/event values exported by the mail client into
//! [`EmailRecord`]s and [`CalendarEvent`]s. Every field gets a safe default
//! and every problem is isolated to the field (or record) it came from:
//! a malformed record produces a [`Normalized::Degraded`] value, never an
//! error that aborts the batch.

use briefing_models::{Attachment, CalendarEvent, EmailRecord};
use serde_json::{Map, Value};
use tracing::debug;

use crate::meeting_url::extract_meeting_url;

/// Which kind of record a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Email,
    Event,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A non-fatal problem found while normalizing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: RecordKind,
    /// 1-based position of the record in its batch.
    pub index: usize,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.index, self.message)
    }
}

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized<T> {
    /// Every field was read without trouble.
    Clean(T),
    /// Some fields were defaulted; the reasons are in `diagnostics`.
    Degraded {
        record: T,
        diagnostics: Vec<Diagnostic>,
    },
}

impl<T> Normalized<T> {
    fn from_parts(record: T, diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Self::Clean(record)
        } else {
            Self::Degraded {
                record,
                diagnostics,
            }
        }
    }

    pub fn record(&self) -> &T {
        match self {
            Self::Clean(record) | Self::Degraded { record, .. } => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Clean(record) | Self::Degraded { record, .. } => record,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Clean(_) => &[],
            Self::Degraded { diagnostics, .. } => diagnostics,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean(_))
    }
}

/// Reads typed fields out of a raw record, collecting diagnostics.
struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    kind: RecordKind,
    index: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a Value, kind: RecordKind, index: usize) -> Self {
        let mut reader = Self {
            object: raw.as_object(),
            kind,
            index,
            diagnostics: Vec::new(),
        };
        if reader.object.is_none() {
            reader.report(format!(
                "record is not an object (found {}), using defaults",
                json_type(raw)
            ));
        }
        reader
    }

    fn report(&mut self, message: String) {
        self.diagnostics.push(Diagnostic {
            kind: self.kind,
            index: self.index,
            message,
        });
    }

    /// First non-null value under any of `keys`.
    fn value(&self, keys: &[&str]) -> Option<(&'a str, &'a Value)> {
        let object = self.object?;
        keys.iter().find_map(|key| {
            object
                .get_key_value(*key)
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.as_str(), v))
        })
    }

    fn optional_text(&mut self, keys: &[&str]) -> Option<String> {
        let (key, value) = self.value(keys)?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                let found = json_type(other);
                self.report(format!("field '{}' is {}, expected text", key, found));
                None
            }
        }
    }

    fn text(&mut self, keys: &[&str]) -> String {
        self.optional_text(keys).unwrap_or_default()
    }

    fn flag(&mut self, keys: &[&str]) -> bool {
        match self.value(keys) {
            None => false,
            Some((_, Value::Bool(b))) => *b,
            Some((key, other)) => {
                let found = json_type(other);
                self.report(format!("field '{}' is {}, expected boolean", key, found));
                false
            }
        }
    }

    /// Enumerate attachments; any failure degrades to an empty list.
    fn attachments(&mut self) -> Vec<Attachment> {
        let Some((key, value)) = self.value(&["attachments"]) else {
            self.report("has attachments but no attachment list".to_string());
            return Vec::new();
        };
        let Some(entries) = value.as_array() else {
            let found = json_type(value);
            self.report(format!("field '{}' is {}, expected list", key, found));
            return Vec::new();
        };

        let mut attachments = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            match parse_attachment(entry) {
                Some(attachment) => attachments.push(attachment),
                None => {
                    self.report(format!(
                        "failed to read attachment {}, dropping attachment list",
                        position + 1
                    ));
                    return Vec::new();
                }
            }
        }
        attachments
    }

    fn finish<T>(self, record: T) -> Normalized<T> {
        Normalized::from_parts(record, self.diagnostics)
    }
}

fn parse_attachment(entry: &Value) -> Option<Attachment> {
    let object = entry.as_object()?;
    Some(Attachment {
        filename: object.get("filename")?.as_str()?.to_string(),
        size: object.get("size")?.as_u64()?,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Normalize one raw email. `index` is 1-based and only labels diagnostics.
pub fn normalize_email(raw: &Value, index: usize) -> Normalized<EmailRecord> {
    let mut reader = FieldReader::new(raw, RecordKind::Email, index);

    let has_attachments = reader.flag(&["has_attachments"]);
    let attachments = if has_attachments {
        reader.attachments()
    } else {
        Vec::new()
    };

    let record = EmailRecord {
        subject: reader.text(&["subject"]),
        sender_name: reader.text(&["sender", "sender_name"]),
        sender_email: reader.text(&["sender_email"]),
        received_at: reader.text(&["received_time", "received_at"]),
        body: reader.text(&["body"]).trim().to_string(),
        has_attachments,
        attachments,
    };

    debug!(index, subject = %record.subject, "Normalized email");
    reader.finish(record)
}

/// Normalize one raw calendar event. `index` is 1-based and only labels
/// diagnostics.
pub fn normalize_event(raw: &Value, index: usize) -> Normalized<CalendarEvent> {
    let mut reader = FieldReader::new(raw, RecordKind::Event, index);

    let body = reader.text(&["body"]).trim().to_string();
    let meeting_url = extract_meeting_url(&body);

    let record = CalendarEvent {
        subject: reader.text(&["subject"]),
        location: reader.text(&["location"]),
        organizer: reader.text(&["organizer"]),
        start: reader.text(&["start"]),
        end: reader.text(&["end"]),
        is_recurring: reader.flag(&["is_recurring"]),
        is_all_day: reader.flag(&["is_all_day_event", "is_all_day"]),
        importance: reader.text(&["importance"]),
        sensitivity: reader.text(&["sensitivity"]),
        meeting_status: reader.text(&["meeting_status"]),
        required_attendees: reader.optional_text(&["required_attendees"]),
        optional_attendees: reader.optional_text(&["optional_attendees"]),
        meeting_url,
        body,
    };

    debug!(index, subject = %record.subject, start = %record.start, "Normalized event");
    reader.finish(record)
}

/// Normalize a batch of raw emails, one isolated outcome per item.
pub fn normalize_emails(raw: &[Value]) -> Vec<Normalized<EmailRecord>> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| normalize_email(value, i + 1))
        .collect()
}

/// Normalize a batch of raw events, one isolated outcome per item.
pub fn normalize_events(raw: &[Value]) -> Vec<Normalized<CalendarEvent>> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| normalize_event(value, i + 1))
        .collect()
}
