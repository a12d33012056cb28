//! Calendar event records.

use serde::{Deserialize, Serialize};

/// A calendar event after normalization.
///
/// `start` and `end` stay as the strings the source produced; the prompt
/// composer parses them when grouping by day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub subject: String,
    pub location: String,
    pub body: String,
    pub organizer: String,
    pub start: String,
    pub end: String,
    pub is_recurring: bool,
    pub is_all_day: bool,
    pub importance: String,
    pub sensitivity: String,
    pub meeting_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_attendees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_attendees: Option<String>,
    /// Online meeting link found in the body, never taken from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
}
