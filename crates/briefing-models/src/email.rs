//! Unread email records.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of an email body shown in the prompt.
pub const BODY_PREVIEW_CHARS: usize = 500;

/// Marker appended to a body preview that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name as reported by the mail client.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
}

/// An unread email after normalization.
///
/// Every field is populated; missing source values become empty strings
/// or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub subject: String,
    pub sender_name: String,
    pub sender_email: String,
    /// Received timestamp exactly as the source reported it.
    pub received_at: String,
    pub body: String,
    pub has_attachments: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl EmailRecord {
    /// Returns the body preview used in the prompt.
    ///
    /// Keeps the first 500 characters and appends `...` only when
    /// something was cut.
    pub fn body_preview(&self) -> String {
        let mut chars = self.body.char_indices();
        match chars.nth(BODY_PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}{}", &self.body[..cut], TRUNCATION_MARKER),
            None => self.body.clone(),
        }
    }
}
