//! Core data models for Inbox Briefing.
//!
//! This crate provides the canonical record shapes the rest of the
//! workspace operates on: unread emails, calendar events, and the
//! report configuration that steers the briefing prompt.

pub mod email;
pub mod event;
pub mod settings;

// Re-export main types
pub use email::{Attachment, EmailRecord};
pub use event::CalendarEvent;
pub use settings::{
    HourRange, ReportConfiguration, ReportOverrides, ReportStyle, DEFAULT_PRIORITY_DOMAINS,
    DEFAULT_PRIORITY_KEYWORDS,
};
