//! Briefing Core - the logic between the mail client and the model.
//!
//! - **normalizer**: Raw email/event values to canonical records, per-record isolation
//! - **composer**: Deterministic prompt rendering
//! - **sanitizer**: Line de-duplication of the model reply
//! - **completion**: Anthropic Messages API client and report generation
//! - **source**: Mail/calendar sources (JSON exports)
//! - **config**: Credentials, endpoint settings and paths
//! - **pipeline**: The end-to-end run

pub mod completion;
pub mod composer;
pub mod config;
pub mod error;
pub mod meeting_url;
pub mod normalizer;
pub mod pipeline;
pub mod sanitizer;
pub mod source;
pub mod timestamp;

// Re-export commonly used items for convenience
pub use completion::{
    failure_report, generate_report, AnthropicClient, CompletionBackend, CompletionRequest,
    CALL_FAILED_PREFIX, UNEXPECTED_RESPONSE_REPORT,
};
pub use composer::{compose_prompt, NO_EMAILS_SENTENCE, NO_EVENTS_SENTENCE, SYSTEM_INSTRUCTION};
pub use config::{load_env, parse_list, AppConfig};
pub use error::{CompletionError, SourceError};
pub use meeting_url::extract_meeting_url;
pub use normalizer::{
    normalize_email, normalize_emails, normalize_event, normalize_events, Diagnostic, Normalized,
    RecordKind,
};
pub use pipeline::{
    complete_prompt, fetch_emails, fetch_events, run_briefing, Briefing, FetchOptions, Fetched,
};
pub use sanitizer::dedupe_lines;
pub use source::{JsonExportSource, MailSource};
