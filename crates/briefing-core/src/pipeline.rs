//! The briefing pipeline: fetch, normalize, compose, complete, clean up.
//!
//! Each stage consumes the previous stage's complete output. Collaborator
//! failures degrade to empty input or in-band error text; nothing here
//! returns an error. Callers that report progress run the stages one by
//! one; [`run_briefing`] runs them all.

use briefing_models::{CalendarEvent, EmailRecord, ReportConfiguration};
use serde_json::Value;
use tracing::{info, warn};

use crate::completion::{generate_report, CompletionBackend, CompletionRequest};
use crate::composer::compose_prompt;
use crate::config::AppConfig;
use crate::error::{SourceError, SourceResult};
use crate::normalizer::{normalize_emails, normalize_events, Diagnostic, Normalized, RecordKind};
use crate::source::MailSource;

/// Per-run knobs for fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of unread emails to include.
    pub email_limit: usize,
    /// How many days of upcoming events to include.
    pub days_ahead: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            email_limit: 10,
            days_ahead: 7,
        }
    }
}

/// Normalized records from one source.
#[derive(Debug)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
    /// Why the source produced nothing, if it failed.
    pub error: Option<SourceError>,
}

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct Briefing {
    pub emails: Vec<EmailRecord>,
    pub events: Vec<CalendarEvent>,
    pub diagnostics: Vec<Diagnostic>,
    pub prompt: String,
    pub report: String,
}

fn normalize_fetched<T>(
    kind: RecordKind,
    raw: SourceResult<Vec<Value>>,
    normalize: fn(&[Value]) -> Vec<Normalized<T>>,
) -> Fetched<T> {
    let (raw, error) = match raw {
        Ok(raw) => (raw, None),
        Err(e) => {
            warn!(%kind, error = %e, "Source failed, continuing without it");
            (Vec::new(), Some(e))
        }
    };

    let mut diagnostics = Vec::new();
    let records = normalize(&raw)
        .into_iter()
        .map(|outcome| {
            for diagnostic in outcome.diagnostics() {
                warn!(%diagnostic, "Record normalized with defaults");
            }
            diagnostics.extend_from_slice(outcome.diagnostics());
            outcome.into_record()
        })
        .collect();

    Fetched {
        records,
        diagnostics,
        error,
    }
}

/// Fetch and normalize unread emails. A failing source yields no records.
pub fn fetch_emails(source: &dyn MailSource, limit: usize) -> Fetched<EmailRecord> {
    normalize_fetched(RecordKind::Email, source.unread_emails(limit), normalize_emails)
}

/// Fetch and normalize upcoming events. A failing source yields no records.
pub fn fetch_events(source: &dyn MailSource, days_ahead: u32) -> Fetched<CalendarEvent> {
    normalize_fetched(
        RecordKind::Event,
        source.calendar_events(days_ahead),
        normalize_events,
    )
}

/// Send a composed prompt and return the cleaned report text.
pub fn complete_prompt(backend: &dyn CompletionBackend, app: &AppConfig, prompt: &str) -> String {
    let request = CompletionRequest::for_prompt(app, prompt);
    generate_report(backend, &request)
}

/// Run the whole pipeline and return the report text with its inputs.
pub fn run_briefing(
    source: &dyn MailSource,
    backend: &dyn CompletionBackend,
    app: &AppConfig,
    config: &ReportConfiguration,
    options: &FetchOptions,
    today: &str,
) -> Briefing {
    let emails = fetch_emails(source, options.email_limit);
    let events = fetch_events(source, options.days_ahead);

    let mut diagnostics = emails.diagnostics;
    diagnostics.extend(events.diagnostics);
    info!(
        emails = emails.records.len(),
        events = events.records.len(),
        degraded = diagnostics.len(),
        "Normalized records"
    );

    let prompt = compose_prompt(&emails.records, &events.records, config, today);
    let report = complete_prompt(backend, app, &prompt);

    Briefing {
        emails: emails.records,
        events: events.records,
        diagnostics,
        prompt,
        report,
    }
}
