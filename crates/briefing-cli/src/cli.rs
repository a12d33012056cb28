//! Command-line interface definition using clap.

use std::path::{Path, PathBuf};

use briefing_core::config::{
    parse_list, API_KEY_ENV, API_URL_ENV, API_VERSION_ENV, MODEL_ENV, REPORT_DIR_ENV,
};
use briefing_core::FetchOptions;
use briefing_models::{HourRange, ReportOverrides, ReportStyle};
use clap::Parser;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Inbox Briefing - turn unread mail and upcoming events into a secretary report
#[derive(Parser, Debug)]
#[command(name = "inbox-briefing")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Maximum number of unread emails to include
    #[arg(long, default_value_t = 10)]
    pub emails: usize,

    /// How many days of upcoming events to include
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Anthropic API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Anthropic API version header
    #[arg(long, env = API_VERSION_ENV)]
    pub api_version: Option<String>,

    /// Model identifier
    #[arg(long, env = MODEL_ENV)]
    pub model: Option<String>,

    /// Messages API endpoint
    #[arg(long, env = API_URL_ENV, hide = true)]
    pub api_url: Option<String>,

    /// Priority domains, comma-separated (e.g. company.com,client.com)
    #[arg(long)]
    pub priority_domains: Option<String>,

    /// Priority keywords, comma-separated (e.g. 至急,重要,期限)
    #[arg(long)]
    pub priority_keywords: Option<String>,

    /// Working hours (e.g. --working-hours 9 18)
    #[arg(long, num_args = 2, value_names = ["START", "END"],
          value_parser = clap::value_parser!(u8).range(0..=24))]
    pub working_hours: Option<Vec<u8>>,

    /// Focus time (e.g. --focus-time 10 12)
    #[arg(long, num_args = 2, value_names = ["START", "END"],
          value_parser = clap::value_parser!(u8).range(0..=24))]
    pub focus_time: Option<Vec<u8>>,

    /// Report style: detailed or concise
    #[arg(long, value_parser = clap::value_parser!(ReportStyle))]
    pub report_style: Option<ReportStyle>,

    /// JSON export of the inbox
    #[arg(long, env = "BRIEFING_EMAILS_FILE")]
    pub emails_file: Option<PathBuf>,

    /// JSON export of the calendar
    #[arg(long, env = "BRIEFING_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Directory to save the report in (default: current directory)
    #[arg(short, long, env = REPORT_DIR_ENV)]
    pub output_dir: Option<PathBuf>,

    /// Print the composed prompt and exit without calling the API
    #[arg(long)]
    pub prompt_only: bool,
}

fn hour_range(values: Option<&Vec<u8>>) -> Option<HourRange> {
    match values.map(Vec::as_slice) {
        Some([start, end]) => Some(HourRange::new(*start, *end)),
        _ => None,
    }
}

/// Expand a leading `~` in a user-supplied path.
fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Report settings given on the command line.
    pub fn report_overrides(&self) -> ReportOverrides {
        ReportOverrides {
            priority_domains: self.priority_domains.as_deref().and_then(parse_list),
            priority_keywords: self.priority_keywords.as_deref().and_then(parse_list),
            working_hours: hour_range(self.working_hours.as_ref()),
            focus_time: hour_range(self.focus_time.as_ref()),
            report_style: self.report_style,
        }
    }

    /// Fetch limits given on the command line.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            email_limit: self.emails,
            days_ahead: self.days,
        }
    }

    /// Returns the report directory, using the current directory if not specified.
    pub fn report_dir(&self) -> PathBuf {
        self.output_dir
            .as_deref()
            .map(expand_path)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn emails_path(&self) -> Option<PathBuf> {
        self.emails_file.as_deref().map(expand_path)
    }

    pub fn events_path(&self) -> Option<PathBuf> {
        self.events_file.as_deref().map(expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["inbox-briefing"]);
        assert_eq!(cli.fetch_options(), FetchOptions::default());
        assert!(!cli.prompt_only);
        assert_eq!(cli.report_overrides(), ReportOverrides::default());
        assert_eq!(cli.report_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_cli_parse_report_settings() {
        let cli = Cli::parse_from([
            "inbox-briefing",
            "--priority-domains",
            "corp.jp, client.jp",
            "--priority-keywords",
            "至急,,重要",
            "--working-hours",
            "8",
            "17",
            "--focus-time",
            "13",
            "15",
            "--report-style",
            "concise",
        ]);
        let overrides = cli.report_overrides();
        assert_eq!(
            overrides.priority_domains,
            Some(vec!["corp.jp".to_string(), "client.jp".to_string()])
        );
        assert_eq!(
            overrides.priority_keywords,
            Some(vec!["至急".to_string(), "重要".to_string()])
        );
        assert_eq!(overrides.working_hours, Some(HourRange::new(8, 17)));
        assert_eq!(overrides.focus_time, Some(HourRange::new(13, 15)));
        assert_eq!(overrides.report_style, Some(ReportStyle::Concise));
    }

    #[test]
    fn test_cli_blank_list_is_ignored() {
        let cli = Cli::parse_from(["inbox-briefing", "--priority-domains", " , "]);
        assert_eq!(cli.report_overrides().priority_domains, None);
    }

    #[test]
    fn test_cli_rejects_single_hour() {
        assert!(Cli::try_parse_from(["inbox-briefing", "--working-hours", "9"]).is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_hour() {
        assert!(Cli::try_parse_from(["inbox-briefing", "--focus-time", "10", "99"]).is_err());
    }

    #[test]
    fn test_cli_style_is_case_insensitive() {
        let cli = Cli::parse_from(["inbox-briefing", "--report-style", "Detailed"]);
        assert_eq!(cli.report_overrides().report_style, Some(ReportStyle::Detailed));
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        assert!(Cli::try_parse_from(["inbox-briefing", "--report-style", "verbose"]).is_err());
    }

    #[test]
    fn test_cli_limits() {
        let cli = Cli::parse_from(["inbox-briefing", "--emails", "25", "--days", "3"]);
        assert_eq!(
            cli.fetch_options(),
            FetchOptions {
                email_limit: 25,
                days_ahead: 3,
            }
        );
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["inbox-briefing", "-vvv"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        // Verify help can be generated without panic
        Cli::command().debug_assert();
    }
}
