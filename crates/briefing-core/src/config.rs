//! Application configuration.
//!
//! Credentials and endpoint settings live in an [`AppConfig`] built once at
//! startup and handed to whatever needs it. Secrets may come from
//! environment variables or a `.env.local` file.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.inbox-briefing/
//! └── .env.local    # ANTHROPIC_API_KEY and friends
//! ```
//!
//! # Environment Variables
//!
//! - `BRIEFING_STATE_DIR`: Override the base state directory
//! - `ANTHROPIC_API_KEY`: API key for the Messages API
//! - `ANTHROPIC_VERSION`: Value of the `anthropic-version` header
//! - `ANTHROPIC_MODEL`: Model identifier
//! - `ANTHROPIC_API_URL`: Messages API endpoint
//! - `BRIEFING_REPORT_DIR`: Where reports are written (default: working directory)

use std::path::PathBuf;

use tracing::debug;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "BRIEFING_STATE_DIR";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable holding the API version header value.
pub const API_VERSION_ENV: &str = "ANTHROPIC_VERSION";

/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "ANTHROPIC_MODEL";

/// Environment variable overriding the endpoint URL.
pub const API_URL_ENV: &str = "ANTHROPIC_API_URL";

/// Environment variable for the report output directory.
pub const REPORT_DIR_ENV: &str = "BRIEFING_REPORT_DIR";

/// Messages API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default `anthropic-version` header value.
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Default model for report generation.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Upper bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Value shipped in old config templates that means "not configured".
const PLACEHOLDER_API_KEY: &str = "YOUR_ANTHROPIC_API_KEY";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".inbox-briefing";

/// Credentials and endpoint settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_version: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AppConfig {
    /// Build a configuration from explicit values, falling back to defaults.
    ///
    /// Blank values and the placeholder key count as absent.
    pub fn resolve(
        api_key: Option<String>,
        api_version: Option<String>,
        model: Option<String>,
    ) -> Self {
        let mut config = Self {
            api_key: api_key.and_then(usable_api_key),
            ..Self::default()
        };
        if let Some(version) = non_blank(api_version) {
            config.api_version = version;
        }
        if let Some(model) = non_blank(model) {
            config.model = model;
        }
        config
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = usable_api_key(api_key.into());
        self
    }

    /// Set the endpoint URL. Blank values are ignored.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        if let Some(url) = non_blank(Some(api_url.into())) {
            self.api_url = url;
        }
        self
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn usable_api_key(key: String) -> Option<String> {
    non_blank(Some(key)).filter(|k| k != PLACEHOLDER_API_KEY)
}

/// Get the state directory.
///
/// Determined by:
/// 1. `BRIEFING_STATE_DIR` environment variable if set
/// 2. `~/.inbox-briefing` if home directory is available
/// 3. `.inbox-briefing` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the `.env.local` file path in the state directory.
pub fn env_file() -> PathBuf {
    state_dir().join(".env.local")
}

/// Load `.env.local` from the working directory, then from the state dir.
///
/// Variables already set in the environment are never overwritten.
pub fn load_env() {
    if dotenvy::from_filename(".env.local").is_ok() {
        debug!("Loaded .env.local from working directory");
    }
    let env_path = env_file();
    if env_path.exists() && dotenvy::from_path(&env_path).is_ok() {
        debug!(path = %env_path.display(), "Loaded .env.local from state directory");
    }
}

/// Split a comma-separated list, trimming items and dropping empties.
///
/// Returns `None` when nothing usable remains.
pub fn parse_list(input: &str) -> Option<Vec<String>> {
    let items: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
