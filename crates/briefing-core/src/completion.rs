//! Report generation through the Anthropic Messages API.
//!
//! The request is a single blocking call with no retry. Whatever goes
//! wrong is turned into text by [`generate_report`], so the caller always
//! has something to save.

use serde::Serialize;
use tracing::{debug, warn};

use crate::composer::SYSTEM_INSTRUCTION;
use crate::config::AppConfig;
use crate::error::{CompletionError, CompletionResult};
use crate::sanitizer::dedupe_lines;

/// Report body used when the call itself fails.
pub const CALL_FAILED_PREFIX: &str = "APIの呼び出し中にエラーが発生しました: ";

/// Report body used when the reply carries no text.
pub const UNEXPECTED_RESPONSE_REPORT: &str = "APIからの応答で予期しない形式が返されました。";

/// One completion call: a system instruction and a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub user: String,
}

impl CompletionRequest {
    /// Build the request for a composed prompt using the configured model.
    pub fn for_prompt(config: &AppConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system: SYSTEM_INSTRUCTION.to_string(),
            user: prompt.into(),
        }
    }
}

/// A text-completion endpoint.
pub trait CompletionBackend {
    /// Send the request and return the text payload of the reply.
    fn complete(&self, request: &CompletionRequest) -> CompletionResult<String>;
}

/// Wire format of the Messages API request body.
#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [WireMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Blocking client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::blocking::Client,
    api_key: String,
    api_version: String,
    api_url: String,
}

impl AnthropicClient {
    /// Create a client from the application configuration.
    pub fn new(config: &AppConfig) -> CompletionResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CompletionError::NoApiKey)?;

        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            api_version: config.api_version.clone(),
            api_url: config.api_url.clone(),
        })
    }
}

impl CompletionBackend for AnthropicClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionResult<String> {
        let body = MessagesBody {
            model: &request.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: [WireMessage {
                role: "user",
                content: &request.user,
            }],
        };

        debug!(
            model = %request.model,
            prompt_chars = request.user.chars().count(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.api_url.as_str())
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", self.api_version.as_str())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| CompletionError::ParseError(e.to_string()))?;

        extract_text(&json)
    }
}

/// Pull `content[0].text` out of a Messages API reply.
pub fn extract_text(json: &serde_json::Value) -> CompletionResult<String> {
    json["content"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or(CompletionError::UnexpectedResponse)
}

/// Run the completion and turn the outcome into report text.
///
/// A successful reply is de-duplicated line by line. Failures become a
/// descriptive message that is saved in place of the report.
pub fn generate_report(backend: &dyn CompletionBackend, request: &CompletionRequest) -> String {
    match backend.complete(request) {
        Ok(text) => dedupe_lines(&text),
        Err(e) => failure_report(&e),
    }
}

/// Report text saved when no usable reply was obtained.
pub fn failure_report(error: &CompletionError) -> String {
    warn!(%error, "Completion failed");
    match error {
        CompletionError::UnexpectedResponse => UNEXPECTED_RESPONSE_REPORT.to_string(),
        other => format!("{}{}", CALL_FAILED_PREFIX, other),
    }
}
