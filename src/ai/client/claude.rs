//! Anthropic API client.
//!
//! Drafts are generated with Anthropic's [Messages API]. You will need an
//! [Anthropic API account] and an API key stored in the `$ANTHROPIC_API_KEY`
//! environment variable.
//!
//! **You are solely responsible for the cost of your use of the Anthropic
//! API.** Every draft is a separate request; drafting in all five styles
//! makes five requests.
//!
//! [Anthropic API account]: https://console.anthropic.com
//! [Messages API]: https://docs.anthropic.com/en/api/messages

use crate::ai::auth::{Auth, AuthResult};
use crate::ai::client::{APIClient, ErrorEnvelope, GenerationError, GenerationResult};
use crate::ai::retry::RetryPolicy;
use crate::ai::service::{APIService, HTTPService};
use crate::http::HTTPError;
use crate::model::{Model, ModelConfig};
use log::debug;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Environment variable holding the Anthropic API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A body for an Anthropic Messages API request.
#[derive(Debug, Serialize)]
pub struct ClaudeRequest {
    model: &'static str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

impl ClaudeRequest {
    /// Creates a request asking the model described by `config` to respond
    /// to `prompt` according to `system_prompt`.
    pub fn new(config: ModelConfig, prompt: &str, system_prompt: &str) -> Self {
        Self {
            model: config.model_id,
            max_tokens: config.max_tokens,
            system: system_prompt.to_string(),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// A response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

impl ClaudeResponse {
    /// The text of the first text block in the response, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Generates drafts using Claude.
#[derive(Debug)]
pub struct ClaudeClient<S: APIService = HTTPService> {
    auth: AuthResult,
    service: S,
    model: Model,
    retry: RetryPolicy,
}

impl<S: APIService> ClaudeClient<S> {
    /// Creates a new client.
    ///
    /// `auth` is usually the result of [`Auth::from_env(API_KEY_VAR)`](Auth::from_env).
    /// If it is an error, the client still works, but every generation
    /// fails with [`GenerationError::MissingCredential`] without contacting
    /// Anthropic.
    pub fn new(auth: AuthResult, service: S) -> Self {
        Self {
            auth,
            service,
            model: Model::ClaudeOpus4_5,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the policy used to retry transient failures.
    pub fn retry_policy(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    fn headers(auth: &Auth) -> Result<HeaderMap, GenerationError> {
        let mut api_key =
            HeaderValue::from_str(auth.api_key()).map_err(|_| GenerationError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }
}

impl<S: APIService> APIClient for ClaudeClient<S> {
    async fn generate(&self, prompt: &str, system_prompt: &str) -> GenerationResult {
        let auth = self.auth.as_ref().map_err(GenerationError::from)?;
        let headers = Self::headers(auth)?;
        let config = self.model.config();
        let request = ClaudeRequest::new(config, prompt, system_prompt);

        debug!(
            "requesting draft from {} (max tokens: {})",
            config.model_id, config.max_tokens
        );

        let service = &self.service;
        let headers = &headers;
        let request = &request;
        let response = self
            .retry
            .run(is_transient, move || {
                service.post::<_, ClaudeResponse>(MESSAGES_URL, headers.clone(), request)
            })
            .await
            .map_err(|err| normalize_error(&err))?;

        response
            .text()
            .map(String::from)
            .ok_or(GenerationError::NoTextContent)
    }
}

/// Rate limits (HTTP 429) and server errors (HTTP 5xx) are worth retrying.
fn is_transient(error: &HTTPError) -> bool {
    error
        .status()
        .is_some_and(|status| status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
}

fn normalize_error(error: &HTTPError) -> GenerationError {
    match error.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => GenerationError::InvalidApiKey,
        Some(StatusCode::TOO_MANY_REQUESTS) => GenerationError::RateLimited,
        _ => GenerationError::from_http(error, ErrorEnvelope::message(error)),
    }
}
