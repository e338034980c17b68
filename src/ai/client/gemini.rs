//! Google Gemini API client.
//!
//! Drafts are generated with the Gemini API's [`generateContent`] method.
//! Create an API key in [Google AI Studio] and store it in the
//! `$GEMINI_API_KEY` environment variable.
//!
//! Unlike Anthropic, Google does not always signal rate limits and outages
//! with the HTTP status alone, so this client also inspects error messages
//! when deciding whether a failure is worth retrying.
//!
//! [`generateContent`]: https://ai.google.dev/api/generate-content
//! [Google AI Studio]: https://aistudio.google.com/apikey

use crate::ai::auth::{Auth, AuthResult};
use crate::ai::client::{APIClient, ErrorEnvelope, GenerationError, GenerationResult};
use crate::ai::retry::RetryPolicy;
use crate::ai::service::{APIService, HTTPService};
use crate::http::HTTPError;
use crate::model::{Model, ModelConfig};
use itertools::Itertools;
use log::debug;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const TRANSIENT_MARKERS: [&str; 9] = [
    "429",
    "rate limit",
    "quota",
    "500",
    "502",
    "503",
    "504",
    "internal",
    "unavailable",
];

const INVALID_KEY_MARKERS: [&str; 2] = ["api key", "api_key"];

const RATE_LIMIT_MARKERS: [&str; 4] = ["429", "rate limit", "quota", "resource_exhausted"];

/// A body for a Gemini `generateContent` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GeminiRequest {
    /// Creates a request asking the model described by `config` to respond
    /// to `prompt` according to `system_prompt`.
    pub fn new(config: ModelConfig, prompt: &str, system_prompt: &str) -> Self {
        Self {
            system_instruction: Content::new(None, system_prompt),
            contents: vec![Content::new(Some("user"), prompt)],
            generation_config: GenerationConfig {
                max_output_tokens: config.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn new(role: Option<&'static str>, text: &str) -> Self {
        let parts = vec![Part {
            text: text.to_string(),
        }];
        Self { role, parts }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// A response from the Gemini `generateContent` method.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GeminiResponse {
    /// The text of the first candidate, joined from all of its text parts.
    ///
    /// Returns `None` if there are no candidates or the first one has no text.
    pub fn text(&self) -> Option<String> {
        let text = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Generates drafts using Gemini.
#[derive(Debug)]
pub struct GeminiClient<S: APIService = HTTPService> {
    auth: AuthResult,
    service: S,
    model: Model,
    retry: RetryPolicy,
}

impl<S: APIService> GeminiClient<S> {
    /// Creates a new client.
    ///
    /// `auth` is usually the result of [`Auth::from_env(API_KEY_VAR)`](Auth::from_env).
    /// If it is an error, every generation fails with
    /// [`GenerationError::MissingCredential`] without contacting Google.
    pub fn new(auth: AuthResult, service: S) -> Self {
        Self {
            auth,
            service,
            model: Model::Gemini2_5Pro,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the policy used to retry transient failures.
    pub fn retry_policy(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    fn uri(&self) -> String {
        format!(
            "{BASE_URL}/{}:generateContent",
            self.model.config().model_id
        )
    }

    fn headers(auth: &Auth) -> Result<HeaderMap, GenerationError> {
        let mut api_key =
            HeaderValue::from_str(auth.api_key()).map_err(|_| GenerationError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", api_key);
        Ok(headers)
    }
}

impl<S: APIService> APIClient for GeminiClient<S> {
    async fn generate(&self, prompt: &str, system_prompt: &str) -> GenerationResult {
        let auth = self.auth.as_ref().map_err(GenerationError::from)?;
        let headers = Self::headers(auth)?;
        let config = self.model.config();
        let request = GeminiRequest::new(config, prompt, system_prompt);
        let uri = self.uri();

        debug!(
            "requesting draft from {} (max tokens: {})",
            config.model_id, config.max_tokens
        );

        let service = &self.service;
        let headers = &headers;
        let request = &request;
        let uri = uri.as_str();
        let response = self
            .retry
            .run(is_transient, move || {
                service.post::<_, GeminiResponse>(uri, headers.clone(), request)
            })
            .await
            .map_err(|err| normalize_error(&err))?;

        response.text().ok_or(GenerationError::NoTextContent)
    }
}

/// The provider's description of the error if it sent one, or a
/// description of the failed request otherwise.
fn message(error: &HTTPError) -> String {
    ErrorEnvelope::message(error).unwrap_or_else(|| error.to_string())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Rate limits and server errors are worth retrying, whether they are
/// signaled by the HTTP status or only by the error message.
fn is_transient(error: &HTTPError) -> bool {
    let by_status = error
        .status()
        .is_some_and(|status| status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error());
    by_status || contains_any(&message(error), &TRANSIENT_MARKERS)
}

fn normalize_error(error: &HTTPError) -> GenerationError {
    let message = message(error);
    let status = error.status();

    if matches!(
        status,
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    ) || contains_any(&message, &INVALID_KEY_MARKERS)
    {
        GenerationError::InvalidApiKey
    } else if status == Some(StatusCode::TOO_MANY_REQUESTS)
        || contains_any(&message, &RATE_LIMIT_MARKERS)
    {
        GenerationError::RateLimited
    } else {
        GenerationError::from_http(error, ErrorEnvelope::message(error))
    }
}
