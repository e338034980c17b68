//! API clients for various AI services.
//!
//! Every client wraps a single "generate some text" call behind the same
//! [`APIClient`] contract. Clients retry transient failures internally and
//! never panic; when they give up, they return a [`GenerationError`]
//! describing what went wrong in terms that do not depend on the provider.

pub mod claude;
pub mod gemini;

use crate::ai::auth::AuthError;
use crate::http::HTTPError;
use serde::Deserialize;
use thiserror::Error;

/// A client for an AI service's API.
pub trait APIClient {
    /// Generates text in response to `prompt`, with `system_prompt`
    /// setting up the model's behavior.
    ///
    /// Transient failures are retried before giving up. Errors are
    /// returned, never raised, so callers always get a result.
    fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
    ) -> impl Future<Output = GenerationResult> + Send;
}

/// The text generated by an AI service, or the reason it could not be
/// generated.
pub type GenerationResult = Result<String, GenerationError>;

/// Reasons an AI service could not generate text.
///
/// The [`Display`](std::fmt::Display) form of each error is a short,
/// human-readable description suitable for showing to users.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// The credential for the service is not configured.
    #[error("{0} not found in environment variables")]
    MissingCredential(String),

    /// The service rejected the credential.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The service is rate limiting requests, or the account is out of quota.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The service returned an unsuccessful HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The service's description of the error.
        message: String,
    },

    /// The service responded, but without any text.
    #[error("No text content in response")]
    NoTextContent,

    /// Any other failure, such as a network error or a timeout.
    #[error("{0}")]
    Other(String),
}

impl From<&AuthError> for GenerationError {
    fn from(error: &AuthError) -> Self {
        match error {
            AuthError::Missing(envvar) => GenerationError::MissingCredential(envvar.clone()),
            err @ AuthError::NotUnicode(_) => GenerationError::Other(err.to_string()),
        }
    }
}

impl GenerationError {
    /// Creates an error from a failed request that has no more specific
    /// classification.
    ///
    /// `message` is the provider's own description of the error, if it
    /// sent one.
    pub(crate) fn from_http(error: &HTTPError, message: Option<String>) -> Self {
        match error {
            HTTPError::Http(status, body) => GenerationError::Api {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| fallback_message(*status, body)),
            },
            err => GenerationError::Other(message.unwrap_or_else(|| err.to_string())),
        }
    }
}

fn fallback_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// The error envelope used by both Anthropic and Google:
/// `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ErrorEnvelope {
    /// Extracts the error message from a failed response, if it has one.
    pub(crate) fn message(error: &HTTPError) -> Option<String> {
        match error {
            HTTPError::Http(_, body) => serde_json::from_str::<ErrorEnvelope>(body)
                .ok()
                .map(|envelope| envelope.error.message),
            _ => None,
        }
    }
}
