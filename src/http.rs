//! Services for communicating with APIs using HTTP.

use reqwest::{Client, ClientBuilder, StatusCode, header};
use std::time::Duration;
use std::{error, fmt};

/// Creates HTTP clients configured for this program.
///
/// Clients are relatively expensive to create and maintain their own
/// connection pools, so a single client should be created per process
/// and cloned wherever it is needed.
#[derive(Debug)]
pub struct HTTPClientFactory {
    timeout: Duration,
}

impl HTTPClientFactory {
    /// Creates a factory for clients whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Creates a new HTTP client.
    pub fn create(&self) -> Client {
        ClientBuilder::new()
            .user_agent(user_agent())
            .timeout(self.timeout)
            .build()
            // According to the docs, build() only fails if a TLS backend
            // cannot be initialized, or if DNS resolution cannot be
            // initialized, and both of these are unrecoverable for us.
            .expect("could not create a new HTTP client")
    }
}

/// An appropriate user agent to use when making HTTP requests.
pub fn user_agent() -> String {
    format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug)]
pub enum HTTPError {
    /// An error retrieving the body of a response.
    Body(reqwest::Error),

    /// An error that occurred while making an HTTP request.
    Request(reqwest::Error),

    /// The request did not complete before the client's timeout.
    Timeout,

    /// A response body could not be deserialized.
    Deserialization(serde_json::Error),

    /// An unsuccessful HTTP status code in an HTTP response, along with
    /// the body of the response, which often describes the error.
    Http(StatusCode, String),

    /// A missing Content-Type header in a response.
    MissingContentType,

    /// An invalid Content-Type header.
    InvalidContentType(header::ToStrError),

    /// A Content-Type that is not understood by the service.
    UnexpectedContentType(String),
}

impl HTTPError {
    /// The HTTP status of the response, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HTTPError::Http(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HTTPError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            HTTPError::Timeout
        } else if error.is_body() || error.is_decode() {
            HTTPError::Body(error)
        } else {
            HTTPError::Request(error)
        }
    }
}

impl From<serde_json::Error> for HTTPError {
    fn from(error: serde_json::Error) -> Self {
        HTTPError::Deserialization(error)
    }
}

impl From<header::ToStrError> for HTTPError {
    fn from(error: header::ToStrError) -> Self {
        HTTPError::InvalidContentType(error)
    }
}

impl fmt::Display for HTTPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HTTPError::Body(err) => write!(f, "Error retrieving body of HTTP response: {err}"),
            HTTPError::Request(err) => write!(f, "Error while making HTTP request: {err}"),
            HTTPError::Timeout => write!(f, "Request timed out"),
            HTTPError::Deserialization(err) => write!(f, "Error parsing response body: {err}"),
            HTTPError::Http(status, _) => write!(f, "Request returned HTTP {status}"),
            HTTPError::MissingContentType => write!(f, "Missing Content-Type header"),
            HTTPError::InvalidContentType(err) => {
                write!(f, "Invalid Content-Type header value: {err}")
            }
            HTTPError::UnexpectedContentType(content_type) => {
                write!(f, "Unexpected content type: {content_type}")
            }
        }
    }
}

impl error::Error for HTTPError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            HTTPError::Body(err) => Some(err),
            HTTPError::Request(err) => Some(err),
            HTTPError::Timeout => None,
            HTTPError::Deserialization(err) => Some(err),
            HTTPError::Http(_, _) => None,
            HTTPError::MissingContentType => None,
            HTTPError::InvalidContentType(err) => Some(err),
            HTTPError::UnexpectedContentType(_) => None,
        }
    }
}
