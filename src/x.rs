//! Reading public posts from X.
//!
//! Posts are read without authentication, from the public syndication
//! endpoint that powers embedded posts. When that fails for a post looked
//! up by ID, a public JSON mirror is tried as well.

pub mod client;
pub mod post;
pub mod service;

pub use client::PostFetcher;
pub use post::Post;

use crate::http::HTTPError;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static STATUS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:twitter\.com|x\.com)/\w+/status/(\d+)")
        .expect("status URL pattern is valid")
});

/// Extracts the ID of a post from its URL.
///
/// `twitter.com`, `x.com`, and `mobile.twitter.com` status URLs are
/// understood. Returns `None` if `url` is not a status URL.
///
/// # Examples
///
/// ```
/// use xdraft::x::extract_post_id;
///
/// let id = extract_post_id("https://x.com/rustlang/status/1234567890?s=20");
/// assert_eq!(id.as_deref(), Some("1234567890"));
///
/// assert_eq!(extract_post_id("https://x.com/rustlang"), None);
/// ```
pub fn extract_post_id(url: &str) -> Option<String> {
    STATUS_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// A way of finding a single post.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// Find the post at this URL.
    Url(String),

    /// Find the post with this numeric ID.
    Id(String),
}

impl Lookup {
    /// Interprets user input as a [`Lookup`].
    ///
    /// Input starting with `http` is a URL, and input made up entirely of
    /// digits is an ID. Anything else is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use xdraft::x::Lookup;
    ///
    /// assert_eq!(Lookup::parse("123"), Some(Lookup::Id(String::from("123"))));
    /// assert_eq!(Lookup::parse("@rustlang"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.starts_with("http") {
            Some(Lookup::Url(input.to_string()))
        } else if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            Some(Lookup::Id(input.to_string()))
        } else {
            None
        }
    }
}

/// Errors that occur when reading a post.
#[derive(Debug, Error)]
pub enum Error {
    /// A URL does not point to a post.
    #[error("could not extract a post ID from {0}")]
    InvalidUrl(String),

    /// The post could not be retrieved.
    #[error("could not retrieve post: {0}")]
    Http(#[from] HTTPError),

    /// The response did not describe a post.
    #[error("could not parse post: {0}")]
    Parse(#[from] serde_json::Error),

    /// The post is deleted, protected, or otherwise hidden.
    #[error("post is unavailable")]
    Unavailable,
}
