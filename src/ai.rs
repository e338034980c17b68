//! AI services.
//!
//! Drafts are generated by AI models hosted by several providers. Each
//! provider has its own [client](client), but all clients share the same
//! [authentication](auth), [HTTP service](service) and [retry](retry)
//! machinery, and all of them report failures using the same
//! [`GenerationError`].

pub mod auth;
pub mod client;
pub mod retry;
pub mod service;

pub use auth::Auth;
pub use client::{GenerationError, GenerationResult};
