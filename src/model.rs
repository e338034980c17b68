//! Supported AI models and the providers that serve them.
//!
//! Each [`Model`] is a fixed provider configuration: the provider family
//! that serves it, the concrete model identifier sent over the wire, and a
//! ceiling on the number of output tokens. The set is closed; adding a model
//! means adding a variant here and teaching a provider client about it.

use crate::selector::Selectable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Companies that provide access to AI models over an HTTP API.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Provider {
    /// Anthropic, makers of Claude.
    Anthropic,

    /// Google, makers of Gemini.
    Google,
}

/// Fixed generation settings for a [`Model`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModelConfig {
    /// The provider serving the model.
    pub provider: Provider,

    /// The identifier the provider's API expects.
    pub model_id: &'static str,

    /// Maximum number of tokens the model may generate per draft.
    pub max_tokens: u32,
}

/// Models that can be used to generate drafts.
///
/// The name of each model (its [`Display`](fmt::Display) form) is the
/// canonical name users pass on the command line. Shorter aliases are also
/// accepted; see [`Model::aliases()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Model {
    /// Anthropic's Claude Opus 4.5.
    #[serde(rename = "claude-opus-4.5")]
    ClaudeOpus4_5,

    /// Google's Gemini 2.5 Pro.
    #[serde(rename = "gemini-2.5-pro")]
    Gemini2_5Pro,
}

impl Model {
    const ALL: [Model; 2] = [Model::ClaudeOpus4_5, Model::Gemini2_5Pro];

    const ALIASES: [(&'static str, Model); 2] = [
        ("claude", Model::ClaudeOpus4_5),
        ("gemini", Model::Gemini2_5Pro),
    ];

    /// Every supported model, in the order drafts are generated.
    pub fn all() -> &'static [Model] {
        &Self::ALL
    }

    /// Shorthand names for models, mapped to the models they stand for.
    pub fn aliases() -> &'static [(&'static str, Model)] {
        &Self::ALIASES
    }

    /// The canonical name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            Model::ClaudeOpus4_5 => "claude-opus-4.5",
            Model::Gemini2_5Pro => "gemini-2.5-pro",
        }
    }

    /// Generation settings for the model.
    pub fn config(&self) -> ModelConfig {
        match self {
            Model::ClaudeOpus4_5 => ModelConfig {
                provider: Provider::Anthropic,
                model_id: "claude-opus-4-5-20251101",
                max_tokens: 1024,
            },
            Model::Gemini2_5Pro => ModelConfig {
                provider: Provider::Google,
                model_id: "gemini-2.5-pro",
                max_tokens: 1024,
            },
        }
    }

    /// The provider serving the model.
    pub fn provider(&self) -> Provider {
        self.config().provider
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Selectable for Model {
    fn all() -> &'static [Self] {
        Model::all()
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        Model::aliases()
    }

    fn name(&self) -> &str {
        Model::name(self)
    }
}
