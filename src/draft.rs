//! Drafting posts across models and styles.
//!
//! A [`Drafter`] takes a topic, the models and styles to draft with, and the
//! reference texts used to steer the models, and asks every model for a
//! draft in every style. Drafts are requested concurrently but always come
//! back in the same order: grouped by model, then by style, in the order the
//! models and styles were given.

use crate::ai::Auth;
use crate::ai::client::claude::{self, ClaudeClient};
use crate::ai::client::gemini::{self, GeminiClient};
use crate::ai::client::{APIClient, GenerationResult};
use crate::ai::service::{APIService, HTTPService};
use crate::http::HTTPClientFactory;
use crate::model::{Model, Provider};
use crate::prompt;
use crate::selector;
use crate::style::Style;
use futures::future::join_all;
use itertools::Itertools;
use log::debug;

/// Generates text with a given model.
pub trait Generator: Sync {
    /// Asks `model` to respond to `prompt` according to `system_prompt`.
    fn generate(
        &self,
        model: Model,
        prompt: &str,
        system_prompt: &str,
    ) -> impl Future<Output = GenerationResult> + Send;
}

/// A client for every supported provider.
///
/// Credentials are read once, when the providers are created. A missing
/// credential does not prevent creation; instead, every draft requested
/// from that provider's models fails with an error naming the credential.
#[derive(Debug)]
pub struct Providers<S: APIService = HTTPService> {
    claude: ClaudeClient<S>,
    gemini: GeminiClient<S>,
}

impl Providers {
    /// Creates clients for every provider using credentials from the
    /// environment. All clients share a single HTTP client.
    pub fn from_env(factory: &HTTPClientFactory) -> Self {
        let service = HTTPService::new(factory);
        let claude = ClaudeClient::new(Auth::from_env(claude::API_KEY_VAR), service.clone());
        let gemini = GeminiClient::new(Auth::from_env(gemini::API_KEY_VAR), service);
        Self::new(claude, gemini)
    }
}

impl<S: APIService> Providers<S> {
    /// Creates providers from existing clients.
    pub fn new(claude: ClaudeClient<S>, gemini: GeminiClient<S>) -> Self {
        Self { claude, gemini }
    }
}

impl<S: APIService> Generator for Providers<S> {
    async fn generate(&self, model: Model, prompt: &str, system_prompt: &str) -> GenerationResult {
        match model.provider() {
            Provider::Anthropic => self.claude.generate(prompt, system_prompt).await,
            Provider::Google => self.gemini.generate(prompt, system_prompt).await,
        }
    }
}

/// A draft written by a model in a given style, or the reason the model
/// could not write it.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    model: Model,
    style: Style,
    result: GenerationResult,
}

impl Draft {
    /// Creates a new draft.
    pub fn new(model: Model, style: Style, result: GenerationResult) -> Self {
        Self {
            model,
            style,
            result,
        }
    }

    /// The model that wrote the draft.
    pub fn model(&self) -> Model {
        self.model
    }

    /// The style the draft was written in.
    pub fn style(&self) -> Style {
        self.style
    }

    /// The generated text, or the reason generation failed.
    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    /// The text to show for the draft: the draft itself, or an error
    /// message starting with `Error: `.
    ///
    /// # Examples
    ///
    /// ```
    /// use xdraft::ai::GenerationError;
    /// use xdraft::draft::Draft;
    /// use xdraft::model::Model;
    /// use xdraft::style::Style;
    ///
    /// let draft = Draft::new(Model::Gemini2_5Pro, Style::Story, Err(GenerationError::RateLimited));
    /// assert_eq!(draft.text(), "Error: Rate limit exceeded");
    /// ```
    pub fn text(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(err) => format!("Error: {err}"),
        }
    }
}

/// Resolves a comma-separated list of model names or aliases.
///
/// Unknown names are ignored. If the list is absent or names no known
/// model, every model is returned.
pub fn resolve_models(selector: Option<&str>) -> Vec<Model> {
    selector::resolve(selector)
}

/// Resolves a comma-separated list of style names.
///
/// Unknown names are ignored. If the list is absent or names no known
/// style, every style is returned.
pub fn resolve_styles(selector: Option<&str>) -> Vec<Style> {
    selector::resolve(selector)
}

/// Drafts posts with a [`Generator`].
#[derive(Debug)]
pub struct Drafter<G: Generator> {
    generator: G,
}

impl<G: Generator> Drafter<G> {
    /// Creates a drafter that generates text with `generator`.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Drafts a post about `topic` with every model in every style.
    ///
    /// Returns exactly one draft per (model, style) pair, ordered by model
    /// and then by style. Failed drafts are included.
    pub async fn run_all(
        &self,
        topic: &str,
        models: &[Model],
        styles: &[Style],
        voice_examples: &[String],
        pattern_examples: &[String],
    ) -> Vec<Draft> {
        let drafts = models
            .iter()
            .cartesian_product(styles)
            .map(|(&model, &style)| {
                self.draft(model, style, topic, voice_examples, pattern_examples)
            });
        join_all(drafts).await
    }

    /// Drafts a single post about `topic` with `model` in `style`.
    pub async fn draft(
        &self,
        model: Model,
        style: Style,
        topic: &str,
        voice_examples: &[String],
        pattern_examples: &[String],
    ) -> Draft {
        debug!("drafting with {model} in {style} style");
        let prompts = prompt::build(style, topic, voice_examples, pattern_examples);
        let result = self
            .generator
            .generate(model, prompts.user_prompt(), prompts.system_prompt())
            .await;
        Draft::new(model, style, result)
    }
}
