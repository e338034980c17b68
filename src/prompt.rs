//! Builds the prompts sent to AI models.
//!
//! Every request is made of two prompts: a _system prompt_ that sets up the
//! model's behavior (general guidelines, the [`Style`] to write in, and
//! example posts to learn from) and a _user prompt_ naming the topic to
//! write about.

use crate::style::Style;
use indoc::{formatdoc, indoc};
use std::fmt::Write;

const BASE_SYSTEM_PROMPT: &str = indoc! {"
    You are an expert tweet writer who creates engaging, high-performing tweets.
    Your goal is to help users craft tweets that resonate with their audience while maintaining their authentic voice.

    Guidelines:
    - Keep tweets under 280 characters
    - Be concise and impactful
    - Avoid hashtags unless specifically requested
    - Write naturally, as a real person would"};

/// Heading introducing examples of the user's own posts.
pub const VOICE_HEADING: &str = "## User's Writing Style";

/// Heading introducing examples of popular posts.
pub const PATTERNS_HEADING: &str = "## Popular Tweet Patterns";

const VOICE_PREAMBLE: &str =
    "Here are examples of the user's previous tweets. Mimic their tone and voice:";

const PATTERNS_PREAMBLE: &str = "Here are examples of high-performing tweets. \
     Learn from their structure and engagement patterns:";

/// The pair of prompts for a single generation request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PromptPair {
    user_prompt: String,
    system_prompt: String,
}

impl PromptPair {
    /// The prompt naming the topic of the post.
    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    /// The prompt describing how the model should write.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Builds the prompts for a post about `topic` written in `style`.
///
/// `voice_examples` are the user's own posts, which the model is asked to
/// imitate, and `pattern_examples` are popular posts whose structure the
/// model should learn from. Either may be empty, in which case the system
/// prompt omits that section entirely.
///
/// Building prompts is deterministic: the same arguments always produce
/// the same prompts.
///
/// # Examples
///
/// ```
/// use xdraft::prompt::{self, PATTERNS_HEADING, VOICE_HEADING};
/// use xdraft::style::Style;
///
/// let prompts = prompt::build(Style::Direct, "rust", &[], &[]);
/// assert!(prompts.user_prompt().contains("rust"));
/// assert!(!prompts.system_prompt().contains(VOICE_HEADING));
/// assert!(!prompts.system_prompt().contains(PATTERNS_HEADING));
/// ```
pub fn build(
    style: Style,
    topic: &str,
    voice_examples: &[String],
    pattern_examples: &[String],
) -> PromptPair {
    let mut system_prompt = format!("{BASE_SYSTEM_PROMPT}\n\n{}", style.instructions());
    push_examples(
        &mut system_prompt,
        VOICE_HEADING,
        VOICE_PREAMBLE,
        voice_examples,
    );
    push_examples(
        &mut system_prompt,
        PATTERNS_HEADING,
        PATTERNS_PREAMBLE,
        pattern_examples,
    );

    let user_prompt = formatdoc! {"
        Write a tweet about the following topic:

        {topic}

        Respond with only the tweet text, no explanations or alternatives."};

    PromptPair {
        user_prompt,
        system_prompt,
    }
}

fn push_examples(prompt: &mut String, heading: &str, preamble: &str, examples: &[String]) {
    if examples.is_empty() {
        return;
    }

    prompt.push_str(&format!("\n\n{heading}\n{preamble}\n"));
    for (i, example) in examples.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = write!(prompt, "\nExample {}:\n\"{}\"\n", i + 1, example.trim());
    }
}
