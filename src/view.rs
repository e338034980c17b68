//! Draws viewable objects into a terminal window.

use crate::draft::Draft;
use crate::model::Model;
use crate::style::Style;
use crate::text::rule;
use crate::x::Post;
use colored::Colorize;
use itertools::Itertools;

/// Width of the rule under a post's author.
const POST_RULE_WIDTH: usize = 50;

/// Width of the rule under a draft's heading.
const DRAFT_RULE_WIDTH: usize = 40;

/// Width of the rule between drafts.
pub const SEPARATOR_WIDTH: usize = 60;

/// View renderer options.
#[derive(Debug)]
pub struct ViewOptions {
    raw: bool,
    width: Option<usize>,
}

impl Default for ViewOptions {
    /// Colored output, wrapped to the width of the terminal.
    fn default() -> Self {
        Self {
            raw: false,
            width: Some(textwrap::termwidth()),
        }
    }
}

impl ViewOptions {
    /// Incrementally builds a new set of view options.
    ///
    /// # Examples
    ///
    /// ```
    /// use xdraft::view::ViewOptions;
    /// let opts = ViewOptions::build().raw(true).width(None).build();
    /// ```
    pub fn build() -> ViewOptionsBuilder {
        ViewOptionsBuilder::default()
    }

    fn wrap(&self, text: &str) -> String {
        match self.width {
            Some(width) => text
                .lines()
                .map(|line| textwrap::fill(line, width))
                .join("\n"),
            None => text.to_string(),
        }
    }

    fn emphasize(&self, text: &str) -> String {
        if self.raw {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.raw {
            text.to_string()
        } else {
            text.red().to_string()
        }
    }
}

/// A builder for view options.
///
/// You probably don't want to use this directly; call [`ViewOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug)]
#[must_use]
pub struct ViewOptionsBuilder {
    raw: bool,
    width: Option<usize>,
}

impl Default for ViewOptionsBuilder {
    fn default() -> Self {
        let ViewOptions { raw, width } = ViewOptions::default();
        Self { raw, width }
    }
}

impl ViewOptionsBuilder {
    /// Sets the "raw" option, which disables colors and other styling.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Sets the width text is wrapped to, or `None` to disable wrapping.
    pub fn width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    /// Finalizes the [`ViewOptions`].
    pub fn build(self) -> ViewOptions {
        ViewOptions {
            raw: self.raw,
            width: self.width,
        }
    }
}

/// Marks an item that can be converted into a string for display on a terminal.
pub trait Viewable {
    /// Converts the item into a string for display on a terminal.
    fn view(&self, opts: &ViewOptions) -> String;
}

impl Viewable for Post {
    fn view(&self, opts: &ViewOptions) -> String {
        let mut lines = Vec::new();

        if let Some(author) = self.author() {
            let byline = format!("@{} ({})", author.screen_name(), author.name());
            lines.push(opts.emphasize(&byline));
            lines.push(rule('\u{2500}', POST_RULE_WIDTH));
        }

        lines.push(opts.wrap(self.text()));

        if let Some(created_at) = self.created_local() {
            lines.push(String::new());
            lines.push(format!(
                "Posted: {}",
                created_at.format("%-m/%-d/%Y, %-I:%M:%S %p")
            ));
        }

        let stats = [
            self.like_count().map(|n| format!("{n} likes")),
            self.repost_count().map(|n| format!("{n} retweets")),
            self.reply_count().map(|n| format!("{n} replies")),
        ];
        let stats = stats.into_iter().flatten().join(" | ");
        if !stats.is_empty() {
            lines.push(stats);
        }

        lines.join("\n")
    }
}

impl Viewable for Draft {
    fn view(&self, opts: &ViewOptions) -> String {
        let heading = format!("[{}] [{}]", self.model(), self.style());
        let text = match self.result() {
            Ok(_) => opts.wrap(&self.text()),
            Err(_) => opts.warn(&self.text()),
        };
        format!(
            "{}\n{}\n{}",
            opts.emphasize(&heading),
            rule('-', DRAFT_RULE_WIDTH),
            text
        )
    }
}

/// A summary of what is about to be drafted.
#[derive(Debug)]
pub struct Briefing<'a> {
    topic: &'a str,
    models: &'a [Model],
    styles: &'a [Style],
    voice_count: usize,
    pattern_count: usize,
}

impl<'a> Briefing<'a> {
    /// Summarizes drafting `topic` with `models` in `styles`, guided by
    /// `voice_count` of the user's posts and `pattern_count` popular posts.
    pub fn new(
        topic: &'a str,
        models: &'a [Model],
        styles: &'a [Style],
        voice_count: usize,
        pattern_count: usize,
    ) -> Self {
        Self {
            topic,
            models,
            styles,
            voice_count,
            pattern_count,
        }
    }
}

impl Viewable for Briefing<'_> {
    fn view(&self, opts: &ViewOptions) -> String {
        let heading = format!("Generating drafts for topic: \"{}\"", self.topic);
        [
            opts.emphasize(&heading),
            format!("Models: {}", self.models.iter().join(", ")),
            format!("Styles: {}", self.styles.iter().join(", ")),
            format!("User tweets loaded: {}", self.voice_count),
            format!("Popular tweets loaded: {}", self.pattern_count),
        ]
        .join("\n")
    }
}
