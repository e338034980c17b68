//! Rhetorical styles a draft can be written in.

use crate::selector::Selectable;
use indoc::indoc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A rhetorical mode governing the tone and structure of a draft.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Straightforward and information-focused.
    Direct,

    /// Opens with a hook that stops the scroll.
    Engaging,

    /// Casual, like talking to a friend.
    Conversational,

    /// A bold stance or hot take.
    Controversial,

    /// A short narrative with a personal angle.
    Story,
}

impl Style {
    const ALL: [Style; 5] = [
        Style::Direct,
        Style::Engaging,
        Style::Conversational,
        Style::Controversial,
        Style::Story,
    ];

    /// Every style, in the order drafts are generated.
    pub fn all() -> &'static [Style] {
        &Self::ALL
    }

    /// The lowercase name of the style.
    pub fn name(&self) -> &'static str {
        match self {
            Style::Direct => "direct",
            Style::Engaging => "engaging",
            Style::Conversational => "conversational",
            Style::Controversial => "controversial",
            Style::Story => "story",
        }
    }

    /// Instructions telling a model how to write in this style.
    pub fn instructions(&self) -> &'static str {
        match self {
            Style::Direct => indoc! {"
                Style: Direct
                - Be straightforward and information-focused
                - Lead with the main point
                - Use clear, simple language
                - No fluff or filler words
                - Get to the point immediately"},
            Style::Engaging => indoc! {"
                Style: Engaging
                - Start with a compelling hook
                - Create curiosity that makes people want to read more
                - Use power words that grab attention
                - Ask questions or make bold statements
                - Make readers stop scrolling"},
            Style::Conversational => indoc! {"
                Style: Conversational
                - Write as if talking to a friend
                - Use casual, relatable language
                - Include personal touches
                - Feel approachable and authentic
                - Use contractions and informal phrasing"},
            Style::Controversial => indoc! {"
                Style: Controversial
                - Take a bold stance or hot take
                - Challenge conventional wisdom
                - Express a strong opinion
                - Be provocative but not offensive
                - Spark discussion and debate"},
            Style::Story => indoc! {"
                Style: Story
                - Use a narrative-based approach
                - Share a personal angle or experience
                - Create an emotional connection
                - Paint a picture with words
                - Make it memorable and relatable"},
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a [`Style`].
#[derive(Debug, Error, PartialEq)]
#[error("unknown style: {0}")]
pub struct UnknownStyle(String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Style as Selectable>::from_token(&s.trim().to_lowercase())
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

impl Selectable for Style {
    fn all() -> &'static [Self] {
        Style::all()
    }

    fn name(&self) -> &str {
        Style::name(self)
    }
}
