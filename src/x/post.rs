// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! Posts and their metadata.

use crate::text::convert_html_entities;
use crate::x::Error;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single public post.
///
/// Posts serialize to JSON with the field names used by X's own API, so
/// the output of `xdraft fetch --json` can be compared with other tools.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Post {
    id: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favorite_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retweet_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<Entities>,
}

impl Post {
    /// Parses a post from the syndication endpoint's JSON.
    pub fn from_syndication(json: &str) -> Result<Self, Error> {
        let raw: SyndicationPost = serde_json::from_str(json)?;
        let id = raw
            .id_str
            .or_else(|| raw.id.map(|id| id.to_string()))
            .unwrap_or_default();
        if id.is_empty() && raw.text.is_empty() {
            return Err(Error::Unavailable);
        }

        let user = raw.user.map(|user| Author {
            name: user.name,
            screen_name: user.screen_name,
            profile_image_url: user.profile_image_url_https,
        });
        let media = raw
            .media_details
            .into_iter()
            .map(|media| Media {
                kind: media.kind,
                url: media.media_url_https.or(media.url).unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            id,
            text: convert_html_entities(&raw.text),
            created_at: raw.created_at.as_deref().and_then(parse_timestamp),
            user,
            favorite_count: raw.favorite_count,
            retweet_count: raw.retweet_count,
            reply_count: raw.reply_count,
            lang: raw.lang,
            media,
            entities: raw.entities,
        })
    }

    /// Parses a post from the public mirror's JSON.
    pub fn from_mirror(json: &str) -> Result<Self, Error> {
        let raw: MirrorResponse = serde_json::from_str(json)?;
        let Some(raw) = raw.tweet else {
            return Err(Error::Unavailable);
        };

        let user = raw.author.map(|author| Author {
            name: author.name,
            screen_name: author.screen_name,
            profile_image_url: author.avatar_url,
        });
        let media = raw
            .media
            .map(|media| media.all)
            .unwrap_or_default()
            .into_iter()
            .map(|media| Media {
                kind: media.kind,
                url: media.url,
            })
            .collect();

        Ok(Self {
            id: raw.id,
            text: convert_html_entities(&raw.text),
            created_at: raw.created_at.as_deref().and_then(parse_timestamp),
            user,
            favorite_count: raw.likes,
            retweet_count: raw.retweets,
            reply_count: raw.replies,
            lang: raw.lang,
            media,
            entities: None,
        })
    }

    /// The post's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text of the post, with HTML entities decoded.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the post was published, in UTC.
    pub fn created_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// When the post was published, in local time.
    pub fn created_local(&self) -> Option<DateTime<Local>> {
        self.created_at.map(|t| t.with_timezone(&Local))
    }

    /// The account that published the post.
    pub fn author(&self) -> Option<&Author> {
        self.user.as_ref()
    }

    /// Number of likes.
    pub fn like_count(&self) -> Option<u64> {
        self.favorite_count
    }

    /// Number of reposts.
    pub fn repost_count(&self) -> Option<u64> {
        self.retweet_count
    }

    /// Number of replies.
    pub fn reply_count(&self) -> Option<u64> {
        self.reply_count
    }

    /// The language the post is written in, as a BCP 47 tag.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Photos and videos attached to the post.
    pub fn media(&self) -> &[Media] {
        &self.media
    }

    /// Hashtags, links, and mentions in the post.
    pub fn entities(&self) -> Option<&Entities> {
        self.entities.as_ref()
    }
}

/// Parses timestamps in either RFC 3339 format or the classic X API format
/// (`Wed Oct 10 20:19:24 +0000 2018`).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%a %b %d %H:%M:%S %z %Y"))
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// The account that published a post.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Author {
    name: String,
    screen_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_image_url: Option<String>,
}

impl Author {
    /// The account's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The account's handle, without the leading `@`.
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    /// URL of the account's profile picture.
    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url.as_deref()
    }
}

/// A photo or video attached to a post.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Media {
    #[serde(rename = "type")]
    kind: String,
    url: String,
}

impl Media {
    /// The kind of media, such as `photo` or `video`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Where the media can be downloaded.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Hashtags, links, and mentions in a post.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entities {
    #[serde(default)]
    hashtags: Vec<Hashtag>,
    #[serde(default)]
    urls: Vec<Link>,
    #[serde(default)]
    user_mentions: Vec<Mention>,
}

impl Entities {
    /// Hashtags, without the leading `#`.
    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.hashtags.iter().map(|h| h.text.as_str())
    }

    /// Links, expanded from their shortened forms.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(|u| u.expanded_url.as_str())
    }

    /// Mentioned accounts, without the leading `@`.
    pub fn mentions(&self) -> impl Iterator<Item = &str> {
        self.user_mentions.iter().map(|m| m.screen_name.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Hashtag {
    text: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Link {
    expanded_url: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Mention {
    screen_name: String,
}

#[derive(Debug, Deserialize)]
struct SyndicationPost {
    id_str: Option<String>,
    id: Option<u64>,
    #[serde(default)]
    text: String,
    created_at: Option<String>,
    user: Option<SyndicationUser>,
    favorite_count: Option<u64>,
    retweet_count: Option<u64>,
    reply_count: Option<u64>,
    lang: Option<String>,
    #[serde(rename = "mediaDetails", default)]
    media_details: Vec<SyndicationMedia>,
    entities: Option<Entities>,
}

#[derive(Debug, Deserialize)]
struct SyndicationUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    screen_name: String,
    profile_image_url_https: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SyndicationMedia {
    #[serde(rename = "type", default)]
    kind: String,
    media_url_https: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MirrorResponse {
    tweet: Option<MirrorPost>,
}

#[derive(Debug, Deserialize)]
struct MirrorPost {
    id: String,
    #[serde(default)]
    text: String,
    created_at: Option<String>,
    author: Option<MirrorAuthor>,
    likes: Option<u64>,
    retweets: Option<u64>,
    replies: Option<u64>,
    lang: Option<String>,
    media: Option<MirrorMedia>,
}

#[derive(Debug, Deserialize)]
struct MirrorAuthor {
    name: String,
    screen_name: String,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MirrorMedia {
    #[serde(default)]
    all: Vec<MirrorMediaItem>,
}

#[derive(Debug, Deserialize)]
struct MirrorMediaItem {
    #[serde(rename = "type")]
    kind: String,
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::load_data;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_a_syndicated_post() {
        let post = Post::from_syndication(&load_data("syndication_post")).unwrap();
        assert_eq!(post.id(), "1790409012345678901");
        assert_eq!(
            post.text(),
            "Rust 1.78 is out! Diagnostics & more: https://t.co/abc123 #rustlang"
        );
        assert_eq!(
            post.created_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 15, 30, 0).unwrap())
        );
        let author = post.author().unwrap();
        assert_eq!(author.name(), "Rust Language");
        assert_eq!(author.screen_name(), "rustlang");
        assert_eq!(
            author.profile_image_url(),
            Some("https://pbs.twimg.com/profile_images/1/rust_normal.png")
        );
        assert_eq!(post.like_count(), Some(4321));
        assert_eq!(post.repost_count(), Some(876));
        assert_eq!(post.reply_count(), Some(54));
        assert_eq!(post.lang(), Some("en"));
    }

    #[test]
    fn it_parses_syndicated_media_and_entities() {
        let post = Post::from_syndication(&load_data("syndication_post")).unwrap();
        let media: Vec<_> = post.media().iter().map(|m| (m.kind(), m.url())).collect();
        assert_eq!(
            media,
            vec![("photo", "https://pbs.twimg.com/media/release.jpg")]
        );

        let entities = post.entities().unwrap();
        assert_eq!(entities.hashtags().collect::<Vec<_>>(), vec!["rustlang"]);
        assert_eq!(
            entities.urls().collect::<Vec<_>>(),
            vec!["https://blog.rust-lang.org/2024/05/02/Rust-1.78.0.html"]
        );
        assert_eq!(entities.mentions().count(), 0);
    }

    #[test]
    fn it_rejects_syndicated_tombstones() {
        let err = Post::from_syndication(r#"{"__typename":"TweetTombstone"}"#).unwrap_err();
        assert!(matches!(err, Error::Unavailable), "{err:?}");
    }

    #[test]
    fn it_rejects_malformed_syndicated_posts() {
        let err = Post::from_syndication("<html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{err:?}");
    }

    #[test]
    fn it_parses_a_mirrored_post() {
        let post = Post::from_mirror(&load_data("mirror_post")).unwrap();
        assert_eq!(post.id(), "1790409012345678901");
        assert_eq!(
            post.text(),
            "Rust 1.78 is out! Diagnostics & more #rustlang"
        );
        assert_eq!(
            post.created_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 15, 30, 0).unwrap())
        );
        assert_eq!(post.author().unwrap().screen_name(), "rustlang");
        assert_eq!(post.like_count(), Some(4321));
        assert_eq!(post.repost_count(), Some(876));
        assert_eq!(post.reply_count(), Some(54));
        assert_eq!(post.media().len(), 1);
        assert_eq!(post.entities(), None);
    }

    #[test]
    fn it_rejects_missing_mirrored_posts() {
        let err = Post::from_mirror(r#"{"code":404,"message":"NOT_FOUND","tweet":null}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Unavailable), "{err:?}");
    }

    #[test]
    fn it_serializes_posts_with_x_field_names() {
        let post = Post::from_syndication(&load_data("syndication_post")).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "1790409012345678901");
        assert_eq!(json["created_at"], "2024-05-02T15:30:00Z");
        assert_eq!(json["user"]["screen_name"], "rustlang");
        assert_eq!(json["favorite_count"], 4321);
        assert_eq!(json["media"][0]["type"], "photo");
        assert_eq!(json["entities"]["hashtags"][0]["text"], "rustlang");
    }

    #[test]
    fn it_omits_missing_fields_when_serializing() {
        let post = Post::from_syndication(r#"{"id_str":"1","text":"hi"}"#).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json, serde_json::json!({"id": "1", "text": "hi"}));
    }

    #[test]
    fn it_parses_classic_timestamps() {
        assert_eq!(
            parse_timestamp("Thu May 02 15:30:00 +0000 2024"),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 15, 30, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
