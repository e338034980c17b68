// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! xdraft is a command-line tool for drafting posts for X. Give it a topic
//! and it asks several AI models to write a post about it in several
//! rhetorical styles, so you can pick the draft you like best (or combine a
//! few). Drafts are steered by examples of your own writing and by popular
//! posts you want to learn from.
//!
//! # Examples
//!
//! Draft a post with every model in every style:
//!
//! ```bash
//! xdraft draft "why we rewrote our build system in Rust"
//! ```
//!
//! Draft only with Claude, in the direct and story styles:
//!
//! ```bash
//! xdraft draft "why we rewrote our build system in Rust" -m claude -s direct,story
//! ```
//!
//! Fetch a post, for example to save it as a reference post:
//!
//! ```bash
//! xdraft fetch https://x.com/rustlang/status/1790409012345678901
//! xdraft fetch 1790409012345678901 --json
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! xdraft --help
//! ```
//!
//! # Reference posts
//!
//! Reference posts are Markdown files holding one post each. Your own posts
//! go in `data/user-tweets` and popular posts in `data/popular-tweets`,
//! relative to the working directory; set `$XDRAFT_DATA_DIR` to use a
//! different directory than `data`. Both collections are optional.
//!
//! # API Setup
//!
//! Drafting requires API keys for the providers you use:
//!
//! 1. For Claude, create an [Anthropic API account] and an API key, and
//!    store it in `$ANTHROPIC_API_KEY`.
//! 2. For Gemini, create an API key in [Google AI Studio] and store it in
//!    `$GEMINI_API_KEY`.
//!
//! Keys may be exported in your shell's configuration file, or written to a
//! `.env.local` file in the working directory:
//!
//! ```bash
//! ANTHROPIC_API_KEY='copied api key'
//! GEMINI_API_KEY='copied api key'
//! ```
//!
//! A draft from a provider without a key is reported as an error; drafts
//! from the other providers are unaffected.
//!
//! **You are solely responsible for the cost of your use of these APIs!**
//! Every draft is a separate request, so drafting with both models in all
//! five styles makes ten requests.
//!
//! # License
//!
//! xdraft is licensed under the terms of the [Apache License 2.0]. Please
//! see the LICENSE file accompanying this source code or visit the previous
//! link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0
//! [Anthropic API account]: https://console.anthropic.com
//! [Google AI Studio]: https://aistudio.google.com/apikey

pub mod ai;
pub mod cli;
pub mod conf;
pub mod draft;
pub mod http;
pub mod model;
pub mod prompt;
pub mod reference;
pub mod selector;
pub mod style;
pub mod text;
pub mod view;
pub mod x;

#[cfg(test)]
mod test_utils;
