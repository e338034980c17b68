// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! Clients for reading posts.

use crate::http::HTTPClientFactory;
use crate::x::post::Post;
use crate::x::service::{Service, XService};
use crate::x::{Error, Lookup, extract_post_id};
use log::{debug, info, warn};
use rand::Rng;

const SYNDICATION_URL: &str = "https://cdn.syndication.twimg.com/tweet-result";

const MIRROR_URL: &str = "https://api.fxtwitter.com/status";

/// Reads single posts by URL or ID.
///
/// Failures are logged and reported as `None`; the reason a post could not
/// be read is rarely actionable, since posts are commonly deleted or
/// protected.
#[derive(Debug)]
pub struct PostFetcher<S: Service = XService> {
    service: S,
}

impl PostFetcher {
    /// Creates a fetcher that reads posts from X.
    pub fn new(factory: &HTTPClientFactory) -> Self {
        Self::with_service(XService::new(factory))
    }
}

impl<S: Service> PostFetcher<S> {
    /// Creates a fetcher that reads posts using the given `service`.
    pub fn with_service(service: S) -> Self {
        Self { service }
    }

    /// Reads the post identified by `lookup`.
    pub async fn fetch(&self, lookup: &Lookup) -> Option<Post> {
        match lookup {
            Lookup::Url(url) => self.fetch_by_url(url).await,
            Lookup::Id(id) => self.fetch_by_id(id).await,
        }
    }

    /// Reads the post at `url` from the syndication endpoint.
    pub async fn fetch_by_url(&self, url: &str) -> Option<Post> {
        let result = match extract_post_id(url) {
            Some(id) => self.syndicated(&id).await,
            None => Err(Error::InvalidUrl(url.to_string())),
        };
        result.inspect_err(|err| warn!("{err}")).ok()
    }

    /// Reads the post with the given `id` from the syndication endpoint,
    /// falling back to the public mirror if that fails.
    pub async fn fetch_by_id(&self, id: &str) -> Option<Post> {
        match self.syndicated(id).await {
            Ok(post) => Some(post),
            Err(err) => {
                warn!("{err}");
                info!("syndication failed for post {id}, trying mirror");
                self.mirrored(id)
                    .await
                    .inspect_err(|err| warn!("{err}"))
                    .ok()
            }
        }
    }

    async fn syndicated(&self, id: &str) -> Result<Post, Error> {
        let uri = format!("{SYNDICATION_URL}?id={id}&token={}", token());
        debug!("fetching post {id} from syndication endpoint");
        let body = self.service.get(&uri).await?;
        Post::from_syndication(&body)
    }

    async fn mirrored(&self, id: &str) -> Result<Post, Error> {
        let uri = format!("{MIRROR_URL}/{id}");
        debug!("fetching post {id} from mirror");
        let body = self.service.get(&uri).await?;
        Post::from_mirror(&body)
    }
}

/// The syndication endpoint requires a token but does not check it.
fn token() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:06}")
}
