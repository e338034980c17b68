// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! Services for communicating with AI APIs using HTTP.

use crate::http::{HTTPClientFactory, HTTPError, HTTPResult};
use log::trace;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A general service for making HTTP calls to an API.
///
/// While this may appear to be more like a "client", think of it as a
/// proxy for a (possibly remote) API service. Provider clients talk to
/// their APIs exclusively through this trait, which makes it easy to swap
/// in a deterministic service when writing tests.
pub trait APIService: Sync {
    /// Send a POST request to the `uri` with the JSON object `data` as
    /// the POST request body and `headers` (usually carrying credentials)
    /// as additional request headers.
    ///
    /// The response is deserialized from a string to the JSON object
    /// specified in the `R` type parameter. Unsuccessful HTTP statuses are
    /// returned as [`HTTPError::Http`] along with the response body.
    fn post<D, R>(
        &self,
        uri: &str,
        headers: HeaderMap,
        data: &D,
    ) -> impl Future<Output = HTTPResult<R>> + Send
    where
        D: Serialize + Sync,
        R: DeserializeOwned;
}

/// A concrete implementation of an HTTP API service.
///
/// This is the service used by every AI client outside of tests. It more
/// or less just wraps a Reqwest client. Cloning the service is cheap and
/// shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HTTPService {
    client: Client,
}

impl HTTPService {
    /// Creates a new HTTP service using a client from the given factory.
    pub fn new(factory: &HTTPClientFactory) -> Self {
        let client = factory.create();
        Self { client }
    }
}

impl APIService for HTTPService {
    async fn post<D, R>(&self, uri: &str, headers: HeaderMap, data: &D) -> HTTPResult<R>
    where
        D: Serialize + Sync,
        R: DeserializeOwned,
    {
        trace!("POST {uri}");
        let resp = self
            .client
            .post(uri)
            .headers(headers)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .json(data)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        trace!("{uri} returned HTTP {status}");

        if !status.is_success() {
            Err(HTTPError::Http(status, body))
        } else {
            Ok(serde_json::from_str(&body)?)
        }
    }
}
