// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! HTTPS connector for public post endpoints.

use crate::http::{HTTPClientFactory, HTTPError, HTTPResult};
use log::trace;
use reqwest::Client;
use reqwest::header::{self, HeaderValue};

/// The syndication endpoint refuses requests that do not look like they
/// come from a browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// A service for retrieving raw post data.
///
/// Using this trait, clients can implement different ways of connecting
/// to X, such as an actual connector for production code, and a mocked
/// connector for testing purposes.
pub trait Service: Sync {
    /// Performs a GET request to `uri` and returns the raw JSON body.
    fn get(&self, uri: &str) -> impl Future<Output = HTTPResult<String>> + Send;
}

/// A service that contacts X directly to retrieve posts.
#[derive(Clone, Debug)]
pub struct XService {
    client: Client,
}

impl XService {
    /// Creates a new service using a client from the given factory.
    pub fn new(factory: &HTTPClientFactory) -> Self {
        let client = factory.create();
        Self { client }
    }
}

impl Service for XService {
    async fn get(&self, uri: &str) -> HTTPResult<String> {
        trace!("GET {uri}");
        let resp = self
            .client
            .get(uri)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .header(
                header::USER_AGENT,
                HeaderValue::from_static(BROWSER_USER_AGENT),
            )
            .send()
            .await?;

        let status = resp.status();
        trace!("{uri} returned HTTP {status}");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            Err(HTTPError::Http(status, body))
        } else {
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .ok_or(HTTPError::MissingContentType)?
                .to_str()?;
            if !content_type.starts_with("application/json") {
                Err(HTTPError::UnexpectedContentType(content_type.to_string()))
            } else {
                Ok(resp.text().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service() -> XService {
        XService::new(&HTTPClientFactory::new(Duration::from_secs(5)))
    }

    #[tokio::test]
    async fn it_returns_json_bodies() {
        let server = MockServer::start().await;
        let response = ResponseTemplate::new(200)
            .set_body_raw(r#"{"id_str":"20"}"#, "application/json; charset=utf-8");
        Mock::given(method("GET"))
            .and(path("/tweet-result"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", BROWSER_USER_AGENT))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;

        let uri = format!("{}/tweet-result", server.uri());
        let body = service().get(&uri).await.unwrap();
        assert_eq!(body, r#"{"id_str":"20"}"#);
    }

    #[tokio::test]
    async fn it_returns_the_status_and_body_of_unsuccessful_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        match service().get(&server.uri()).await {
            Err(HTTPError::Http(status, body)) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "Not Found");
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn it_rejects_responses_that_are_not_json() {
        let server = MockServer::start().await;
        let response =
            ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html; charset=utf-8");
        Mock::given(method("GET"))
            .respond_with(response)
            .mount(&server)
            .await;

        match service().get(&server.uri()).await {
            Err(HTTPError::UnexpectedContentType(content_type)) => {
                assert_eq!(content_type, "text/html; charset=utf-8");
            }
            other => panic!("expected an unexpected content type, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn it_rejects_responses_without_a_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = service().get(&server.uri()).await;
        assert!(
            matches!(result, Err(HTTPError::MissingContentType)),
            "{result:?}"
        );
    }
}
