use crate::ai::service::APIService;
use crate::http::{HTTPError, HTTPResult};
use crate::x::service::Service;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

pub fn load_output(filename: &str) -> String {
    let filename = format!("tests/output/{filename}.out");
    String::from(
        fs::read_to_string(&filename)
            .expect(&format!("could not load test data from {filename}"))
            .trim_end(),
    )
}

/// A request received by a [`TestService`].
#[derive(Debug)]
pub struct RecordedRequest {
    pub uri: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
    pub at: Instant,
}

/// An API service that replays scripted responses, one per request, and
/// records every request it receives.
#[derive(Debug, Default)]
pub struct TestService {
    responses: Mutex<VecDeque<HTTPResult<String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl TestService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response with the given JSON body.
    pub fn respond_with(self, body: impl Into<String>) -> Self {
        self.push(Ok(body.into()))
    }

    /// Queues an unsuccessful response.
    pub fn fail_with(self, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).expect("invalid status code");
        self.push(Err(HTTPError::Http(status, body.into())))
    }

    /// Queues an arbitrary error.
    pub fn fail_with_error(self, error: HTTPError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: HTTPResult<String>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// The number of requests received so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Runs `f` with the `n`th request received (counting from zero).
    pub fn with_request<T>(&self, n: usize, f: impl FnOnce(&RecordedRequest) -> T) -> T {
        let requests = self.requests.lock().unwrap();
        f(requests.get(n).expect("no such request"))
    }

    /// The time that passed between each request and the one before it.
    pub fn gaps(&self) -> Vec<Duration> {
        let requests = self.requests.lock().unwrap();
        requests.windows(2).map(|w| w[1].at - w[0].at).collect()
    }
}

impl APIService for TestService {
    async fn post<D, R>(&self, uri: &str, headers: HeaderMap, data: &D) -> HTTPResult<R>
    where
        D: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(data)?;
        self.requests.lock().unwrap().push(RecordedRequest {
            uri: uri.to_string(),
            headers,
            body,
            at: Instant::now(),
        });
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {uri}"));
        Ok(serde_json::from_str(&response?)?)
    }
}

/// A service for fetching posts that serves canned responses by URI prefix.
#[derive(Debug, Default)]
pub struct TestPostService {
    routes: HashMap<&'static str, (u16, String)>,
    requests: Mutex<Vec<String>>,
}

impl TestPostService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the JSON test data in `file` for URIs starting with `prefix`.
    pub fn route(mut self, prefix: &'static str, file: &str) -> Self {
        self.routes.insert(prefix, (200, load_data(file)));
        self
    }

    /// Answers URIs starting with `prefix` with an error status.
    pub fn fail(mut self, prefix: &'static str, status: u16) -> Self {
        self.routes.insert(prefix, (status, String::new()));
        self
    }

    /// Every URI requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Service for TestPostService {
    async fn get(&self, uri: &str) -> HTTPResult<String> {
        self.requests.lock().unwrap().push(uri.to_string());
        let (status, body) = self
            .routes
            .iter()
            .find(|(prefix, _)| uri.starts_with(*prefix))
            .map(|(_, response)| response.clone())
            .unwrap_or((404, String::new()));
        if status == 200 {
            Ok(body)
        } else {
            let status = StatusCode::from_u16(status).expect("invalid status code");
            Err(HTTPError::Http(status, body))
        }
    }
}
