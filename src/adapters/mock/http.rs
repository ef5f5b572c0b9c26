//! Mock HTTP transport for testing.
//!
//! Responses are scripted per method and URL. Queued responses are served
//! first (FIFO), then the fixed response for the route, then a prefix match,
//! then the default. Every request is recorded before any artificial delay,
//! so counts include calls that are still in flight.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

impl RecordedRequest {
    /// The `Authorization` header value, if any.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response with this status and body
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
    /// Answer `matched` when the request carries `Bearer {token}`,
    /// otherwise `otherwise`
    ByBearer {
        token: String,
        matched: Box<MockResponse>,
        otherwise: Box<MockResponse>,
    },
}

impl MockResponse {
    /// A response with a JSON body.
    pub fn json(status: u16, body: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        MockResponse::Success(Response::with_headers(
            status,
            headers,
            Bytes::from(body.to_string()),
        ))
    }

    /// A response with an empty body.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }

    /// Answer `matched` for `Bearer {token}`, and 401 for anything else.
    pub fn require_bearer(token: &str, matched: MockResponse) -> Self {
        MockResponse::ByBearer {
            token: token.to_string(),
            matched: Box::new(matched),
            otherwise: Box::new(MockResponse::json(401, r#"{"error":"token expired"}"#)),
        }
    }

    fn resolve(self, headers: &Headers) -> Result<Response, HttpError> {
        match self {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
            MockResponse::ByBearer {
                token,
                matched,
                otherwise,
            } => {
                let expected = format!("Bearer {}", token);
                let presented = headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                    .map(|(_, value)| value.as_str());
                if presented == Some(expected.as_str()) {
                    matched.resolve(headers)
                } else {
                    otherwise.resolve(headers)
                }
            }
        }
    }
}

/// Mock HTTP client for testing.
///
/// Clones share configuration and recorded requests.
///
/// # Example
///
/// ```ignore
/// use erpsync::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response("GET", "http://erp.test/orders", MockResponse::json(200, "[]"));
///
/// let response = client.get("http://erp.test/orders", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.count_requests("GET", "http://erp.test/orders"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Fixed responses keyed by "METHOD url"
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// One-shot responses served before the fixed ones
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Response when nothing else matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Artificial latency per route key
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    /// Artificial latency for every request
    default_delay: Arc<Mutex<Option<Duration>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn route_key(method: &str, url: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), url)
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed response for a method and URL.
    pub fn set_response(&self, method: &str, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(route_key(method, url), response);
    }

    /// Queue a response served once, ahead of the fixed response.
    pub fn push_response(&self, method: &str, url: &str, response: MockResponse) {
        self.queued
            .lock()
            .unwrap()
            .entry(route_key(method, url))
            .or_default()
            .push_back(response);
    }

    /// Set a default response for requests without a match.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Delay responses for one route.
    pub fn set_delay(&self, method: &str, url: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(route_key(method, url), delay);
    }

    /// Delay every response that has no route-specific delay.
    pub fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.lock().unwrap() = Some(delay);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests for a method and URL.
    pub fn requests_to(&self, method: &str, url: &str) -> Vec<RecordedRequest> {
        let method = method.to_ascii_uppercase();
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method && r.url == url)
            .collect()
    }

    /// Number of requests made to a method and URL.
    pub fn count_requests(&self, method: &str, url: &str) -> usize {
        self.requests_to(method, url).len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: Method, url: &str, headers: &Headers, body: Option<&str>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.as_str().to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
    }

    fn delay_for(&self, key: &str) -> Option<Duration> {
        if let Some(delay) = self.delays.lock().unwrap().get(key) {
            return Some(*delay);
        }
        *self.default_delay.lock().unwrap()
    }

    fn response_for(&self, key: &str) -> Option<MockResponse> {
        if let Some(queue) = self.queued.lock().unwrap().get_mut(key) {
            if let Some(response) = queue.pop_front() {
                return Some(response);
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(key) {
            return Some(response.clone());
        }

        // Longest prefix wins so "GET http://x/orders" beats "GET http://x"
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| key.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }
        drop(responses);

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body);

        let key = route_key(method.as_str(), url);
        if let Some(delay) = self.delay_for(&key) {
            tokio::time::sleep(delay).await;
        }

        match self.response_for(&key) {
            Some(response) => response.resolve(headers),
            None => Err(HttpError::Other(format!("No mock response for {}", key))),
        }
    }
}
