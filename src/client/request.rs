//! Outgoing request description.

use serde::Serialize;
use uuid::Uuid;

use crate::traits::{Headers, Method};

/// An outgoing request, before credentials are attached.
///
/// The replay flag and the token generation are private: only the session
/// layer changes them, and a replayed request is never replayed again.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    id: Uuid,
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    retried: bool,
    token_generation: Option<u64>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            retried: false,
            token_generation: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body and mark it as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Identifier used to correlate log lines for one logical request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether this request has already been replayed after a refresh.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Mark the request as replayed.
    ///
    /// Returns `false` if it already was, in which case nothing changes.
    pub fn mark_retried(&mut self) -> bool {
        if self.retried {
            return false;
        }
        self.retried = true;
        true
    }

    /// Refresh generation current when the token was attached, if any.
    pub fn token_generation(&self) -> Option<u64> {
        self.token_generation
    }

    pub(crate) fn record_generation(&mut self, generation: u64) {
        self.token_generation = Some(generation);
    }

    /// The `Authorization` header, if set.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
    }
}
