//! HTTP transport implementation.
//!
//! This module provides an HTTP-based transport for the sync engine.
//! The actual HTTP client is abstracted via a trait so that the blocking
//! [`UreqClient`] can be swapped for an in-process [`LoopbackClient`] or a
//! test double.

use crate::error::{SyncError, SyncResult};
use crate::transport::MessageTransport;
use duet_protocol::{FetchParams, Message, NewMessage, RawResponse, MESSAGES_PATH};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client abstraction.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and `Err` only for network-level failures
/// (connection errors, timeouts).
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<RawResponse, String>;

    /// Sends a POST request with a JSON body.
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<RawResponse, String>;
}

/// HTTP-based message transport.
///
/// Uses JSON request/response bodies against `{base_url}/messages`.
pub struct HttpTransport<C: HttpClient> {
    /// Base URL of the relay (e.g., "http://127.0.0.1:20202").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Last error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    ///
    /// A trailing `/` or `/messages` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        if let Some(stripped) = base_url.strip_suffix(MESSAGES_PATH) {
            base_url = stripped.to_string();
        }

        Self {
            base_url,
            client,
            last_error: RwLock::new(None),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn messages_url(&self, params: Option<&FetchParams>) -> SyncResult<String> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, MESSAGES_PATH))
            .map_err(|e| SyncError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        if let Some(params) = params {
            let pairs = params.query_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        Ok(url.into())
    }

    fn record<T>(&self, result: SyncResult<T>) -> SyncResult<T> {
        match &result {
            Ok(_) => *self.last_error.write() = None,
            Err(e) => *self.last_error.write() = Some(e.to_string()),
        }
        result
    }

    fn decode<T: DeserializeOwned>(
        response: Result<RawResponse, String>,
    ) -> SyncResult<T> {
        let response = response.map_err(SyncError::transport)?;

        if !response.is_success() {
            return Err(SyncError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| SyncError::Parse(format!("failed to decode response: {}", e)))
    }
}

impl<C: HttpClient> MessageTransport for HttpTransport<C> {
    fn fetch(&self, params: &FetchParams) -> SyncResult<Vec<Message>> {
        let result = self.messages_url(Some(params)).and_then(|url| {
            debug!(url = %url, "GET");
            Self::decode(self.client.get(&url))
        });
        self.record(result)
    }

    fn send(&self, request: &NewMessage) -> SyncResult<Message> {
        let result = self.messages_url(None).and_then(|url| {
            let body = serde_json::to_vec(request)
                .map_err(|e| SyncError::Parse(format!("failed to encode request: {}", e)))?;
            debug!(url = %url, "POST");
            Self::decode(self.client.post_json(&url, body))
        });
        self.record(result)
    }
}

/// Blocking HTTP client backed by a `ureq` agent.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str) -> Result<RawResponse, String> {
        read_response(self.agent.get(url).set("Accept", "application/json").call())
    }

    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<RawResponse, String> {
        read_response(
            self.agent
                .post(url)
                .set("Content-Type", "application/json")
                .set("Accept", "application/json")
                .send_bytes(&body),
        )
    }
}

fn read_response(result: Result<ureq::Response, ureq::Error>) -> Result<RawResponse, String> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(e) => return Err(e.to_string()),
    };

    let status = response.status();
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| e.to_string())?;

    Ok(RawResponse::new(status, body))
}

/// A loopback HTTP client that routes requests directly to a relay.
///
/// Useful for testing without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }

    fn route(&self, method: &str, url: &str, body: &[u8]) -> Result<RawResponse, String> {
        let url = Url::parse(url).map_err(|e| e.to_string())?;
        let target = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        Ok(self.server.handle(method, &target, body))
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer: Send + Sync {
    /// Handles a request given its method, target (`path?query`) and body.
    fn handle(&self, method: &str, target: &str, body: &[u8]) -> RawResponse;
}

impl<S: LoopbackServer + ?Sized> LoopbackServer for Arc<S> {
    fn handle(&self, method: &str, target: &str, body: &[u8]) -> RawResponse {
        (**self).handle(method, target, body)
    }
}

impl<S: LoopbackServer> HttpClient for LoopbackClient<S> {
    fn get(&self, url: &str) -> Result<RawResponse, String> {
        self.route("GET", url, &[])
    }

    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<RawResponse, String> {
        self.route("POST", url, &body)
    }
}
