//! Request handlers for the relay endpoints.

use crate::error::{ServerError, ServerResult};
use crate::store::ConversationStore;
use duet_protocol::{FetchParams, Message, NewMessage, RawResponse, MESSAGES_PATH};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler for relay requests.
///
/// Implements the wire contract on top of a [`ConversationStore`] without
/// depending on an HTTP library, so the same logic backs the axum server
/// and in-process dispatch.
pub struct RequestHandler {
    store: Arc<ConversationStore>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Parses and appends a message from a raw request body.
    pub fn append(&self, body: &[u8]) -> ServerResult<Message> {
        let request =
            NewMessage::from_json(body).map_err(|e| ServerError::InvalidJson(e.to_string()))?;
        self.store.append(request)
    }

    /// Reads messages for the given query parameters.
    pub fn fetch(&self, params: &FetchParams) -> Vec<Message> {
        self.store.query(&params.scope(), params.since())
    }

    /// Handles `POST /messages`.
    pub fn handle_append(&self, body: &[u8]) -> RawResponse {
        match self.append(body) {
            Ok(message) => {
                debug!(id = %message.id, "POST /messages -> 201");
                json_response(201, &message)
            }
            Err(e) => {
                debug!(error = %e, "POST /messages rejected");
                error_response(&e)
            }
        }
    }

    /// Handles `GET /messages` with an optional raw query string.
    pub fn handle_fetch(&self, query: Option<&str>) -> RawResponse {
        let params = parse_query(query.unwrap_or_default());
        let messages = self.fetch(&params);
        debug!(
            since = params.since().unwrap_or("-"),
            count = messages.len(),
            "GET /messages -> 200"
        );
        json_response(200, &messages)
    }

    /// Response for unknown paths and methods.
    pub fn handle_not_found(&self, path: &str) -> RawResponse {
        error_response(&ServerError::NotFound(path.to_string()))
    }

    /// Routes a request given its method, target (`path?query`) and body.
    pub fn dispatch(&self, method: &str, target: &str, body: &[u8]) -> RawResponse {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };

        if path != MESSAGES_PATH {
            return self.handle_not_found(path);
        }

        match method.to_ascii_uppercase().as_str() {
            "GET" => self.handle_fetch(query),
            "POST" => self.handle_append(body),
            _ => self.handle_not_found(path),
        }
    }
}

/// Parses a `GET /messages` query string. The first occurrence of a key wins.
pub(crate) fn parse_query(query: &str) -> FetchParams {
    let mut params = FetchParams::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            "since" => &mut params.since,
            "from_user" => &mut params.from_user,
            "to" => &mut params.to,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }
    params
}

fn json_response<T: Serialize>(status: u16, value: &T) -> RawResponse {
    RawResponse::json(status, value).unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode response");
        error_response(&ServerError::Internal(e.to_string()))
    })
}

fn error_response(error: &ServerError) -> RawResponse {
    let body = serde_json::to_vec(&error.error_body()).unwrap_or_default();
    RawResponse::new(error.status_code(), body)
}
