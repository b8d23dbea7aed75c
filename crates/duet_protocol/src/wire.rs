//! HTTP wire contract shared by server and client.

use serde::{Deserialize, Serialize};

/// Path serving both appends and reads.
pub const MESSAGES_PATH: &str = "/messages";

/// Content type of every response body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Error body returned with 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short machine-readable reason.
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// `{"error": "missing fields"}`
    pub fn missing_fields() -> Self {
        Self::new("missing fields")
    }

    /// `{"error": "invalid json"}`
    pub fn invalid_json() -> Self {
        Self::new("invalid json")
    }

    /// `{"error": "not found"}`
    pub fn not_found() -> Self {
        Self::new("not found")
    }
}

/// A status code and body, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Serializes `value` as the JSON body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status, serde_json::to_vec(value)?))
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies() {
        let body = serde_json::to_string(&ErrorBody::missing_fields()).unwrap();
        assert_eq!(body, r#"{"error":"missing fields"}"#);
        assert_eq!(ErrorBody::not_found().error, "not found");
    }

    #[test]
    fn raw_response_status_classes() {
        assert!(RawResponse::new(201, "{}").is_success());
        assert!(!RawResponse::new(404, "{}").is_success());
        assert!(!RawResponse::new(503, Vec::new()).is_success());
        assert_eq!(RawResponse::new(400, "oops").text(), "oops");
    }
}
