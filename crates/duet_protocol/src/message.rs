//! Message records.

use crate::conversation::ConversationKey;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Lifecycle tag of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// A sender-side copy awaiting confirmation from the store.
    Pending,
    /// The store has appended the message.
    Sent,
}

/// A message as stored by the relay and returned by reads.
///
/// Messages are immutable once the store has assigned their `id`. On the
/// wire the participant fields are named `from`/`to` and the body `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier assigned by the store.
    pub id: String,
    /// Sending participant.
    #[serde(rename = "from")]
    pub sender: String,
    /// Receiving participant.
    #[serde(rename = "to")]
    pub recipient: String,
    /// Sortable ISO-8601 timestamp with offset.
    pub timestamp: String,
    /// Text content.
    #[serde(rename = "message")]
    pub body: String,
    /// Lifecycle tag.
    pub status: MessageStatus,
}

impl Message {
    /// Returns the conversation this message belongs to.
    pub fn conversation(&self) -> ConversationKey {
        ConversationKey::new(self.sender.as_str(), self.recipient.as_str())
    }

    /// Returns true if this message is strictly newer than `since`.
    ///
    /// An absent cursor accepts every message.
    pub fn is_after(&self, since: Option<&str>) -> bool {
        crate::timestamp::is_after(&self.timestamp, since)
    }
}

/// An append request (`POST /messages` body).
///
/// Every field is optional at the serde level so that an absent field is a
/// validation failure ("missing fields") rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Sending participant.
    #[serde(rename = "from", default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Receiving participant.
    #[serde(rename = "to", default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Timestamp supplied by the sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Text content.
    #[serde(rename = "message", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl NewMessage {
    /// Creates a complete append request.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        timestamp: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: Some(sender.into()),
            recipient: Some(recipient.into()),
            timestamp: Some(timestamp.into()),
            body: Some(body.into()),
        }
    }

    /// Parses a request body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Checks that every field is present and non-empty.
    pub fn validate(&self) -> ValidationResult<()> {
        let checks = [
            ("from", &self.sender),
            ("to", &self.recipient),
            ("timestamp", &self.timestamp),
            ("message", &self.body),
        ];

        let fields: Vec<&'static str> = checks
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields })
        }
    }

    /// Returns the conversation the request targets, if both participants are present.
    pub fn conversation(&self) -> Option<ConversationKey> {
        match (self.sender.as_deref(), self.recipient.as_deref()) {
            (Some(a), Some(b)) => Some(ConversationKey::new(a, b)),
            _ => None,
        }
    }

    /// Validates the request and turns it into a stored message with the given id.
    pub fn into_message(self, id: impl Into<String>) -> ValidationResult<Message> {
        self.validate()?;
        match (self.sender, self.recipient, self.timestamp, self.body) {
            (Some(sender), Some(recipient), Some(timestamp), Some(body)) => Ok(Message {
                id: id.into(),
                sender,
                recipient,
                timestamp,
                body,
                status: MessageStatus::Sent,
            }),
            _ => Err(ValidationError::MissingFields { fields: Vec::new() }),
        }
    }
}
