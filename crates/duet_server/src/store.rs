//! In-memory conversation store.

use crate::error::ServerResult;
use duet_protocol::{timestamp, ConversationKey, Message, NewMessage, Scope};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Authoritative holder of all messages.
///
/// The store maintains:
/// - One message list per unordered participant pair
/// - Each list sorted by timestamp ascending (ties in insertion order)
///
/// All reads and writes go through a single lock around the whole map, so a
/// read that overlaps an append sees the conversation either entirely before
/// or entirely after it. Nothing is persisted.
pub struct ConversationStore {
    conversations: RwLock<HashMap<ConversationKey, Vec<Message>>>,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a message and returns the stored record.
    ///
    /// Every field must be present and non-empty. The timestamp is checked
    /// for well-formedness but a malformed one is stored as-is.
    pub fn append(&self, request: NewMessage) -> ServerResult<Message> {
        request.validate()?;

        if let Some(ts) = request.timestamp.as_deref() {
            if !timestamp::is_well_formed(ts) {
                debug!(timestamp = ts, "accepting malformed timestamp");
            }
        }

        let message = request.into_message(Uuid::new_v4().to_string())?;
        let key = message.conversation();

        {
            let mut conversations = self.conversations.write();
            let list = conversations.entry(key.clone()).or_default();
            // Inserting after every equal timestamp keeps the list identical
            // to a stable re-sort.
            let pos = list.partition_point(|m| m.timestamp <= message.timestamp);
            list.insert(pos, message.clone());
        }

        debug!(conversation = %key, id = %message.id, "appended message");
        Ok(message)
    }

    /// Returns messages in `scope` strictly newer than `since`, ascending by timestamp.
    pub fn query(&self, scope: &Scope, since: Option<&str>) -> Vec<Message> {
        let conversations = self.conversations.read();
        match scope {
            Scope::Pair(key) => conversations
                .get(key)
                .map(|list| {
                    list.iter()
                        .filter(|m| m.is_after(since))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            Scope::All => {
                let mut merged: Vec<Message> = conversations
                    .values()
                    .flatten()
                    .filter(|m| m.is_after(since))
                    .cloned()
                    .collect();
                timestamp::sort_messages(&mut merged);
                merged
            }
        }
    }

    /// Returns the full contents of one conversation.
    pub fn conversation(&self, key: &ConversationKey) -> Vec<Message> {
        self.query(&Scope::Pair(key.clone()), None)
    }

    /// Returns the number of messages in one conversation.
    pub fn conversation_len(&self, key: &ConversationKey) -> usize {
        self.conversations.read().get(key).map_or(0, Vec::len)
    }

    /// Returns the number of conversations.
    pub fn conversation_count(&self) -> usize {
        self.conversations.read().len()
    }

    /// Returns the total number of messages.
    pub fn message_count(&self) -> usize {
        self.conversations.read().values().map(Vec::len).sum()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
