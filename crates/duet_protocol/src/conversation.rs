//! Conversation identity and read scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a conversation: an unordered pair of participants.
///
/// The pair is stored sorted, so `ConversationKey::new(a, b)` and
/// `ConversationKey::new(b, a)` are equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationKey {
    low: String,
    high: String,
}

impl ConversationKey {
    /// Creates the key for the pair `{a, b}`.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns both participants, lexicographically ordered.
    pub fn participants(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// Returns true if `participant` is one side of the pair.
    pub fn contains(&self, participant: &str) -> bool {
        self.low == participant || self.high == participant
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}", self.low, self.high)
    }
}

/// Selection predicate for a read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every conversation, merged and re-sorted by timestamp.
    #[default]
    All,
    /// A single conversation.
    Pair(ConversationKey),
}

impl Scope {
    /// Scope for the conversation between `a` and `b`.
    pub fn pair(a: impl Into<String>, b: impl Into<String>) -> Self {
        Scope::Pair(ConversationKey::new(a, b))
    }
}

/// Query parameters of `GET /messages`.
///
/// Pair scope applies only when both `from_user` and `to` are present and
/// non-empty; otherwise the read covers all conversations. An empty `since`
/// is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    /// Cursor: only strictly newer messages are returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// One side of the pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    /// The other side of the pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl FetchParams {
    /// Builds parameters for a scope and cursor.
    pub fn new(scope: &Scope, since: Option<&str>) -> Self {
        let (from_user, to) = match scope {
            Scope::All => (None, None),
            Scope::Pair(key) => {
                let (a, b) = key.participants();
                (Some(a.to_string()), Some(b.to_string()))
            }
        };
        Self {
            since: since.map(str::to_string),
            from_user,
            to,
        }
    }

    /// Resolves the read scope.
    pub fn scope(&self) -> Scope {
        match (non_empty(&self.from_user), non_empty(&self.to)) {
            (Some(a), Some(b)) => Scope::pair(a, b),
            _ => Scope::All,
        }
    }

    /// Returns the effective cursor.
    pub fn since(&self) -> Option<&str> {
        non_empty(&self.since)
    }

    /// Returns the parameters that are set, as `(name, value)` pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("since", &self.since),
            ("from_user", &self.from_user),
            ("to", &self.to),
        ]
        .into_iter()
        .filter_map(|(name, value)| non_empty(value).map(|v| (name, v)))
        .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
