//! Timestamp helpers.
//!
//! Timestamps travel as ISO-8601 strings with an offset and are compared as
//! plain strings. That only matches chronological order when every producer
//! uses the same fixed-width, zone-normalized encoding, which [`now`] emits.

use crate::message::Message;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Returns the current time as `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
pub fn now() -> String {
    format(Utc::now())
}

/// Formats a UTC instant in the sortable wire encoding.
pub fn format(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Returns true if `value` parses as an ISO-8601 timestamp.
///
/// Both offset-qualified (RFC 3339) and naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// forms are accepted.
pub fn is_well_formed(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

/// Returns true if `timestamp` is strictly after `since` (string comparison).
pub fn is_after(timestamp: &str, since: Option<&str>) -> bool {
    match since {
        Some(since) => timestamp > since,
        None => true,
    }
}

/// Sorts messages by timestamp ascending. Ties keep their relative order.
pub fn sort_messages(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// Returns the greatest timestamp among `messages`.
pub fn latest(messages: &[Message]) -> Option<&str> {
    messages.iter().map(|m| m.timestamp.as_str()).max()
}
