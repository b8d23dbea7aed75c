//! # Duet Protocol
//!
//! Message types and wire contract shared by the Duet relay server and the
//! polling sync engine.
//!
//! This crate provides:
//! - `Message` and `NewMessage` (the stored record and the append request)
//! - `ConversationKey` for unordered participant pairs
//! - `Scope` and `FetchParams` for incremental reads
//! - Timestamp helpers (sortable RFC 3339 encoding)
//!
//! This is a pure protocol crate with no I/O operations.
//!
//! ## Ordering
//!
//! Timestamps are compared as strings. Producers must keep them in a
//! fixed-width, zone-normalized encoding; [`timestamp::now`] does.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod conversation;
mod error;
mod message;
pub mod timestamp;
mod wire;

pub use conversation::{ConversationKey, FetchParams, Scope};
pub use error::{ValidationError, ValidationResult};
pub use message::{Message, MessageStatus, NewMessage};
pub use wire::{ErrorBody, RawResponse, JSON_CONTENT_TYPE, MESSAGES_PATH};
