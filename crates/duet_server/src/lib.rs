//! # Duet Relay Server
//!
//! Conversation store and HTTP relay server for Duet.
//!
//! This crate provides:
//! - `ConversationStore`: in-memory messages grouped by participant pair
//! - `RequestHandler`: the wire contract, independent of any HTTP library
//! - `RelayServer`: an axum server exposing `POST /messages` and `GET /messages`
//!
//! # Architecture
//!
//! The store is an owned component behind a single lock. The server holds
//! it through an `Arc`, so tests and embedders can share one store between
//! several front ends:
//!
//! ```rust
//! use duet_server::{ConversationStore, RelayServer, ServerConfig};
//! use std::sync::Arc;
//!
//! let store = Arc::new(ConversationStore::new());
//! let server = RelayServer::with_store(ServerConfig::default(), Arc::clone(&store));
//!
//! let reply = server.dispatch("GET", "/messages", b"");
//! assert_eq!(reply.status, 200);
//! ```
//!
//! # Ordering
//!
//! Each conversation is kept sorted by timestamp after every append.
//! Aggregate reads merge all conversations and sort again.

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod handler;
mod server;
mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use server::RelayServer;
pub use store::ConversationStore;
