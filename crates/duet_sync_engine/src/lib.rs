//! # Duet Sync Engine
//!
//! Client-side polling engine for the Duet relay.
//!
//! This crate provides:
//! - Poll state machine (idle → polling → delivering / backing off → stopped)
//! - Cursor management (`since` watermark)
//! - Exponential backoff on transport failures
//! - HTTP transport abstraction with a blocking `ureq` client
//! - Consumer sinks (channel, callback, in-memory)
//! - One-shot message sending
//!
//! ## Architecture
//!
//! A [`Poller`] runs on its own thread and repeatedly asks the relay for
//! messages newer than its cursor. Every non-empty batch is sorted by
//! timestamp, handed to a [`MessageSink`], and the cursor advances to the
//! newest timestamp in the batch.
//!
//! ```rust,no_run
//! use duet_protocol::Scope;
//! use duet_sync_engine::{ChannelSink, PollConfig, Poller};
//!
//! let config = PollConfig::new("http://127.0.0.1:20202").with_scope(Scope::pair("alice", "bob"));
//! let (sink, batches) = ChannelSink::unbounded();
//! let poller = Poller::connect(config, sink);
//! poller.start()?;
//!
//! for batch in batches.iter() {
//!     for message in batch {
//!         println!("{}: {}", message.sender, message.body);
//!     }
//! }
//! # Ok::<(), duet_sync_engine::SyncError>(())
//! ```
//!
//! ## Key Invariants
//!
//! - The cursor never moves backwards
//! - A failing consumer never stops the loop
//! - Only an explicit stop ends the loop

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backoff;
mod config;
mod error;
mod http;
mod poller;
mod send;
mod signal;
mod sink;
mod transport;

pub use backoff::Backoff;
pub use config::{BackoffConfig, PollConfig};
pub use error::{SinkError, SyncError, SyncResult};
pub use http::{HttpClient, HttpTransport, LoopbackClient, LoopbackServer, UreqClient};
pub use poller::{PollOutcome, PollState, PollStats, Poller};
pub use send::send_message;
pub use sink::{CallbackSink, ChannelSink, MemorySink, MessageSink};
pub use transport::{MessageTransport, MockTransport};
