//! Transport layer abstraction for relay calls.

use crate::error::{SyncError, SyncResult};
use duet_protocol::{FetchParams, Message, NewMessage};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A message transport handles communication with the relay.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-process loopback, mock for testing, etc.).
pub trait MessageTransport: Send + Sync {
    /// Reads messages matching `params`.
    fn fetch(&self, params: &FetchParams) -> SyncResult<Vec<Message>>;

    /// Appends one message and returns the stored record.
    fn send(&self, request: &NewMessage) -> SyncResult<Message>;
}

impl<T: MessageTransport + ?Sized> MessageTransport for Arc<T> {
    fn fetch(&self, params: &FetchParams) -> SyncResult<Vec<Message>> {
        (**self).fetch(params)
    }

    fn send(&self, request: &NewMessage) -> SyncResult<Message> {
        (**self).send(request)
    }
}

/// A mock transport for testing.
///
/// Fetches pop scripted results in order and return an empty batch once the
/// script runs out. Sends echo the request back as a stored message.
#[derive(Debug, Default)]
pub struct MockTransport {
    fetch_results: Mutex<VecDeque<SyncResult<Vec<Message>>>>,
    fetch_calls: Mutex<Vec<FetchParams>>,
    sent: Mutex<Vec<NewMessage>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the result of a future fetch.
    pub fn push_fetch(&self, result: SyncResult<Vec<Message>>) {
        self.fetch_results.lock().push_back(result);
    }

    /// Queues a successful fetch.
    pub fn push_messages(&self, messages: Vec<Message>) {
        self.push_fetch(Ok(messages));
    }

    /// Returns the parameters of every fetch so far.
    pub fn fetch_calls(&self) -> Vec<FetchParams> {
        self.fetch_calls.lock().clone()
    }

    /// Returns every request passed to `send`.
    pub fn sent(&self) -> Vec<NewMessage> {
        self.sent.lock().clone()
    }
}

impl MessageTransport for MockTransport {
    fn fetch(&self, params: &FetchParams) -> SyncResult<Vec<Message>> {
        self.fetch_calls.lock().push(params.clone());
        self.fetch_results.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn send(&self, request: &NewMessage) -> SyncResult<Message> {
        let mut sent = self.sent.lock();
        sent.push(request.clone());
        request
            .clone()
            .into_message(format!("mock-{}", sent.len()))
            .map_err(|e| SyncError::Status {
                status: 400,
                body: e.to_string(),
            })
    }
}
