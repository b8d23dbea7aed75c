//! Consumers of delivered batches.

use crate::error::SinkError;
use crossbeam_channel::{Receiver, Sender};
use duet_protocol::Message;
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives batches of newly observed messages.
///
/// Called from the polling thread. Implementations that drive a UI should
/// forward the batch to their own execution context (see [`ChannelSink`]).
/// Each batch is sorted by timestamp ascending.
pub trait MessageSink: Send + Sync {
    /// Handles one batch.
    fn on_new_messages(&self, batch: &[Message]) -> Result<(), SinkError>;
}

impl<S: MessageSink + ?Sized> MessageSink for Arc<S> {
    fn on_new_messages(&self, batch: &[Message]) -> Result<(), SinkError> {
        (**self).on_new_messages(batch)
    }
}

/// Forwards every batch over a channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<Vec<Message>>,
}

impl ChannelSink {
    /// Wraps an existing sender.
    pub fn new(sender: Sender<Vec<Message>>) -> Self {
        Self { sender }
    }

    /// Creates a sink and the receiver for its batches.
    pub fn unbounded() -> (Self, Receiver<Vec<Message>>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl MessageSink for ChannelSink {
    fn on_new_messages(&self, batch: &[Message]) -> Result<(), SinkError> {
        self.sender
            .send(batch.to_vec())
            .map_err(|_| SinkError::Disconnected)
    }
}

/// Calls a closure for every batch.
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: Fn(&[Message]) -> Result<(), SinkError> + Send + Sync,
{
    /// Creates a sink from a closure.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> MessageSink for CallbackSink<F>
where
    F: Fn(&[Message]) -> Result<(), SinkError> + Send + Sync,
{
    fn on_new_messages(&self, batch: &[Message]) -> Result<(), SinkError> {
        (self.callback)(batch)
    }
}

/// An in-memory sink for testing.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<Message>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every batch received so far.
    pub fn batches(&self) -> Vec<Vec<Message>> {
        self.batches.lock().clone()
    }

    /// Returns every message received so far, in delivery order.
    pub fn messages(&self) -> Vec<Message> {
        self.batches.lock().iter().flatten().cloned().collect()
    }

    /// Returns the number of batches received.
    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }
}

impl MessageSink for MemorySink {
    fn on_new_messages(&self, batch: &[Message]) -> Result<(), SinkError> {
        self.batches.lock().push(batch.to_vec());
        Ok(())
    }
}
