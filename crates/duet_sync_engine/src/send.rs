//! One-shot message sending.

use crate::error::SyncResult;
use crate::transport::MessageTransport;
use duet_protocol::{timestamp, Message, NewMessage};
use tracing::{debug, warn};

/// Sends one message stamped with the current time.
///
/// The call is made exactly once; failures are returned to the caller and
/// never retried. A message that was not acknowledged will not show up in
/// later polls.
pub fn send_message<T>(transport: &T, from: &str, to: &str, body: &str) -> SyncResult<Message>
where
    T: MessageTransport + ?Sized,
{
    let request = NewMessage::new(from, to, timestamp::now(), body);

    match transport.send(&request) {
        Ok(message) => {
            debug!(id = %message.id, to, "message sent");
            Ok(message)
        }
        Err(e) => {
            warn!(error = %e, to, "failed to send message");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::transport::MockTransport;
    use duet_protocol::MessageStatus;

    #[test]
    fn send_stamps_timestamp() {
        let transport = MockTransport::new();
        let message = send_message(&transport, "alice", "bob", "hello").unwrap();

        assert_eq!(message.status, MessageStatus::Sent);
        assert!(timestamp::is_well_formed(&message.timestamp));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn send_surfaces_rejection() {
        let transport = MockTransport::new();
        let err = send_message(&transport, "alice", "bob", "").unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 400, .. }));
    }
}
