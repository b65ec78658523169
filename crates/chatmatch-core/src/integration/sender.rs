//! The [`MessageSender`] capability.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::foundation::error::SendResult;
use crate::foundation::message::OutgoingMessage;

/// Delivers outgoing messages to a chat.
///
/// The registry calls `send_message` from many tasks at once, one per
/// matcher, so implementations must be safe for concurrent use. No retry is
/// expected from callers; a failed send is logged and dropped.
#[async_trait]
pub trait MessageSender: Send + Sync + 'static {
    /// Sends `message` to the chat identified by `chat_id`.
    async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> SendResult<()>;
}

/// A shared, type-erased sender.
pub type BoxedSender = Arc<dyn MessageSender>;

/// A sender that writes every message to the log and never fails.
///
/// Useful for dry runs and for wiring a registry before a real client exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> SendResult<()> {
        info!(
            chat_id,
            reply_to = ?message.reply_to_message_id,
            parse_mode = ?message.parse_mode,
            text = %message.text,
            "Sending message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sender_never_fails() {
        let sender: BoxedSender = Arc::new(LogSender);
        let result = sender
            .send_message(1, &OutgoingMessage::text("hello"))
            .await;
        assert!(result.is_ok());
    }
}
