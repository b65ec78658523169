//! A recording sender for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::foundation::error::{SendError, SendResult};
use crate::foundation::message::OutgoingMessage;
use crate::integration::sender::MessageSender;

type FailPredicate = Box<dyn Fn(&OutgoingMessage) -> bool + Send + Sync>;

/// A message accepted by a [`MockSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Destination chat passed to `send_message`.
    pub chat_id: i64,
    /// The message itself.
    pub message: OutgoingMessage,
}

/// A [`MessageSender`] that records messages instead of delivering them.
///
/// Messages matching the predicate given to [`fail_when`](Self::fail_when)
/// are rejected with [`SendError::Transport`] and not recorded, but still
/// count as an attempt.
///
/// ```
/// use chatmatch_core::{MessageSender, MockSender, OutgoingMessage};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let sender = MockSender::new().fail_when(|m| m.text == "boom");
/// assert!(sender.send_message(1, &OutgoingMessage::text("ok")).await.is_ok());
/// assert!(sender.send_message(1, &OutgoingMessage::text("boom")).await.is_err());
/// assert_eq!(sender.sent().len(), 1);
/// assert_eq!(sender.attempts(), 2);
/// # }
/// ```
#[derive(Default)]
pub struct MockSender {
    sent: Mutex<Vec<SentMessage>>,
    attempts: AtomicUsize,
    fail_when: Option<FailPredicate>,
}

impl MockSender {
    /// Creates a sender that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every message for which `predicate` returns `true`.
    pub fn fail_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&OutgoingMessage) -> bool + Send + Sync + 'static,
    {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    /// Creates a sender that rejects every message.
    pub fn failing() -> Self {
        Self::new().fail_when(|_| true)
    }

    /// Returns a snapshot of the accepted messages, in acceptance order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Returns the texts of the accepted messages.
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .map(|s| s.message.text.clone())
            .collect()
    }

    /// Returns how many times `send_message` was called.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.sent.lock().clear();
        self.attempts.store(0, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for MockSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSender")
            .field("sent", &self.sent.lock().len())
            .field("attempts", &self.attempts())
            .finish()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> SendResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail_when.as_ref().is_some_and(|fail| fail(message)) {
            return Err(SendError::transport("mock sender rejected the message"));
        }

        self.sent.lock().push(SentMessage {
            chat_id,
            message: message.clone(),
        });
        Ok(())
    }
}
