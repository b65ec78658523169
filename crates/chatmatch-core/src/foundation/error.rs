//! Error types for message delivery.

use thiserror::Error;

/// Errors that a [`MessageSender`](crate::MessageSender) may report.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The chat refused the message (blocked bot, missing rights, ...).
    #[error("chat {chat_id} rejected the message: {reason}")]
    Rejected {
        /// The destination chat.
        chat_id: i64,
        /// Reason given by the remote side.
        reason: String,
    },

    /// The underlying transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl SendError {
    /// Creates a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a rejection error for the given chat.
    pub fn rejected(chat_id: i64, reason: impl Into<String>) -> Self {
        Self::Rejected {
            chat_id,
            reason: reason.into(),
        }
    }
}

/// Result type for send operations.
pub type SendResult<T> = Result<T, SendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_names_chat() {
        let err = SendError::rejected(42, "bot was blocked by the user");
        assert_eq!(
            err.to_string(),
            "chat 42 rejected the message: bot was blocked by the user"
        );
    }

    #[test]
    fn test_transport_display() {
        let err = SendError::transport("connection reset");
        assert!(err.to_string().contains("connection reset"));
    }
}
