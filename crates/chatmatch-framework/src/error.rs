//! Error types for matcher execution.

use std::time::Duration;

use chatmatch_core::OutgoingMessage;
use thiserror::Error;

/// A boxed error usable as the cause of a [`MatcherError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`Matcher::process`](crate::Matcher::process).
///
/// The registry never propagates these. It logs them and answers the
/// incoming message with a Markdown notice that names the matcher.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// `process` was called with a message the matcher's pattern rejects.
    ///
    /// The registry checks `does_match` first, so this only surfaces when a
    /// matcher is invoked directly.
    #[error("message does not match")]
    NoMatch,

    /// The matcher did not finish within the registry's deadline.
    #[error("matcher timed out after {0:?}")]
    Timeout(Duration),

    /// The matcher failed while handling a matched message.
    #[error("{message}")]
    Failed {
        /// User-facing description of the failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// The matcher produced some messages before failing.
    ///
    /// The registry sends `messages` first and the error notice last.
    #[error("{source}")]
    WithOutput {
        /// Messages produced before the failure.
        messages: Vec<OutgoingMessage>,
        /// The failure itself.
        #[source]
        source: Box<MatcherError>,
    },
}

impl MatcherError {
    /// Creates a failure with the given description.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps any error, keeping it as the source.
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Attaches messages produced before this error occurred.
    pub fn with_output(self, messages: Vec<OutgoingMessage>) -> Self {
        if messages.is_empty() {
            return self;
        }
        match self {
            Self::WithOutput {
                messages: mut earlier,
                source,
            } => {
                earlier.extend(messages);
                Self::WithOutput {
                    messages: earlier,
                    source,
                }
            }
            other => Self::WithOutput {
                messages,
                source: Box::new(other),
            },
        }
    }

    /// Splits the error into the messages produced so far and the cause.
    pub fn into_parts(self) -> (Vec<OutgoingMessage>, MatcherError) {
        match self {
            Self::WithOutput { messages, source } => (messages, *source),
            other => (Vec::new(), other),
        }
    }

    /// Returns true for [`MatcherError::NoMatch`].
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

/// Result type returned by matchers.
pub type MatcherResult = Result<Vec<OutgoingMessage>, MatcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_display() {
        assert_eq!(MatcherError::NoMatch.to_string(), "message does not match");
        assert!(MatcherError::NoMatch.is_no_match());
    }

    #[test]
    fn test_other_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "quote list missing");
        let err = MatcherError::other(io);

        assert_eq!(err.to_string(), "quote list missing");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_with_output_round_trip() {
        let err = MatcherError::failed("upstream unavailable")
            .with_output(vec![OutgoingMessage::text("partial")]);
        assert_eq!(err.to_string(), "upstream unavailable");

        let (messages, cause) = err.into_parts();
        assert_eq!(messages.len(), 1);
        assert_eq!(cause.to_string(), "upstream unavailable");
    }

    #[test]
    fn test_with_output_appends_and_ignores_empty() {
        let err = MatcherError::failed("x")
            .with_output(vec![OutgoingMessage::text("a")])
            .with_output(Vec::new())
            .with_output(vec![OutgoingMessage::text("b")]);

        let (messages, cause) = err.into_parts();
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(matches!(cause, MatcherError::Failed { .. }));
    }

    #[test]
    fn test_timeout_display() {
        let err = MatcherError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "matcher timed out after 5s");
    }
}
