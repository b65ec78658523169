//! Matcher registry and concurrent dispatch.
//!
//! The [`Registry`] owns the registered matchers and the
//! [`MessageSender`](chatmatch_core::MessageSender) used to deliver their
//! replies.
//!
//! # Dispatch
//!
//! [`Registry::process`] offers one incoming message to every registered
//! matcher at once, spawning one task per matcher. Each task:
//!
//! 1. Stops if the matcher is disabled
//! 2. Stops if the matcher's pattern does not match
//! 3. Runs [`Matcher::process`] under the registry's timeout
//! 4. On error, logs it through [`Matcher::handle_error`] and appends a
//!    Markdown notice naming the matcher after any replies already produced
//! 5. Sends the replies in order to the originating chat, logging and
//!    skipping past individual send failures
//!
//! `process` returns once every task has finished. Tasks run in no particular
//! order relative to each other; a failing, slow or panicking matcher never
//! affects its siblings.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chatmatch_core::LogSender;
//! use chatmatch_framework::Registry;
//!
//! let mut registry = Registry::new(Arc::new(LogSender));
//! registry.register(PingMatcher::new());
//! registry.register(QuoteMatcher::load()?);
//!
//! registry.process(&incoming).await;
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chatmatch_core::{BoxedSender, IncomingMessage, OutgoingMessage, escape_markdown};
use tokio::task::JoinSet;
use tracing::{Instrument, Level, debug, error, span, trace, warn};

use crate::error::MatcherError;
use crate::matcher::HelpEntry;
use crate::plugin::{BoxedMatcher, Matcher};

/// Deadline applied to each matcher task unless configured otherwise.
pub const DEFAULT_MATCHER_TIMEOUT: Duration = Duration::from_secs(30);

/// Renders the user-facing notice for a failed matcher.
pub fn error_notice(identifier: &str, err: &MatcherError) -> String {
    format!(
        "⚠️ *Error in matcher \"{}\"*\n\n{}",
        identifier,
        escape_markdown(&err.to_string())
    )
}

/// Counters describing one call to [`Registry::process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Matchers skipped because they are disabled.
    pub disabled: usize,
    /// Matchers whose pattern did not match.
    pub unmatched: usize,
    /// Matchers whose `process` ran.
    pub executed: usize,
    /// Executed matchers that returned an error or timed out.
    pub failed: usize,
    /// Matcher tasks that panicked.
    pub panicked: usize,
    /// Messages delivered successfully.
    pub sent: usize,
    /// Messages the sender rejected.
    pub send_failures: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Disabled => self.disabled += 1,
            TaskOutcome::Unmatched => self.unmatched += 1,
            TaskOutcome::Executed {
                failed,
                sent,
                send_failures,
            } => {
                self.executed += 1;
                self.failed += usize::from(failed);
                self.sent += sent;
                self.send_failures += send_failures;
            }
        }
    }
}

/// What happened inside one matcher task.
#[derive(Debug, Clone, Copy)]
enum TaskOutcome {
    Disabled,
    Unmatched,
    Executed {
        failed: bool,
        sent: usize,
        send_failures: usize,
    },
}

/// The set of registered matchers and the sender they reply through.
///
/// Registration takes `&mut self` and dispatch takes `&self`, so a registry
/// cannot be extended while a dispatch borrows it. Share a fully built
/// registry behind an `Arc` to dispatch from several tasks.
pub struct Registry {
    /// Registered matchers, in registration order.
    matchers: Vec<BoxedMatcher>,
    /// Delivery capability shared by all matcher tasks.
    sender: BoxedSender,
    /// Per-matcher deadline; `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl Registry {
    /// Creates an empty registry replying through `sender`.
    pub fn new(sender: BoxedSender) -> Self {
        Self {
            matchers: Vec::new(),
            sender,
            timeout: Some(DEFAULT_MATCHER_TIMEOUT),
        }
    }

    /// Sets the deadline for each matcher task.
    ///
    /// A matcher that exceeds it is reported like a failed one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the per-matcher deadline.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Registers a matcher.
    pub fn register<M: Matcher>(&mut self, matcher: M) {
        self.register_boxed(Arc::new(matcher));
    }

    /// Registers an already shared matcher.
    ///
    /// Identifiers are not required to be unique; a duplicate is accepted and
    /// logged as a warning.
    pub fn register_boxed(&mut self, matcher: BoxedMatcher) {
        let identifier = matcher.identifier();

        if self.matchers.iter().any(|m| m.identifier() == identifier) {
            warn!(matcher = identifier, "Registering duplicate matcher identifier");
        }
        debug!(matcher = identifier, "Registering matcher");

        self.matchers.push(matcher);
    }

    /// Registers a matcher (builder pattern).
    pub fn with<M: Matcher>(mut self, matcher: M) -> Self {
        self.register(matcher);
        self
    }

    /// Returns the registered matchers in registration order.
    pub fn matchers(&self) -> &[BoxedMatcher] {
        &self.matchers
    }

    /// Returns the number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if no matcher is registered.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns the help entries of all enabled matchers, in registration order.
    pub fn help(&self) -> Vec<HelpEntry> {
        self.matchers
            .iter()
            .filter(|m| m.is_enabled())
            .flat_map(|m| m.help().iter().cloned())
            .collect()
    }

    /// Offers `message` to every registered matcher concurrently.
    ///
    /// Returns after all matcher tasks have completed.
    pub async fn process(&self, message: &IncomingMessage) -> DispatchSummary {
        let span = span!(
            Level::DEBUG,
            "process",
            chat_id = message.chat_id(),
            message_id = message.id
        );

        async {
            debug!(
                sender = message.sender_name(),
                text = message.text_or_caption(),
                matchers = self.matchers.len(),
                "Processing message"
            );

            let message = Arc::new(message.clone());
            let mut tasks = JoinSet::new();
            let mut identifiers = HashMap::with_capacity(self.matchers.len());

            for matcher in &self.matchers {
                let task_span = span!(Level::DEBUG, "matcher", matcher = matcher.identifier());
                let handle = tasks.spawn(
                    run_matcher(
                        Arc::clone(matcher),
                        Arc::clone(&message),
                        Arc::clone(&self.sender),
                        self.timeout,
                    )
                    .instrument(task_span),
                );
                identifiers.insert(handle.id(), matcher.identifier());
            }

            let mut summary = DispatchSummary::default();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(outcome) => summary.record(outcome),
                    Err(err) => {
                        summary.panicked += 1;
                        let matcher = identifiers.get(&err.id()).copied().unwrap_or_default();
                        error!(matcher, error = %err, "Matcher task aborted");
                    }
                }
            }

            debug!(?summary, "Message processed");
            summary
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let identifiers: Vec<&str> = self.matchers.iter().map(|m| m.identifier()).collect();
        f.debug_struct("Registry")
            .field("matchers", &identifiers)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Runs one matcher against one message and delivers its replies.
async fn run_matcher(
    matcher: BoxedMatcher,
    message: Arc<IncomingMessage>,
    sender: BoxedSender,
    timeout: Option<Duration>,
) -> TaskOutcome {
    let identifier = matcher.identifier();
    let chat_id = message.chat_id();

    if !matcher.is_enabled() {
        debug!(matcher = identifier, "Matcher will not be executed: disabled");
        return TaskOutcome::Disabled;
    }

    if !matcher.does_match(&message) {
        trace!(matcher = identifier, "Matcher does not match");
        return TaskOutcome::Unmatched;
    }

    debug!(matcher = identifier, chat_id, "Matcher will be executed");

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, matcher.process(&message))
            .await
            .unwrap_or(Err(MatcherError::Timeout(limit))),
        None => matcher.process(&message).await,
    };

    let (messages, failed) = match result {
        Ok(messages) => (messages, false),
        Err(err) => {
            let (mut messages, cause) = err.into_parts();
            matcher.handle_error(&message, identifier, &cause);
            messages.push(OutgoingMessage::markdown_reply(
                error_notice(identifier, &cause),
                message.id,
            ));
            (messages, true)
        }
    };

    let mut sent = 0;
    let mut send_failures = 0;
    for outgoing in &messages {
        match sender.send_message(chat_id, outgoing).await {
            Ok(()) => sent += 1,
            Err(err) => {
                send_failures += 1;
                error!(matcher = identifier, chat_id, error = %err, "Error while sending message");
            }
        }
    }

    TaskOutcome::Executed {
        failed,
        sent,
        send_failures,
    }
}
