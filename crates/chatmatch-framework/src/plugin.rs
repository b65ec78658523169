//! The [`Matcher`] trait: the contract between plugins and the registry.
//!
//! A plugin owns a [`PatternMatcher`] (directly, or through a
//! [`ConfiguredMatcher`](crate::ConfiguredMatcher)) and implements two
//! methods: [`pattern_matcher`](Matcher::pattern_matcher) to expose it and
//! [`process`](Matcher::process) to answer a matched message. Everything
//! else has a default that delegates to the base matcher and may be
//! overridden.
//!
//! ```rust,ignore
//! use chatmatch_framework::prelude::*;
//!
//! struct Echo {
//!     base: PatternMatcher,
//! }
//!
//! #[async_trait]
//! impl Matcher for Echo {
//!     fn pattern_matcher(&self) -> &PatternMatcher {
//!         &self.base
//!     }
//!
//!     async fn process(&self, message: &IncomingMessage) -> MatcherResult {
//!         let args = self.command_match(message).ok_or(MatcherError::NoMatch)?;
//!         Ok(vec![OutgoingMessage::reply(args.join(" "), message.id)])
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chatmatch_core::IncomingMessage;

use crate::error::{MatcherError, MatcherResult};
use crate::matcher::{HelpEntry, PatternMatcher};

/// A plugin that can be registered in a [`Registry`](crate::Registry).
///
/// Implementations are shared between dispatch tasks and must not rely on
/// interior mutability for their matching decisions.
#[async_trait]
pub trait Matcher: Send + Sync + 'static {
    /// Returns the base matcher used by the default methods.
    fn pattern_matcher(&self) -> &PatternMatcher;

    /// Produces the replies for a matched message.
    ///
    /// Should return [`MatcherError::NoMatch`] when called with a message
    /// that `does_match` rejects.
    async fn process(&self, message: &IncomingMessage) -> MatcherResult;

    /// Returns the identifier used in logs and error notices.
    fn identifier(&self) -> &str {
        self.pattern_matcher().identifier()
    }

    /// Returns whether the registry should consider this matcher at all.
    fn is_enabled(&self) -> bool {
        self.pattern_matcher().is_enabled()
    }

    /// Returns the help entries.
    fn help(&self) -> &[HelpEntry] {
        self.pattern_matcher().help()
    }

    /// Returns whether the matcher applies to `message`.
    fn does_match(&self, message: &IncomingMessage) -> bool {
        self.pattern_matcher().does_match(message)
    }

    /// Returns the capture groups of the first match.
    fn command_match(&self, message: &IncomingMessage) -> Option<Vec<String>> {
        self.pattern_matcher().command_match(message)
    }

    /// Returns all trimmed non-overlapping matches.
    fn inline_matches(&self, message: &IncomingMessage) -> Vec<String> {
        self.pattern_matcher().inline_matches(message)
    }

    /// Reports an error raised while processing `message`.
    fn handle_error(&self, message: &IncomingMessage, identifier: &str, err: &MatcherError) {
        self.pattern_matcher().handle_error(message, identifier, err);
    }
}

/// A shared, type-erased matcher.
pub type BoxedMatcher = Arc<dyn Matcher>;
