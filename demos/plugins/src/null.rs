//! A matcher that never matches.
//!
//! Shows the minimal shape of a plugin without ever producing output.

use chatmatch::prelude::*;

/// Identifier of the null matcher.
pub const IDENTIFIER: &str = "null";

/// A word boundary that is also a non-boundary: matches nothing.
const PATTERN: &str = r"\b\B";

const REPLY: &str = "You should never get this response.";

/// Never matches; `process` always fails with [`MatcherError::NoMatch`].
#[derive(Debug, Clone)]
pub struct NullMatcher {
    base: PatternMatcher,
}

impl NullMatcher {
    pub fn new() -> Result<Self, regex::Error> {
        let help = vec![HelpEntry::new("", "Example; never matches")];

        Ok(Self {
            base: PatternMatcher::compile(IDENTIFIER, PATTERN, help)?,
        })
    }
}

#[async_trait]
impl Matcher for NullMatcher {
    fn pattern_matcher(&self) -> &PatternMatcher {
        &self.base
    }

    async fn process(&self, message: &IncomingMessage) -> MatcherResult {
        if !self.does_match(message) {
            return Err(MatcherError::NoMatch);
        }

        Ok(vec![OutgoingMessage::reply(REPLY, message.id)])
    }
}
