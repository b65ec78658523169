//! `/ping` answered with `pong`.

use chatmatch::prelude::*;

/// Identifier of the ping matcher.
pub const IDENTIFIER: &str = "ping";

/// `/ping`, optionally addressed to a bot (`/ping@bot`) and followed by arguments.
const PATTERN: &str = r"(?i)^/(ping)(@\w+)?($| )";

const REPLY: &str = "pong";

/// Replies `pong` to `/ping`.
#[derive(Debug, Clone)]
pub struct PingMatcher {
    base: PatternMatcher,
}

impl PingMatcher {
    pub fn new() -> Result<Self, regex::Error> {
        let help = vec![
            HelpEntry::new("ping", r#"Responds with "pong""#)
                .usage("/ping")
                .example("/ping"),
        ];

        Ok(Self {
            base: PatternMatcher::compile(IDENTIFIER, PATTERN, help)?,
        })
    }
}

#[async_trait]
impl Matcher for PingMatcher {
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
