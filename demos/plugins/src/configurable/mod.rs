//! A matcher whose command, reply and help come from configuration.
//!
//! Reads `configurable.yml` from the configuration root. Per-chat overrides
//! in `{root}/{chat_id}/configurable.yml` become separate matchers scoped to
//! their chat, and the fallback then answers every other chat.

mod config;

pub use config::ConfigurableConfig;

use chatmatch::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Identifier of the configurable matcher.
pub const IDENTIFIER: &str = "configurable";

/// Errors raised while building configurable matchers.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The chats a matcher answers in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChatScope {
    #[default]
    All,
    Only(i64),
    Except(Vec<i64>),
}

impl ChatScope {
    pub fn includes(&self, chat_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => *id == chat_id,
            Self::Except(ids) => !ids.contains(&chat_id),
        }
    }
}

/// Replies with the configured text to the configured command.
#[derive(Debug, Clone)]
pub struct ConfigurableMatcher {
    inner: ConfiguredMatcher<ConfigurableConfig>,
    scope: ChatScope,
}

impl ConfigurableMatcher {
    /// Builds a matcher answering in every chat.
    pub fn from_config(config: ConfigurableConfig) -> Result<Self, regex::Error> {
        let pattern = config.pattern()?;
        let help = config.help();

        Ok(Self {
            inner: ConfiguredMatcher::new(IDENTIFIER, pattern, help, config),
            scope: ChatScope::All,
        })
    }

    /// Builds a matcher from the fallback configuration only.
    pub fn load(loader: &ConfigLoader) -> Result<Self, LoadError> {
        let configs = loader.load::<ConfigurableConfig>(IDENTIFIER)?;
        Ok(Self::from_config(configs.fallback().clone())?)
    }

    /// Builds one matcher per configured chat scope.
    ///
    /// The first matcher is the fallback, restricted to chats without an
    /// override; the others each answer in exactly one chat.
    pub fn load_all(loader: &ConfigLoader) -> Result<Vec<Self>, LoadError> {
        let configs = loader.load::<ConfigurableConfig>(IDENTIFIER)?;

        let fallback = Self::from_config(configs.fallback().clone())?;
        let mut matchers = Vec::with_capacity(configs.len());

        for (chat_id, config) in configs.iter().skip(1) {
            debug!(chat_id, command = config.command(), "Building per-chat variant");
            matchers.push(
                fallback
                    .variant(config.clone())?
                    .with_scope(ChatScope::Only(chat_id)),
            );
        }

        let overridden: Vec<i64> = configs.chat_ids().into_iter().skip(1).collect();
        let fallback = if overridden.is_empty() {
            fallback
        } else {
            fallback.with_scope(ChatScope::Except(overridden))
        };
        matchers.insert(0, fallback);

        Ok(matchers)
    }

    /// Returns a matcher for `config` in the same scope.
    ///
    /// The compiled pattern is reused when command and help are unchanged.
    pub fn variant(&self, config: ConfigurableConfig) -> Result<Self, regex::Error> {
        let current = self.config();
        if config.command() != current.command() || config.description() != current.description() {
            return Ok(Self::from_config(config)?.with_scope(self.scope.clone()));
        }

        Ok(Self {
            inner: self.inner.with_typed_config(config),
            scope: self.scope.clone(),
        })
    }

    pub fn with_scope(mut self, scope: ChatScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> &ChatScope {
        &self.scope
    }

    pub fn config(&self) -> &ConfigurableConfig {
        self.inner.config()
    }
}

#[async_trait]
impl Matcher for ConfigurableMatcher {
    fn pattern_matcher(&self) -> &PatternMatcher {
        self.inner.pattern_matcher()
    }

    fn does_match(&self, message: &IncomingMessage) -> bool {
        self.scope.includes(message.chat_id()) && self.inner.does_match(message)
    }

    async fn process(&self, message: &IncomingMessage) -> MatcherResult {
        if !self.does_match(message) {
            return Err(MatcherError::NoMatch);
        }

        Ok(vec![OutgoingMessage::reply(self.config().reply(), message.id)])
    }
}
