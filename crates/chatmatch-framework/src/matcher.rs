//! The pattern matcher base shared by all plugins.
//!
//! A [`PatternMatcher`] bundles what every plugin needs before it can decide
//! whether an incoming message concerns it:
//! - an identifier, used in logs and error notices
//! - a compiled [`Regex`] tested against the message's canonical text
//! - the [`HelpEntry`] list shown to users
//! - an optional enablement override from [`MatcherConfig`]
//!
//! # Copy-on-write
//!
//! `PatternMatcher` keeps its data behind an `Arc`, so cloning is cheap.
//! Derivation methods such as [`with_enablement`](PatternMatcher::with_enablement)
//! return a new value and never touch the receiver, which lets one prototype
//! matcher be specialised many times (for example once per chat) and shared
//! across tasks without locking.
//!
//! # Example
//!
//! ```rust
//! use chatmatch_core::IncomingMessage;
//! use chatmatch_framework::{HelpEntry, MatcherConfig, PatternMatcher};
//! use regex::Regex;
//!
//! let pattern = Regex::new(r"(?i)^/echo(?:@\w+)?\s+(.*)$").unwrap();
//! let echo = PatternMatcher::new("echo", pattern, vec![HelpEntry::new("echo", "Repeats text")]);
//!
//! let msg = IncomingMessage::text("/echo hello");
//! assert!(echo.does_match(&msg));
//! assert_eq!(echo.command_match(&msg), Some(vec!["hello".to_string()]));
//!
//! let disabled = echo.with_enablement(&MatcherConfig::disabled());
//! assert!(!disabled.is_enabled());
//! assert!(echo.is_enabled());
//! ```

use std::sync::Arc;

use chatmatch_core::IncomingMessage;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::error;

// ============================================================================
// Help
// ============================================================================

/// A help descriptor rendered in command listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Command name without the leading slash.
    #[serde(default)]
    pub command: String,
    /// What the command does.
    #[serde(default)]
    pub description: String,
    /// Invocation syntax.
    #[serde(default)]
    pub usage: String,
    /// Example invocation.
    #[serde(default)]
    pub example: String,
}

impl HelpEntry {
    /// Creates a help entry with empty usage and example.
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Sets the usage string.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the example string.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }
}

// ============================================================================
// Enablement
// ============================================================================

/// Base-level settings every matcher understands.
///
/// Plugin configuration types embed it with `#[serde(flatten)]` and expose it
/// through [`ExposesEnablement`](crate::ExposesEnablement), so a config file
/// can switch a matcher off with `enabled: false`.
///
/// `enabled` is tri-state: unset means enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Enablement override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl MatcherConfig {
    /// An explicit `enabled: true`.
    pub const fn enabled() -> Self {
        Self {
            enabled: Some(true),
        }
    }

    /// An explicit `enabled: false`.
    pub const fn disabled() -> Self {
        Self {
            enabled: Some(false),
        }
    }

    /// Resolves the tri-state: only an explicit `false` disables.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

// ============================================================================
// PatternMatcher
// ============================================================================

/// Internal data for a [`PatternMatcher`].
///
/// Implements `Clone` to support `Arc::make_mut` for copy-on-write semantics.
#[derive(Clone)]
struct PatternMatcherInner {
    identifier: String,
    pattern: Regex,
    help: Vec<HelpEntry>,
    config: MatcherConfig,
}

/// Identifier, pattern, help and enablement of a matcher.
#[derive(Clone)]
pub struct PatternMatcher {
    inner: Arc<PatternMatcherInner>,
}

impl PatternMatcher {
    /// Creates a matcher with no enablement override.
    pub fn new(identifier: impl Into<String>, pattern: Regex, help: Vec<HelpEntry>) -> Self {
        Self {
            inner: Arc::new(PatternMatcherInner {
                identifier: identifier.into(),
                pattern,
                help,
                config: MatcherConfig::default(),
            }),
        }
    }

    /// Compiles `pattern` and creates a matcher from it.
    pub fn compile(
        identifier: impl Into<String>,
        pattern: &str,
        help: Vec<HelpEntry>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(identifier, Regex::new(pattern)?, help))
    }

    /// Internal helper to get mutable access to inner.
    /// Creates a new Arc if there are other references.
    fn inner_mut(&mut self) -> &mut PatternMatcherInner {
        Arc::make_mut(&mut self.inner)
    }

    /// Returns a copy of this matcher with `config` as its enablement override.
    ///
    /// The receiver is left untouched.
    pub fn with_enablement(&self, config: &MatcherConfig) -> Self {
        let mut next = self.clone();
        next.inner_mut().config = *config;
        next
    }

    /// Returns the identifier.
    pub fn identifier(&self) -> &str {
        &self.inner.identifier
    }

    /// Returns the compiled pattern.
    pub fn pattern(&self) -> &Regex {
        &self.inner.pattern
    }

    /// Returns the attached enablement settings.
    pub fn config(&self) -> &MatcherConfig {
        &self.inner.config
    }

    /// Returns false only when the override is an explicit `false`.
    pub fn is_enabled(&self) -> bool {
        self.inner.config.is_enabled()
    }

    /// Returns the help entries verbatim.
    pub fn help(&self) -> &[HelpEntry] {
        &self.inner.help
    }

    /// Tests the pattern against the message's canonical text.
    pub fn does_match(&self, message: &IncomingMessage) -> bool {
        self.inner.pattern.is_match(message.text_or_caption())
    }

    /// Returns the capture groups of the first match, excluding the whole match.
    ///
    /// `None` when the pattern does not match. Groups that did not take part
    /// in the match are returned as empty strings, and a pattern without
    /// groups yields `Some(vec![])`.
    pub fn command_match(&self, message: &IncomingMessage) -> Option<Vec<String>> {
        let captures = self.inner.pattern.captures(message.text_or_caption())?;

        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Returns every non-overlapping match, trimmed of surrounding whitespace.
    pub fn inline_matches(&self, message: &IncomingMessage) -> Vec<String> {
        self.inner
            .pattern
            .find_iter(message.text_or_caption())
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }

    /// Logs an error raised while handling `message`.
    pub fn handle_error(
        &self,
        message: &IncomingMessage,
        identifier: &str,
        err: &dyn std::error::Error,
    ) {
        error!(
            matcher = identifier,
            chat_id = message.chat_id(),
            message_id = message.id,
            error = %err,
            "Matcher failed"
        );
    }
}

impl std::fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("identifier", &self.inner.identifier)
            .field("pattern", &self.inner.pattern.as_str())
            .field("help", &self.inner.help.len())
            .field("enabled", &self.inner.config.enabled)
            .finish()
    }
}
