//! # Chatmatch
//!
//! Pattern-matching plugin dispatch for chat bots.
//!
//! ## Overview
//!
//! A bot registers a set of matchers. Each matcher owns a regular
//! expression; every incoming message is offered to all matchers at once, and
//! every matcher whose pattern matches produces zero or more replies. Failures
//! inside one matcher never affect the others: they become a short error
//! notice in the chat.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌──────────┐────▶ matcher "ping"  (own task) ──┐
//! │ incoming │────▶│ Registry │────▶ matcher "quote" (own task) ──┼──▶ MessageSender
//! │ message  │     │          │────▶ matcher ...     (own task) ──┘
//! └──────────┘     └──────────┘
//! ```
//!
//! - **core**: message types and the `MessageSender` capability
//! - **framework**: `PatternMatcher`, `ConfiguredMatcher`, the `Matcher` trait
//!   and the `Registry`
//! - **runtime**: per-chat configuration loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chatmatch::prelude::*;
//!
//! struct Ping {
//!     base: PatternMatcher,
//! }
//!
//! #[async_trait]
//! impl Matcher for Ping {
//!     fn pattern_matcher(&self) -> &PatternMatcher {
//!         &self.base
//!     }
//!
//!     async fn process(&self, message: &IncomingMessage) -> MatcherResult {
//!         if !self.does_match(message) {
//!             return Err(MatcherError::NoMatch);
//!         }
//!         Ok(vec![OutgoingMessage::reply("pong", message.id)])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     LoggingBuilder::new().init();
//!
//!     let mut registry = Registry::new(Arc::new(LogSender));
//!     registry.register(Ping {
//!         base: PatternMatcher::compile("ping", r"(?i)^/(ping)(@\w+)?($| )", Vec::new())?,
//!     });
//!
//!     registry.process(&IncomingMessage::text("/ping")).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `yaml-config`: YAML configuration files (default)
//! - `toml-config`: TOML configuration files
//! - `json-log`: JSON log output

pub use chatmatch_core as core;
pub use chatmatch_framework as framework;
pub use chatmatch_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use chatmatch::prelude::*;
/// ```
pub mod prelude {
    pub use std::sync::Arc;

    // Matchers and dispatch
    pub use chatmatch_framework::prelude::*;
    pub use chatmatch_framework::{DispatchSummary, error_notice};

    // Messages and delivery
    pub use chatmatch_core::{BoxedSender, LogSender, MessageSender, SendError, escape_markdown};

    // Configuration and logging
    pub use chatmatch_runtime::{ChatConfigs, ConfigError, ConfigLoader, LoggingBuilder};
}
