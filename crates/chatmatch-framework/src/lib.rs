//! # Chatmatch Framework
//!
//! The plugin contract and the dispatcher built on top of core types.
//!
//! This layer provides:
//! - [`PatternMatcher`]: identifier, compiled pattern, help entries and an
//!   optional enablement override
//! - [`ConfiguredMatcher`]: a base matcher carrying a plugin's typed
//!   configuration
//! - [`Matcher`]: the trait every plugin implements
//! - [`Registry`]: offers each incoming message to all matchers concurrently
//!   and delivers their replies
//!
//! Loading configuration from disk and initialising logging live in the
//! runtime crate; nothing here touches the filesystem.

pub mod configured;
pub mod error;
pub mod matcher;
pub mod plugin;
pub mod registry;

pub use configured::{ConfiguredMatcher, ExposesEnablement};
pub use error::{BoxError, MatcherError, MatcherResult};
pub use matcher::{HelpEntry, MatcherConfig, PatternMatcher};
pub use plugin::{BoxedMatcher, Matcher};
pub use registry::{DEFAULT_MATCHER_TIMEOUT, DispatchSummary, Registry, error_notice};

/// Everything a plugin implementation usually needs.
pub mod prelude {
    pub use crate::{
        BoxedMatcher, ConfiguredMatcher, ExposesEnablement, HelpEntry, Matcher, MatcherConfig,
        MatcherError, MatcherResult, PatternMatcher, Registry,
    };
    pub use async_trait::async_trait;
    pub use chatmatch_core::{IncomingMessage, OutgoingMessage, ParseMode};
}
