//! Configuration module for chatmatch.
//!
//! Matcher configuration is read from a fallback file plus optional per-chat
//! overrides; see [`loader`] for the layout. Logging configuration is read
//! from a single optional file.

pub mod chats;
pub mod error;
pub mod loader;
pub mod schema;

pub use chats::{ChatConfigs, FALLBACK_CHAT};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, DEFAULT_CONFIG_ROOT, load_matcher_config};
pub use schema::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};
