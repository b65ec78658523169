//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading matcher configuration.
///
/// Every variant names the file involved and whether it was the fallback or a
/// per-chat override, so a failed startup points straight at the bad file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The mandatory fallback file could not be read.
    #[error("failed to read fallback config {}: {source}", path.display())]
    FallbackRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fallback file was read but does not describe a valid configuration.
    #[error("failed to parse fallback config {}: {source}", path.display())]
    FallbackParse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    /// A per-chat override could not be read.
    #[error("failed to read per-chat config {}: {source}", path.display())]
    PerChatRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-chat override was read but does not describe a valid configuration.
    #[error("failed to parse per-chat config {}: {source}", path.display())]
    PerChatParse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    /// The per-chat search pattern could not be built.
    #[error("invalid per-chat config pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A directory could not be listed while searching for per-chat overrides.
    #[error("failed to list per-chat configs: {0}")]
    Listing(#[from] glob::GlobError),

    /// A standalone configuration file could not be read or parsed.
    #[error("failed to load config {}: {message}", path.display())]
    File { path: PathBuf, message: String },
}

impl ConfigError {
    /// Returns true if the failure concerns the fallback file.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackRead { .. } | Self::FallbackParse { .. })
    }

    /// Returns true if the failure concerns a per-chat override.
    pub fn is_per_chat(&self) -> bool {
        matches!(self, Self::PerChatRead { .. } | Self::PerChatParse { .. })
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
