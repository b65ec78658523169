//! Chatmatch Runtime - configuration and logging for the dispatch core.
//!
//! This crate provides:
//! - Hierarchical matcher configuration (`ConfigLoader`, `ChatConfigs`)
//! - Logging configuration and initialisation (`LoggingBuilder`)
//!
//! # Loading a matcher's configuration
//!
//! ```rust,ignore
//! use chatmatch_runtime::ConfigLoader;
//!
//! let configs = ConfigLoader::new().root("config").load::<QuoteConfig>("quote")?;
//! let fallback = configs.fallback();
//! for (chat_id, config) in configs.iter() {
//!     // build one matcher variant per chat scope
//! }
//! ```

#[cfg(not(any(feature = "yaml-config", feature = "toml-config")))]
compile_error!("enable at least one of the `yaml-config` or `toml-config` features");

pub mod config;
pub mod logging;

// Re-exports
pub use config::{
    ChatConfigs, ConfigError, ConfigFormat, ConfigLoader, ConfigResult, LogFormat, LogLevel,
    LogOutput, LogRotation, LoggingConfig, load_matcher_config,
};
pub use logging::{LoggingBuilder, init_from_config};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
