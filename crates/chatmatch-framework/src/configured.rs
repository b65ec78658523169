//! Typed configuration attached to a matcher.
//!
//! [`ConfiguredMatcher<T>`] decorates a [`PatternMatcher`] with a plugin's own
//! configuration value. When that value embeds a [`MatcherConfig`] and says
//! so through [`ExposesEnablement`], the wrapper forwards it to the base
//! matcher and `is_enabled` follows the configuration file.
//!
//! ```rust
//! use chatmatch_framework::{ConfiguredMatcher, ExposesEnablement, MatcherConfig};
//! use regex::Regex;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct QuoteConfig {
//!     #[serde(flatten)]
//!     matcher: MatcherConfig,
//!     quotes: Vec<String>,
//! }
//!
//! impl ExposesEnablement for QuoteConfig {
//!     fn enablement(&self) -> Option<&MatcherConfig> {
//!         Some(&self.matcher)
//!     }
//! }
//!
//! let pattern = Regex::new(r"(?i)^/quote").unwrap();
//! let quote = ConfiguredMatcher::new("quote", pattern, Vec::new(), QuoteConfig::default());
//! assert!(quote.is_enabled());
//!
//! let off = quote.with_typed_config(QuoteConfig {
//!     matcher: MatcherConfig::disabled(),
//!     ..Default::default()
//! });
//! assert!(!off.is_enabled());
//! assert!(quote.is_enabled());
//! ```

use std::ops::Deref;
use std::sync::Arc;

use regex::Regex;

use crate::matcher::{HelpEntry, MatcherConfig, PatternMatcher};

/// Optional capability of a configuration type: exposing its enablement record.
///
/// The default implementation exposes nothing, so a configuration type
/// without an `enabled` switch opts out with an empty `impl`.
pub trait ExposesEnablement {
    /// Returns the embedded [`MatcherConfig`], if the type has one.
    fn enablement(&self) -> Option<&MatcherConfig> {
        None
    }
}

impl ExposesEnablement for MatcherConfig {
    fn enablement(&self) -> Option<&MatcherConfig> {
        Some(self)
    }
}

/// For matchers built in code that read no configuration file. `()` is not a
/// loadable configuration: files deserialize into maps.
impl ExposesEnablement for () {}

/// A [`PatternMatcher`] carrying a typed configuration value.
///
/// Dereferences to the base matcher, so every base operation is available
/// directly on the wrapper.
pub struct ConfiguredMatcher<T> {
    base: PatternMatcher,
    config: Arc<T>,
}

impl<T: ExposesEnablement> ConfiguredMatcher<T> {
    /// Builds the base matcher and attaches `config`.
    pub fn new(
        identifier: impl Into<String>,
        pattern: Regex,
        help: Vec<HelpEntry>,
        config: T,
    ) -> Self {
        Self::from_base(PatternMatcher::new(identifier, pattern, help), config)
    }

    /// Attaches `config` to an existing base matcher.
    ///
    /// Any enablement override already present on `base` is replaced by the
    /// one derived from `config`.
    pub fn from_base(base: PatternMatcher, config: T) -> Self {
        Self::wire(&base, Arc::new(config))
    }

    /// Returns a copy of this wrapper holding `config` instead.
    ///
    /// Enablement is re-derived from `config`; the receiver is left untouched.
    pub fn with_typed_config(&self, config: T) -> Self {
        Self::wire(&self.base, Arc::new(config))
    }

    fn wire(base: &PatternMatcher, config: Arc<T>) -> Self {
        let enablement = config.enablement().copied().unwrap_or_default();
        Self {
            base: base.with_enablement(&enablement),
            config,
        }
    }
}

impl<T> ConfiguredMatcher<T> {
    /// Returns the attached configuration.
    pub fn config(&self) -> &T {
        &self.config
    }

    /// Returns the base matcher.
    pub fn pattern_matcher(&self) -> &PatternMatcher {
        &self.base
    }
}

impl<T> Clone for ConfiguredMatcher<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T> Deref for ConfiguredMatcher<T> {
    type Target = PatternMatcher;

    fn deref(&self) -> &PatternMatcher {
        &self.base
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ConfiguredMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredMatcher")
            .field("base", &self.base)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmatch_core::IncomingMessage;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct PlainConfig {
        value: String,
    }

    impl ExposesEnablement for PlainConfig {}

    #[derive(Debug, Clone, Default, Deserialize)]
    struct EmbeddingConfig {
        #[serde(flatten)]
        matcher: MatcherConfig,
        #[serde(default)]
        flag: String,
    }

    impl ExposesEnablement for EmbeddingConfig {
        fn enablement(&self) -> Option<&MatcherConfig> {
            Some(&self.matcher)
        }
    }

    fn pattern() -> Regex {
        Regex::new(r"^/do").unwrap()
    }

    #[test]
    fn test_basic_wiring() {
        let help = vec![HelpEntry::new("do", "does things")];
        let cfg = PlainConfig {
            value: "v".into(),
        };
        let m = ConfiguredMatcher::new("id", pattern(), help.clone(), cfg.clone());

        assert_eq!(m.identifier(), "id");
        assert_eq!(m.help(), help.as_slice());
        assert_eq!(m.config(), &cfg);
        assert!(m.is_enabled());
        assert!(m.does_match(&IncomingMessage::text("/do it")));
    }

    #[test]
    fn test_embedded_enablement_wires_base() {
        let cfg = EmbeddingConfig {
            matcher: MatcherConfig::disabled(),
            flag: "x".into(),
        };
        let m = ConfiguredMatcher::new("id", pattern(), Vec::new(), cfg);

        assert!(!m.is_enabled());
        assert!(!m.pattern_matcher().is_enabled());
        assert_eq!(m.config().flag, "x");
    }

    #[test]
    fn test_embedded_enablement_from_file_content() {
        let cfg: EmbeddingConfig =
            serde_json::from_str(r#"{"enabled": false, "flag": "on"}"#).unwrap();
        let m = ConfiguredMatcher::new("id", pattern(), Vec::new(), cfg);

        assert!(!m.is_enabled());
        assert_eq!(m.config().flag, "on");
    }

    #[test]
    fn test_with_typed_config_rederives_enablement() {
        let enabled = ConfiguredMatcher::new(
            "id",
            pattern(),
            Vec::new(),
            EmbeddingConfig::default(),
        );
        let disabled = enabled.with_typed_config(EmbeddingConfig {
            matcher: MatcherConfig::disabled(),
            flag: "chat".into(),
        });
        let back = disabled.with_typed_config(EmbeddingConfig::default());

        assert!(enabled.is_enabled());
        assert!(enabled.config().flag.is_empty());
        assert!(!disabled.is_enabled());
        assert_eq!(disabled.config().flag, "chat");
        assert!(back.is_enabled());
    }

    #[test]
    fn test_from_base_replaces_existing_override() {
        let base = PatternMatcher::new("id", pattern(), Vec::new())
            .with_enablement(&MatcherConfig::disabled());
        let m = ConfiguredMatcher::from_base(base.clone(), PlainConfig::default());

        assert!(m.is_enabled());
        assert!(!base.is_enabled());
    }

    #[test]
    fn test_matcher_config_as_typed_config() {
        let m = ConfiguredMatcher::new("id", pattern(), Vec::new(), MatcherConfig::disabled());
        assert!(!m.is_enabled());

        let unit = ConfiguredMatcher::new("id", pattern(), Vec::new(), ());
        assert!(unit.is_enabled());
    }
}
