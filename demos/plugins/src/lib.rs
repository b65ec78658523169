//! Sample matchers for chatmatch.
//!
//! | Matcher | Identifier | Behaviour |
//! |---------|------------|-----------|
//! | [`PingMatcher`] | `ping` | Answers `/ping` with `pong` |
//! | [`NullMatcher`] | `null` | Never matches |
//! | [`ConfigurableMatcher`] | `configurable` | Command, reply and help read from `config/configurable.yml` |
//!
//! Register them with a [`Registry`](chatmatch::framework::Registry):
//!
//! ```rust,ignore
//! let mut registry = Registry::new(Arc::new(LogSender));
//! registry.register(PingMatcher::new()?);
//! registry.register(NullMatcher::new()?);
//! for matcher in ConfigurableMatcher::load_all(&ConfigLoader::new())? {
//!     registry.register(matcher);
//! }
//! ```

pub mod configurable;
pub mod null;
pub mod ping;

pub use configurable::{ChatScope, ConfigurableConfig, ConfigurableMatcher, LoadError};
pub use null::NullMatcher;
pub use ping::PingMatcher;
