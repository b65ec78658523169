//! Hierarchical matcher configuration loader using figment.
//!
//! A matcher's configuration lives in a fallback file and any number of
//! per-chat overrides under a common root (default `config`):
//!
//! ```text
//! config/
//! ├── quote.yml              fallback, chat scope 0 (mandatory)
//! ├── -100123456/
//! │   └── quote.yml          override for chat -100123456
//! └── 42/
//!     └── quote.yml          override for chat 42
//! ```
//!
//! Every file is layered over `T::default()`, so missing keys keep their
//! default and an empty file yields the default. Unknown keys are ignored.
//! Directories whose name is not an integer are skipped.
//!
//! Loading is all or nothing: the first unreadable or malformed file aborts
//! the load with an error naming it.
//!
//! # Feature Flags
//!
//! - `yaml-config` *(default)*: `.yml` files
//! - `toml-config`: `.toml` files
//!
//! # Example
//!
//! ```rust,ignore
//! use chatmatch_runtime::config::{ConfigFormat, ConfigLoader};
//!
//! let configs = ConfigLoader::new()
//!     .root("/etc/bot/config")
//!     .format(ConfigFormat::Yaml)
//!     .load::<QuoteConfig>("quote")?;
//!
//! let for_this_chat = configs.for_chat(message.chat_id());
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Serialized};
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace, warn};

use super::chats::{ChatConfigs, FALLBACK_CHAT};
use super::error::{ConfigError, ConfigResult};

/// Default configuration root, relative to the working directory.
pub const DEFAULT_CONFIG_ROOT: &str = "config";

/// On-disk format of configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, `.yml` extension.
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML, `.toml` extension.
    #[cfg(feature = "toml-config")]
    Toml,
}

impl Default for ConfigFormat {
    fn default() -> Self {
        #[cfg(feature = "yaml-config")]
        {
            Self::Yaml
        }
        #[cfg(not(feature = "yaml-config"))]
        {
            Self::Toml
        }
    }
}

impl ConfigFormat {
    /// Returns the file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            #[cfg(feature = "yaml-config")]
            Self::Yaml => "yml",
            #[cfg(feature = "toml-config")]
            Self::Toml => "toml",
        }
    }

    /// Looks up the format for a file extension.
    ///
    /// Only extensions enabled via feature flags are recognised.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            #[cfg(feature = "yaml-config")]
            "yml" | "yaml" => Some(Self::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parses `content` layered over `T::default()`.
    fn parse<T>(self, content: &str) -> Result<T, figment::Error>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let mut figment = Figment::from(Serialized::defaults(T::default()));

        if !content.trim().is_empty() {
            figment = match self {
                #[cfg(feature = "yaml-config")]
                Self::Yaml => figment.merge(Yaml::string(content)),
                #[cfg(feature = "toml-config")]
                Self::Toml => figment.merge(Toml::string(content)),
            };
        }

        figment.extract()
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Loads matcher configuration from a configuration root.
///
/// # Example
///
/// ```rust,ignore
/// let configs = ConfigLoader::new().load::<PingConfig>("ping")?;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directory holding fallback files and per-chat directories.
    root: PathBuf,
    /// Format, and thus extension, of the files.
    format: ConfigFormat,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading `.yml` files (or `.toml` without YAML
    /// support) from `./config`.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            format: ConfigFormat::default(),
        }
    }

    /// Sets the configuration root.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = path.as_ref().to_path_buf();
        self
    }

    /// Sets the file format.
    pub fn format(mut self, format: ConfigFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the configuration root.
    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Returns the file format.
    pub fn file_format(&self) -> ConfigFormat {
        self.format
    }

    /// Returns the path of the fallback file for `identifier`.
    pub fn fallback_path(&self, identifier: &str) -> PathBuf {
        self.root.join(self.file_name(identifier))
    }

    /// Loads the fallback and every per-chat override for `identifier`.
    ///
    /// Per-chat files are read first, the fallback last. A per-chat
    /// directory named `0` is parsed but shadowed by the fallback.
    pub fn load<T>(&self, identifier: &str) -> ConfigResult<ChatConfigs<T>>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let mut overrides = Vec::new();
        for (chat_id, path) in self.per_chat_paths(identifier)? {
            debug!(matcher = identifier, chat_id, path = %path.display(), "Loading per-chat config");

            let content =
                std::fs::read_to_string(&path).map_err(|source| ConfigError::PerChatRead {
                    path: path.clone(),
                    source,
                })?;
            let config: T =
                self.format
                    .parse(&content)
                    .map_err(|source| ConfigError::PerChatParse {
                        path: path.clone(),
                        source: Box::new(source),
                    })?;

            overrides.push((chat_id, config));
        }

        let path = self.fallback_path(identifier);
        debug!(matcher = identifier, path = %path.display(), "Loading fallback config");

        let content =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::FallbackRead {
                path: path.clone(),
                source,
            })?;
        let fallback: T = self
            .format
            .parse(&content)
            .map_err(|source| ConfigError::FallbackParse {
                path: path.clone(),
                source: Box::new(source),
            })?;

        let mut configs = ChatConfigs::new(fallback);
        for (chat_id, config) in overrides {
            if chat_id == FALLBACK_CHAT {
                warn!(matcher = identifier, "Per-chat config for chat 0 is shadowed by the fallback");
                continue;
            }
            configs.insert(chat_id, config);
        }

        info!(
            matcher = identifier,
            chats = configs.len() - 1,
            "Matcher configuration loaded"
        );

        Ok(configs)
    }

    /// Loads a single optional file `{root}/{name}.{ext}`.
    ///
    /// A missing file yields `T::default()`.
    pub fn load_optional<T>(&self, name: &str) -> ConfigResult<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let path = self.root.join(self.file_name(name));
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file found, using defaults");
            return Ok(T::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::File {
            path: path.clone(),
            message: e.to_string(),
        })?;

        self.format.parse(&content).map_err(|e| ConfigError::File {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Finds `{root}/*/{identifier}.{ext}` whose directory name is a chat id.
    fn per_chat_paths(&self, identifier: &str) -> ConfigResult<Vec<(i64, PathBuf)>> {
        let pattern = format!(
            "{}/*/{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(&self.file_name(identifier)),
        );
        trace!(pattern, "Searching for per-chat configs");

        let paths = glob::glob(&pattern).map_err(|source| ConfigError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut found = Vec::new();
        for entry in paths {
            let path = entry?;
            let chat_id = path
                .parent()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str())
                .and_then(|name| name.parse::<i64>().ok());

            match chat_id {
                Some(chat_id) => found.push((chat_id, path)),
                None => trace!(path = %path.display(), "Skipping non-chat directory"),
            }
        }

        Ok(found)
    }

    fn file_name(&self, identifier: &str) -> String {
        format!("{}.{}", identifier, self.format.extension())
    }
}

/// Loads `identifier`'s configuration from `./config` in the default format.
pub fn load_matcher_config<T>(identifier: &str) -> ConfigResult<ChatConfigs<T>>
where
    T: DeserializeOwned + Serialize + Default,
{
    ConfigLoader::new().load(identifier)
}

// =============================================================================
// Tests
// =============================================================================
