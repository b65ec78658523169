//! Logging setup for chatmatch.
//!
//! Installs a `tracing-subscriber` registry driven by a [`LoggingConfig`].
//! Dispatch opens a `process` span per incoming message and a `matcher` span
//! per matcher task; `span_events` in the configuration controls whether
//! their lifecycle shows up in the output.
//!
//! ```rust,ignore
//! use chatmatch_runtime::config::{ConfigLoader, LoggingConfig};
//! use chatmatch_runtime::logging;
//!
//! let config: LoggingConfig = ConfigLoader::new().load_optional("logging")?;
//! logging::init_from_config(&config);
//! ```

use std::ffi::OsStr;
use std::path::Path;

use tracing::warn;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};

/// File name used when the configured log path has none.
const DEFAULT_LOG_FILE: &str = "chatmatch.log";

type BoxedLayer = Box<dyn tracing_subscriber::Layer<Registry> + Send + Sync>;

/// Initialize logging from a `LoggingConfig`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    // try_init: a subscriber may already be installed (tests, embedding apps)
    let _ = LoggingBuilder::from_config(config).try_init();
}

fn span_flags(events: &SpanEventConfig) -> FmtSpan {
    [
        (events.new, FmtSpan::NEW),
        (events.enter, FmtSpan::ENTER),
        (events.exit, FmtSpan::EXIT),
        (events.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .fold(FmtSpan::NONE, |acc, (_, flag)| acc | flag)
}

fn file_appender(path: &Path, rotation: LogRotation) -> RollingFileAppender {
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    match rotation {
        LogRotation::Never => tracing_appender::rolling::never(directory, file_name),
        LogRotation::Hourly => tracing_appender::rolling::hourly(directory, file_name),
        LogRotation::Daily => tracing_appender::rolling::daily(directory, file_name),
    }
}

/// Builds and installs the global subscriber.
///
/// `RUST_LOG`, when set, replaces the configured level; per-module filters
/// and [`directive`](Self::directive)s are applied on top of either.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    config: LoggingConfig,
    directives: Vec<String>,
}

impl LoggingBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from a loaded configuration.
    pub fn from_config(config: &LoggingConfig) -> Self {
        // Sorted so the resulting filter does not depend on map order
        let mut filters: Vec<_> = config.filters.iter().collect();
        filters.sort_by(|a, b| a.0.cmp(b.0));

        Self {
            config: config.clone(),
            directives: filters
                .into_iter()
                .map(|(module, level)| format!("{module}={level}"))
                .collect(),
        }
    }

    /// Override the base level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Add a filter directive such as `chatmatch_framework=debug`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()));

        self.directives
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(base, EnvFilter::add_directive)
    }

    /// Returns the writer and whether file output fell back to stdout.
    fn writer(&self) -> (BoxMakeWriter, bool) {
        match (self.config.output, &self.config.file_path) {
            (LogOutput::Stdout, _) => (BoxMakeWriter::new(std::io::stdout), false),
            (LogOutput::Stderr, _) => (BoxMakeWriter::new(std::io::stderr), false),
            (LogOutput::File, Some(path)) => (
                BoxMakeWriter::new(file_appender(path, self.config.rotation)),
                false,
            ),
            (LogOutput::File, None) => (BoxMakeWriter::new(std::io::stdout), true),
        }
    }

    fn layer(&self, writer: BoxMakeWriter) -> BoxedLayer {
        let location = self.config.file_location;
        let layer = fmt::layer()
            .with_writer(writer)
            .with_span_events(span_flags(&self.config.span_events))
            .with_thread_ids(self.config.thread_ids)
            .with_file(location)
            .with_line_number(location);

        match self.config.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
        }
    }

    /// Initialize the logging system, ignoring an already installed subscriber.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Try to initialize the logging system, returning an error on failure.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let (writer, missing_path) = self.writer();
        tracing_subscriber::registry()
            .with(self.layer(writer))
            .with(self.build_filter())
            .try_init()?;

        if missing_path {
            warn!("File output requested but no file path configured, fell back to stdout");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_flags() {
        assert_eq!(span_flags(&SpanEventConfig::default()), FmtSpan::NONE);
        assert_eq!(
            span_flags(&SpanEventConfig {
                new: true,
                close: true,
                ..Default::default()
            }),
            FmtSpan::NEW | FmtSpan::CLOSE
        );
        assert_eq!(
            span_flags(&SpanEventConfig {
                new: true,
                enter: true,
                exit: true,
                close: true,
            }),
            FmtSpan::FULL
        );
    }

    #[test]
    fn test_from_config_sorts_filters() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            ..Default::default()
        };
        config
            .filters
            .insert("chatmatch_runtime".into(), LogLevel::Trace);
        config.filters.insert("chatmatch_core".into(), LogLevel::Warn);

        let builder = LoggingBuilder::from_config(&config);

        assert_eq!(builder.config.level, LogLevel::Debug);
        assert_eq!(
            builder.directives,
            vec!["chatmatch_core=warn", "chatmatch_runtime=trace"]
        );
    }

    #[test]
    fn test_level_and_directive() {
        let builder = LoggingBuilder::new()
            .level(LogLevel::Error)
            .directive("chatmatch_framework=debug")
            .directive(String::from("chatmatch_core=loud"));

        assert_eq!(builder.config.level, LogLevel::Error);
        assert_eq!(builder.directives.len(), 2);

        // Unparseable directives are skipped
        let filter = builder.build_filter().to_string();
        assert!(filter.contains("chatmatch_framework"));
        assert!(!filter.contains("chatmatch_core"));
    }

    #[test]
    fn test_writer_selection() {
        let mut config = LoggingConfig {
            output: LogOutput::File,
            ..Default::default()
        };
        assert!(LoggingBuilder::from_config(&config).writer().1);

        let dir = tempfile::TempDir::new().unwrap();
        config.file_path = Some(dir.path().join("bot.log"));
        config.rotation = LogRotation::Daily;
        assert!(!LoggingBuilder::from_config(&config).writer().1);

        config.output = LogOutput::Stderr;
        assert!(!LoggingBuilder::from_config(&config).writer().1);
    }

    #[test]
    fn test_layer_for_each_format() {
        for format in [LogFormat::Compact, LogFormat::Full, LogFormat::Pretty] {
            let builder = LoggingBuilder::from_config(&LoggingConfig {
                format,
                thread_ids: true,
                file_location: true,
                ..Default::default()
            });
            let layer = builder.layer(BoxMakeWriter::new(std::io::sink));
            let subscriber = tracing_subscriber::registry().with(layer);
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(format = ?format, "layer installed");
            });
        }
    }
}
