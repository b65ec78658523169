//! Matcher registry example.
//!
//! Builds a registry over a [`LogSender`], registers the sample matchers and
//! optionally dispatches one message, so every reply ends up in the log.
//!
//! # Usage
//!
//! ```bash
//! cd demos/plugins
//! cargo run --bin run-example -- --message "/hello"
//! cargo run --bin run-example -- --verbose --chat-id 111 --message "/hello"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chatmatch::framework::Registry;
use chatmatch::prelude::{IncomingMessage, LogSender};
use chatmatch::runtime::{ConfigLoader, LogLevel, LoggingConfig, logging};
use chatmatch_demo_plugins::{ConfigurableMatcher, NullMatcher, PingMatcher};
use clap::Parser;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "run-example", about = "Run the sample matchers against one message")]
struct Args {
    /// Enable verbose (debug) logging
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long)]
    quiet: bool,

    /// Directory holding matcher and logging configuration
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Message text to dispatch
    #[arg(long)]
    message: Option<String>,

    /// Chat the message is posted in
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    chat_id: i64,
}

impl Args {
    /// Applies `--verbose` / `--quiet` over the configured level.
    fn logging_config(&self, mut config: LoggingConfig) -> LoggingConfig {
        if self.verbose {
            config.level = LogLevel::Debug;
        } else if self.quiet {
            config.level = LogLevel::Error;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let loader = ConfigLoader::new().root(&args.config_dir);

    let logging_config = loader
        .load_optional::<LoggingConfig>("logging")
        .context("loading logging configuration")?;
    logging::init_from_config(&args.logging_config(logging_config));

    info!("Starting matcher registry example...");
    debug!("Creating matcher registry...");

    let registry = build_registry(&loader)?;
    for entry in registry.help() {
        debug!(command = %entry.command, description = %entry.description, "Available command");
    }

    if let Some(text) = args.message {
        let message = IncomingMessage::text(text).with_id(1).with_chat(args.chat_id);
        let summary = registry.process(&message).await;
        info!(
            executed = summary.executed,
            failed = summary.failed,
            sent = summary.sent,
            "Message dispatched"
        );
    }

    Ok(())
}

fn build_registry(loader: &ConfigLoader) -> Result<Registry> {
    let mut registry = Registry::new(Arc::new(LogSender));

    for matcher in ConfigurableMatcher::load_all(loader).context("loading configurable matcher")? {
        registry.register(matcher);
    }
    registry.register(PingMatcher::new()?);
    registry.register(NullMatcher::new()?);

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_verbose_and_quiet() {
        let verbose = Args::try_parse_from(["run-example", "--verbose"]).unwrap();
        assert_eq!(
            verbose.logging_config(LoggingConfig::default()).level,
            LogLevel::Debug
        );

        let quiet = Args::try_parse_from(["run-example", "--quiet"]).unwrap();
        assert_eq!(
            quiet.logging_config(LoggingConfig::default()).level,
            LogLevel::Error
        );

        assert!(Args::try_parse_from(["run-example", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_message_and_chat() {
        let args = Args::try_parse_from([
            "run-example",
            "--config-dir",
            "/tmp/cfg",
            "--message",
            "/ping",
            "--chat-id",
            "-100",
        ])
        .unwrap();

        assert_eq!(args.config_dir, PathBuf::from("/tmp/cfg"));
        assert_eq!(args.message.as_deref(), Some("/ping"));
        assert_eq!(args.chat_id, -100);
    }

    #[test]
    fn test_build_registry_with_sample_config() {
        let loader = ConfigLoader::new().root(concat!(env!("CARGO_MANIFEST_DIR"), "/config"));
        let registry = build_registry(&loader).unwrap();

        // fallback + chat 111 + ping + null
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_build_registry_without_config_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let loader = ConfigLoader::new().root(dir.path());
        assert!(build_registry(&loader).is_err());
    }
}
