use chatmatch::prelude::{ExposesEnablement, HelpEntry, MatcherConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_COMMAND: &str = "configurable";
const DEFAULT_REPLY: &str = "unconfigured reply";
const DEFAULT_DESCRIPTION: &str = "Responds with a configured reply";

/// Contents of `configurable.yml`.
///
/// Empty strings fall back to the defaults, so an empty file yields a working
/// `/configurable` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableConfig {
    #[serde(flatten)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub description: String,
}

impl ExposesEnablement for ConfigurableConfig {
    fn enablement(&self) -> Option<&MatcherConfig> {
        Some(&self.matcher)
    }
}

impl ConfigurableConfig {
    /// Command name without the slash.
    pub fn command(&self) -> &str {
        non_empty_or(&self.command, DEFAULT_COMMAND)
    }

    pub fn reply(&self) -> &str {
        non_empty_or(&self.reply, DEFAULT_REPLY)
    }

    pub fn description(&self) -> &str {
        non_empty_or(&self.description, DEFAULT_DESCRIPTION)
    }

    /// `/{command}` with optional `@bot` suffix and arguments; the command is
    /// matched literally.
    pub fn pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"(?i)^/({})(@\w+)?($| )",
            regex::escape(self.command())
        ))
    }

    pub fn help(&self) -> Vec<HelpEntry> {
        let command = self.command();
        let invocation = format!("/{command}");

        vec![
            HelpEntry::new(command, self.description())
                .usage(invocation.clone())
                .example(invocation),
        ]
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
