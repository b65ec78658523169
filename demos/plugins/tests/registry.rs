use std::fs;
use std::sync::Arc;

use chatmatch::prelude::*;
use chatmatch::core::MockSender;
use chatmatch_demo_plugins::{ConfigurableMatcher, NullMatcher, PingMatcher};
use tempfile::TempDir;

/// Matches everything and always fails.
struct Broken {
    base: PatternMatcher,
}

impl Broken {
    fn new(identifier: &str) -> Self {
        Self {
            base: PatternMatcher::compile(identifier, ".*", Vec::new()).unwrap(),
        }
    }

    fn disabled(identifier: &str) -> Self {
        let broken = Self::new(identifier);
        Self {
            base: broken.base.with_enablement(&MatcherConfig::disabled()),
        }
    }
}

#[async_trait]
impl Matcher for Broken {
    fn pattern_matcher(&self) -> &PatternMatcher {
        &self.base
    }

    async fn process(&self, _message: &IncomingMessage) -> MatcherResult {
        Err(MatcherError::failed("database is on fire"))
    }
}

/// Matches everything and echoes the text.
struct Echo {
    base: PatternMatcher,
}

#[async_trait]
impl Matcher for Echo {
    fn pattern_matcher(&self) -> &PatternMatcher {
        &self.base
    }

    async fn process(&self, message: &IncomingMessage) -> MatcherResult {
        Ok(vec![OutgoingMessage::reply(
            message.text_or_caption(),
            message.id,
        )])
    }
}

fn setup() -> (Arc<MockSender>, Registry) {
    let sender = Arc::new(MockSender::new());
    let registry = Registry::new(Arc::clone(&sender) as BoxedSender);
    (sender, registry)
}

fn msg(text: &str) -> IncomingMessage {
    IncomingMessage::text(text).with_id(123).with_chat(42)
}

#[tokio::test]
async fn test_ping_through_registry() {
    let (sender, mut registry) = setup();
    registry.register(PingMatcher::new().unwrap());
    registry.register(NullMatcher::new().unwrap());

    registry.process(&msg("/ping")).await;

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 42);
    assert_eq!(sent[0].message, OutgoingMessage::reply("pong", 123));
}

#[tokio::test]
async fn test_non_matching_message_sends_nothing() {
    let (sender, mut registry) = setup();
    registry.register(PingMatcher::new().unwrap());
    registry.register(NullMatcher::new().unwrap());

    let summary = registry.process(&msg("/pings")).await;

    assert_eq!(sender.attempts(), 0);
    assert_eq!(summary.unmatched, 2);
}

#[tokio::test]
async fn test_failing_matcher_notice() {
    let (sender, mut registry) = setup();
    registry.register(Broken::new("broken_one"));
    registry.register(NullMatcher::new().unwrap());

    registry.process(&msg("anything")).await;

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 42);
    assert_eq!(sent[0].message.parse_mode, Some(ParseMode::Markdown));
    assert_eq!(sent[0].message.reply_to_message_id, Some(123));
    assert_eq!(
        sent[0].message.text,
        "⚠️ *Error in matcher \"broken_one\"*\n\ndatabase is on fire"
    );
}

#[tokio::test]
async fn test_disabled_matcher_does_not_send() {
    let (sender, mut registry) = setup();
    registry.register(Broken::disabled("broken"));
    registry.register(Echo {
        base: PatternMatcher::compile("echo", ".*", Vec::new()).unwrap(),
    });

    registry.process(&msg("hello")).await;

    assert_eq!(sender.sent_texts(), vec!["hello"]);
}

#[tokio::test]
async fn test_matcher_disabled_by_chat_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("configurable.yml"), "command: ping\nreply: cfg\n").unwrap();
    fs::create_dir_all(dir.path().join("77")).unwrap();
    fs::write(dir.path().join("77/configurable.yml"), "enabled: false\n").unwrap();

    let (sender, mut registry) = setup();
    for matcher in ConfigurableMatcher::load_all(&ConfigLoader::new().root(dir.path())).unwrap() {
        registry.register(matcher);
    }
    registry.register(PingMatcher::new().unwrap());

    let in_chat = |chat: i64| IncomingMessage::text("/ping").with_id(1).with_chat(chat);

    let summary = registry.process(&in_chat(77)).await;
    assert_eq!(sender.sent_texts(), vec!["pong"]);
    assert_eq!(summary.disabled, 1);
    assert_eq!(summary.executed, 1);
    assert_eq!(summary.sent, 1);

    // Other chats still get the fallback variant; tasks finish in any order
    let summary = registry.process(&in_chat(5)).await;
    let mut texts = sender.sent_texts().split_off(1);
    texts.sort();
    assert_eq!(texts, vec!["cfg", "pong"]);
    assert_eq!(summary.disabled, 1);
    assert_eq!(summary.executed, 2);
}

#[tokio::test]
async fn test_send_failures_are_contained() {
    let sender = Arc::new(MockSender::failing());
    let mut registry = Registry::new(Arc::clone(&sender) as BoxedSender);
    registry.register(PingMatcher::new().unwrap());
    registry.register(Broken::new("broken"));

    let summary = registry.process(&msg("/ping")).await;

    assert_eq!(sender.attempts(), 2);
    assert_eq!(summary.send_failures, 2);
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
async fn test_help_across_plugins() {
    let (_, mut registry) = setup();
    registry.register(PingMatcher::new().unwrap());
    registry.register(NullMatcher::new().unwrap());

    let help = registry.help();
    assert_eq!(help.len(), 2);
    assert_eq!(help[0].command, "ping");
    assert_eq!(help[1].description, "Example; never matches");
}
