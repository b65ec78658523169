use chatmatch::prelude::*;
use chatmatch_demo_plugins::PingMatcher;

const CASES: &[(&str, bool)] = &[
    ("", false),
    ("foobar", false),
    ("ping", false),
    ("/pings", false),
    (" /ping", false),
    ("/ping", true),
    ("/PING", true),
    ("/ping foo", true),
    ("/ping@bot", true),
    ("/ping@bot foo", true),
];

fn msg(text: &str) -> IncomingMessage {
    IncomingMessage::text(text).with_id(123)
}

#[test]
fn test_does_match() {
    let ping = PingMatcher::new().unwrap();
    for (input, expected) in CASES {
        assert_eq!(ping.does_match(&msg(input)), *expected, "{input:?}");
    }
}

#[tokio::test]
async fn test_process() {
    let ping = PingMatcher::new().unwrap();
    for (input, expected) in CASES {
        let result = ping.process(&msg(input)).await;
        if *expected {
            let replies = result.unwrap();
            assert_eq!(replies, vec![OutgoingMessage::reply("pong", 123)], "{input:?}");
        } else {
            assert!(result.unwrap_err().is_no_match(), "{input:?}");
        }
    }
}

#[test]
fn test_identity_and_help() {
    let ping = PingMatcher::new().unwrap();

    assert_eq!(ping.identifier(), "ping");
    assert!(ping.is_enabled());
    assert_eq!(
        ping.help(),
        &[HelpEntry::new("ping", r#"Responds with "pong""#)
            .usage("/ping")
            .example("/ping")]
    );
    assert_eq!(
        ping.command_match(&msg("/ping@bot foo")),
        Some(vec!["ping".to_string(), "@bot".to_string(), " ".to_string()])
    );
}

#[test]
fn test_matches_caption() {
    let ping = PingMatcher::new().unwrap();
    let photo = IncomingMessage::default().with_caption("/ping");
    assert!(ping.does_match(&photo));
}
