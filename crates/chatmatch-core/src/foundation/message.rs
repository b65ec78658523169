//! Message types for the chatmatch dispatch core.
//!
//! Two shapes cross the boundary between the chat client and the matchers:
//! - [`IncomingMessage`]: a message received from a chat, offered to matchers
//! - [`OutgoingMessage`]: a message a matcher wants delivered
//!
//! Both mirror the relevant subset of a chat webhook payload and can be
//! (de)serialized with serde, but the wire format itself belongs to the
//! client implementation.
//!
//! # Canonical Text
//!
//! Matchers never look at `text` and `caption` separately. They test their
//! patterns against [`IncomingMessage::text_or_caption`], which yields the text
//! when present and the caption of a media message otherwise.

use serde::{Deserialize, Serialize};

// ============================================================================
// Incoming
// ============================================================================

/// The chat a message was posted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Chat identifier; negative for groups on most platforms.
    pub id: i64,
    /// Title of a group chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The author of an incoming message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Public username, without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name as shown in the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

impl User {
    /// Returns the best available human-readable name.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.first_name.as_deref())
            .unwrap_or("unknown")
    }
}

/// A message received from a chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Message identifier, unique within its chat.
    #[serde(rename = "message_id")]
    pub id: i64,
    /// The originating chat.
    pub chat: Chat,
    /// The sender, absent for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// Text of a plain message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Caption of a media message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl IncomingMessage {
    /// Creates a text message with zeroed identifiers.
    ///
    /// Use the `with_*` methods to fill in the rest:
    ///
    /// ```
    /// use chatmatch_core::IncomingMessage;
    ///
    /// let msg = IncomingMessage::text("/ping").with_id(123).with_chat(-100);
    /// assert_eq!(msg.text_or_caption(), "/ping");
    /// assert_eq!(msg.chat.id, -100);
    /// ```
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Sets the message identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the originating chat.
    pub fn with_chat(mut self, chat_id: i64) -> Self {
        self.chat.id = chat_id;
        self
    }

    /// Sets the sender.
    pub fn with_sender(mut self, user: User) -> Self {
        self.from = Some(user);
        self
    }

    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Returns the chat this message was posted in.
    pub fn chat_id(&self) -> i64 {
        self.chat.id
    }

    /// Returns the display name of the sender, or `"unknown"`.
    pub fn sender_name(&self) -> &str {
        self.from.as_ref().map_or("unknown", User::display_name)
    }

    /// Returns the text if it is non-empty, otherwise the caption.
    ///
    /// Returns an empty string when neither is set.
    pub fn text_or_caption(&self) -> &str {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .or(self.caption.as_deref())
            .unwrap_or("")
    }
}

// ============================================================================
// Outgoing
// ============================================================================

/// How the client should render the text of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Legacy Markdown.
    Markdown,
    /// Markdown with the extended entity set.
    MarkdownV2,
    /// HTML subset.
    #[serde(rename = "HTML")]
    Html,
}

/// A message to be delivered by a [`MessageSender`](crate::MessageSender).
///
/// The destination chat is passed to the sender separately; `chat_id` is only
/// informative and left at zero by the constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Informative destination chat.
    #[serde(default)]
    pub chat_id: i64,
    /// Message this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    /// Text body.
    #[serde(default)]
    pub text: String,
    /// Photo reference (file id or URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Caption of the photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Rendering of `text` / `caption`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    /// Suppress link previews.
    #[serde(default)]
    pub disable_web_page_preview: bool,
    /// Deliver without a notification sound.
    #[serde(default)]
    pub disable_notification: bool,
}

impl OutgoingMessage {
    /// Creates a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Creates a plain text reply to `message_id`.
    pub fn reply(text: impl Into<String>, message_id: i64) -> Self {
        Self {
            reply_to_message_id: Some(message_id),
            ..Self::text(text)
        }
    }

    /// Creates a Markdown reply to `message_id`.
    ///
    /// The text is sent as is; escape untrusted parts with
    /// [`escape_markdown`](crate::escape_markdown).
    pub fn markdown_reply(text: impl Into<String>, message_id: i64) -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            ..Self::reply(text, message_id)
        }
    }

    /// Creates a photo message with an optional caption.
    pub fn photo(photo: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            photo: Some(photo.into()),
            caption,
            ..Default::default()
        }
    }

    /// Delivers the message without a notification.
    pub fn silent(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    /// Disables link previews.
    pub fn without_preview(mut self) -> Self {
        self.disable_web_page_preview = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_or_caption_prefers_text() {
        let msg = IncomingMessage::text("hello").with_caption("caption");
        assert_eq!(msg.text_or_caption(), "hello");
    }

    #[test]
    fn test_text_or_caption_falls_back_to_caption() {
        let msg = IncomingMessage::default().with_caption("/ping");
        assert_eq!(msg.text_or_caption(), "/ping");

        let msg = IncomingMessage::text("").with_caption("/ping");
        assert_eq!(msg.text_or_caption(), "/ping");
    }

    #[test]
    fn test_text_or_caption_empty() {
        assert_eq!(IncomingMessage::default().text_or_caption(), "");
    }

    #[test]
    fn test_deserialize_webhook_message() {
        let json = r#"{
            "message_id": 123,
            "chat": { "id": -1001, "title": "group" },
            "from": { "id": 7, "username": "alice" },
            "text": "/ping",
            "entities": []
        }"#;
        let msg: IncomingMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.id, 123);
        assert_eq!(msg.chat_id(), -1001);
        assert_eq!(msg.sender_name(), "alice");
        assert_eq!(msg.text_or_caption(), "/ping");
    }

    #[test]
    fn test_sender_name_fallbacks() {
        let msg = IncomingMessage::text("x");
        assert_eq!(msg.sender_name(), "unknown");

        let msg = msg.with_sender(User {
            id: 1,
            username: None,
            first_name: Some("Bob".into()),
        });
        assert_eq!(msg.sender_name(), "Bob");
    }

    #[test]
    fn test_reply_constructors() {
        let reply = OutgoingMessage::reply("pong", 123);
        assert_eq!(reply.reply_to_message_id, Some(123));
        assert_eq!(reply.text, "pong");
        assert_eq!(reply.parse_mode, None);

        let md = OutgoingMessage::markdown_reply("*bold*", 5).silent();
        assert_eq!(md.parse_mode, Some(ParseMode::Markdown));
        assert_eq!(md.reply_to_message_id, Some(5));
        assert!(md.disable_notification);
        assert!(!md.disable_web_page_preview);
    }

    #[test]
    fn test_parse_mode_serialization() {
        let msg = OutgoingMessage {
            parse_mode: Some(ParseMode::Html),
            ..OutgoingMessage::text("<b>x</b>")
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["parse_mode"], "HTML");
        assert!(value.get("photo").is_none());
    }
}
