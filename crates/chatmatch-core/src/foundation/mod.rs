//! Foundation layer - message model and error types.
//!
//! This module contains the fundamental building blocks shared by every
//! chatmatch crate:
//! - Incoming and outgoing message types
//! - Markdown escaping for user-facing text
//! - Send errors reported by message senders

pub mod error;
pub mod markdown;
pub mod message;

pub use error::{SendError, SendResult};
pub use markdown::escape_markdown;
pub use message::{Chat, IncomingMessage, OutgoingMessage, ParseMode, User};
