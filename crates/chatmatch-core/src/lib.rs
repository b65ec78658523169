//! # chatmatch Core
//!
//! The message model and the send capability of the chatmatch dispatch core.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! Plain data and helpers shared by every crate:
//! - **Messages**: [`IncomingMessage`] offered to matchers and
//!   [`OutgoingMessage`] produced by them
//! - **Markdown**: [`escape_markdown`] for user-facing error notices
//! - **Errors**: [`SendError`]
//!
//! ### Integration Layer
//!
//! The narrow interface to the chat client:
//! - **Send capability**: [`MessageSender`]
//! - **Senders**: [`LogSender`] for dry runs, [`MockSender`] for tests
//!
//! ```text
//! ┌──────────────┐     ┌──────────┐     ┌───────────────┐
//! │ chat client  │────▶│ Registry │────▶│    Matcher    │
//! │  (webhook)   │     │          │◀────│ (plugin code) │
//! └──────────────┘     └──────────┘     └───────────────┘
//!        ▲                  │
//!        └──MessageSender───┘
//! ```

// Architectural layers
pub mod foundation;
pub mod integration;

// Re-export foundation types
pub use foundation::{
    Chat, IncomingMessage, OutgoingMessage, ParseMode, SendError, SendResult, User,
    escape_markdown,
};

// Re-export integration types
pub use integration::{BoxedSender, LogSender, MessageSender, MockSender, SentMessage};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::{BoxedSender, MessageSender};
}
