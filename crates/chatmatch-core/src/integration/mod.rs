//! Integration layer - the send capability consumed by the dispatcher.
//!
//! The chat client is an external collaborator. chatmatch only depends on
//! its ability to deliver one message at a time, expressed by
//! [`MessageSender`]. Two senders ship with the crate:
//! - [`LogSender`] logs messages instead of delivering them
//! - [`MockSender`] records messages for assertions in tests

pub mod mock;
pub mod sender;

pub use mock::{MockSender, SentMessage};
pub use sender::{BoxedSender, LogSender, MessageSender};
