//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Routes incoming text messages to their response
//! - `sender`: Delivers a response through a chat transport
//! - `telegram_transport`: The chat transport backed by the Bot API
//! - `ui_builder`: Creates the reply keyboard

pub mod message_handler;
pub mod sender;
pub mod telegram_transport;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use message_handler::{handle_message, handle_text_message, message_handler};
pub use sender::{Ack, Attachment, ChatTransport, ResponseSender};
pub use ui_builder::main_keyboard;
