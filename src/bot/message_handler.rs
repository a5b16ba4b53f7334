//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::responses::ResponseTable;

use super::sender::{ChatTransport, ResponseSender};

/// Answer one text message with exactly one response.
///
/// Delivery failures are already reported to the user by the sender, so
/// they are logged here and not propagated to the dispatcher.
pub async fn handle_text_message<T: ChatTransport>(
    sender: &ResponseSender<T>,
    table: &ResponseTable,
    chat_id: ChatId,
    text: &str,
) -> Result<()> {
    debug!(chat_id = %chat_id, message_length = text.len(), "Received text message from user");

    let spec = table.respond_to(text);
    info!(chat_id = %chat_id, response = spec.kind(), "Sending response");

    match sender.send(spec, chat_id).await {
        Ok(ack) => {
            debug!(chat_id = %chat_id, message_ids = ?ack.message_ids, "Response acknowledged");
        }
        Err(e) => {
            warn!(chat_id = %chat_id, error = %e, "Response replaced with an error notice");
        }
    }
    Ok(())
}

/// Answer an inbound message; messages without text get no response
pub async fn handle_message<T: ChatTransport>(
    sender: &ResponseSender<T>,
    table: &ResponseTable,
    chat_id: ChatId,
    text: Option<&str>,
) -> Result<()> {
    match text {
        Some(text) => handle_text_message(sender, table, chat_id, text).await,
        None => {
            debug!(chat_id = %chat_id, "Ignoring non-text message");
            Ok(())
        }
    }
}

pub async fn message_handler<T: ChatTransport>(
    msg: Message,
    table: Arc<ResponseTable>,
    sender: Arc<ResponseSender<T>>,
) -> Result<()> {
    handle_message(&*sender, &*table, msg.chat.id, msg.text()).await
}
