//! [`ChatTransport`] backed by the Telegram Bot API
//!
//! The trait shares method names with teloxide's `Requester`, so the Bot API
//! calls below are spelled out in fully qualified form.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto, KeyboardMarkup, ParseMode};

use super::sender::{Ack, Attachment, ChatTransport};

fn input_file(attachment: Attachment) -> (InputFile, Option<String>) {
    let file = InputFile::memory(attachment.bytes).file_name(attachment.file_name);
    (file, attachment.caption)
}

#[async_trait]
impl ChatTransport for Bot {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
        keyboard: Option<KeyboardMarkup>,
    ) -> Result<Ack> {
        let mut request = self.send_message(chat_id, text);
        if let Some(mode) = parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        let message = request.await?;
        Ok(Ack::single(message.id.0))
    }

    async fn send_photo(&self, chat_id: ChatId, photo: Attachment) -> Result<Ack> {
        let (file, caption) = input_file(photo);
        let mut request = Requester::send_photo(self, chat_id, file);
        if let Some(caption) = caption {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }
        let message = request.await?;
        Ok(Ack::single(message.id.0))
    }

    async fn send_document(&self, chat_id: ChatId, document: Attachment) -> Result<Ack> {
        let (file, caption) = input_file(document);
        let mut request = Requester::send_document(self, chat_id, file);
        if let Some(caption) = caption {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }
        let message = request.await?;
        Ok(Ack::single(message.id.0))
    }

    async fn send_media_group(&self, chat_id: ChatId, items: Vec<Attachment>) -> Result<Ack> {
        let media: Vec<InputMedia> = items
            .into_iter()
            .map(|item| {
                let (file, caption) = input_file(item);
                let mut photo = InputMediaPhoto::new(file);
                if caption.is_some() {
                    photo.parse_mode = Some(ParseMode::Html);
                }
                photo.caption = caption;
                InputMedia::Photo(photo)
            })
            .collect();

        let messages = Requester::send_media_group(self, chat_id, media).await?;
        Ok(Ack {
            message_ids: messages.iter().map(|message| message.id.0).collect(),
        })
    }
}
