//! Shared test doubles for the integration tests
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hotel_delivery_bot::bot::{Ack, Attachment, ChatTransport};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use teloxide::types::{ChatId, KeyboardMarkup, ParseMode};

/// One outbound call as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text {
        chat_id: ChatId,
        text: String,
        parse_mode: Option<ParseMode>,
        keyboard: Option<KeyboardMarkup>,
    },
    Photo {
        chat_id: ChatId,
        photo: Attachment,
    },
    Document {
        chat_id: ChatId,
        document: Attachment,
    },
    MediaGroup {
        chat_id: ChatId,
        items: Vec<Attachment>,
    },
}

/// Transport that records every call and can be told to fail
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI32,
    /// Fail photo, document and album sends with this description
    fail_media: Option<String>,
    /// Fail every call, text included
    fail_all: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_media(reason: &str) -> Self {
        Self {
            fail_media: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn unreachable(reason: &str) -> Self {
        Self {
            fail_all: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, media: bool, messages: i32) -> Result<Ack> {
        self.calls.lock().unwrap().push(call);
        if let Some(reason) = &self.fail_all {
            return Err(anyhow!(reason.clone()));
        }
        if media {
            if let Some(reason) = &self.fail_media {
                return Err(anyhow!(reason.clone()));
            }
        }
        let first = self.next_id.fetch_add(messages, Ordering::SeqCst) + 1;
        Ok(Ack {
            message_ids: (first..first + messages).collect(),
        })
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
        keyboard: Option<KeyboardMarkup>,
    ) -> Result<Ack> {
        self.record(
            Call::Text {
                chat_id,
                text: text.to_string(),
                parse_mode,
                keyboard,
            },
            false,
            1,
        )
    }

    async fn send_photo(&self, chat_id: ChatId, photo: Attachment) -> Result<Ack> {
        self.record(Call::Photo { chat_id, photo }, true, 1)
    }

    async fn send_document(&self, chat_id: ChatId, document: Attachment) -> Result<Ack> {
        self.record(Call::Document { chat_id, document }, true, 1)
    }

    async fn send_media_group(&self, chat_id: ChatId, items: Vec<Attachment>) -> Result<Ack> {
        let messages = items.len() as i32;
        self.record(Call::MediaGroup { chat_id, items }, true, messages)
    }
}
