//! Response Sender module: turns a [`ResponseSpec`] into exactly one
//! outbound delivery through a [`ChatTransport`].

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::types::{ChatId, KeyboardMarkup, ParseMode};
use tracing::{debug, error, warn};

use crate::assets::{Asset, AssetStore};
use crate::localization::Catalog;
use crate::responses::ResponseSpec;
use crate::send_errors::SendError;

/// Acknowledgement of a successful delivery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Ids of the messages Telegram created, one per album item
    pub message_ids: Vec<i32>,
}

impl Ack {
    pub fn single(message_id: i32) -> Self {
        Self {
            message_ids: vec![message_id],
        }
    }
}

/// File uploaded with a photo, document or album item.
/// Captions are always sent with HTML formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

impl Attachment {
    pub fn new(asset: Asset, caption: Option<String>) -> Self {
        Self {
            file_name: asset.name,
            bytes: asset.bytes,
            caption,
        }
    }
}

/// Outbound capabilities the sender needs from the messaging platform
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
        keyboard: Option<KeyboardMarkup>,
    ) -> Result<Ack>;

    async fn send_photo(&self, chat_id: ChatId, photo: Attachment) -> Result<Ack>;

    async fn send_document(&self, chat_id: ChatId, document: Attachment) -> Result<Ack>;

    async fn send_media_group(&self, chat_id: ChatId, items: Vec<Attachment>) -> Result<Ack>;
}

pub struct ResponseSender<T> {
    transport: T,
    assets: AssetStore,
    catalog: Arc<Catalog>,
}

impl<T: ChatTransport> ResponseSender<T> {
    pub fn new(transport: T, assets: AssetStore, catalog: Arc<Catalog>) -> Self {
        Self {
            transport,
            assets,
            catalog,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver `spec` to `chat_id`.
    ///
    /// On failure the user receives a plain-text notice instead and the
    /// original error is returned. Nothing is retried.
    pub async fn send(&self, spec: &ResponseSpec, chat_id: ChatId) -> Result<Ack, SendError> {
        let err = match self.deliver(spec, chat_id).await {
            Ok(ack) => {
                debug!(chat_id = %chat_id, kind = spec.kind(), messages = ack.message_ids.len(), "Response delivered");
                return Ok(ack);
            }
            Err(err) => err,
        };

        let notice = match &err {
            SendError::ResourceNotFound { missing } => {
                warn!(chat_id = %chat_id, missing = ?missing, "Static asset missing for response");
                match spec.missing_notice() {
                    Some(notice) => notice.to_string(),
                    None => {
                        let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
                        self.catalog.missing_files_notice(&missing)
                    }
                }
            }
            SendError::DeliveryFailed(reason) => {
                error!(chat_id = %chat_id, kind = spec.kind(), error = %reason, "Response delivery failed");
                self.catalog.delivery_error_notice(reason)
            }
        };

        if let Err(notify_err) = self.transport.send_text(chat_id, &notice, None, None).await {
            error!(chat_id = %chat_id, error = %notify_err, "Failed to deliver error notice");
        }

        Err(err)
    }

    async fn deliver(&self, spec: &ResponseSpec, chat_id: ChatId) -> Result<Ack, SendError> {
        match spec {
            ResponseSpec::Text { body, keyboard } => self
                .transport
                .send_text(chat_id, body, Some(ParseMode::Html), keyboard.clone())
                .await
                .map_err(SendError::delivery_failed),
            ResponseSpec::Photo { asset, caption, .. } => {
                let asset = self.assets.read(asset).await?;
                self.transport
                    .send_photo(chat_id, Attachment::new(asset, Some(caption.clone())))
                    .await
                    .map_err(SendError::delivery_failed)
            }
            ResponseSpec::Document { asset, caption, .. } => {
                let asset = self.assets.read(asset).await?;
                self.transport
                    .send_document(chat_id, Attachment::new(asset, Some(caption.clone())))
                    .await
                    .map_err(SendError::delivery_failed)
            }
            ResponseSpec::MediaGroup { items, .. } => {
                // Read every page first so a missing one sends nothing at all
                let assets = self.assets.read_all(&spec.assets()).await?;
                let attachments = assets
                    .into_iter()
                    .zip(items)
                    .map(|(asset, item)| Attachment::new(asset, item.caption.clone()))
                    .collect();
                self.transport
                    .send_media_group(chat_id, attachments)
                    .await
                    .map_err(SendError::delivery_failed)
            }
        }
    }
}
