//! # Static Asset Store
//!
//! Read-only access to the images and documents attached to responses.
//! The store only knows about existence and bytes; anything richer belongs
//! to the sender.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::send_errors::SendError;

/// A static asset loaded into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File name relative to the store root, also used as the upload name
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Local directory holding the bot's static assets
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read one asset.
    ///
    /// A missing file yields [`SendError::ResourceNotFound`]; every other
    /// I/O failure (permissions, a directory in place of the file, ...)
    /// yields [`SendError::DeliveryFailed`].
    pub async fn read(&self, name: &str) -> Result<Asset, SendError> {
        let path = self.root.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(asset = %name, size = bytes.len(), "Asset loaded");
                Ok(Asset {
                    name: name.to_string(),
                    bytes,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SendError::ResourceNotFound {
                missing: vec![name.to_string()],
            }),
            Err(e) => Err(SendError::delivery_failed(e)),
        }
    }

    /// Read several assets, all or nothing.
    ///
    /// Missing files are collected so the error names every absent asset,
    /// not only the first one. Any other failure stops immediately.
    pub async fn read_all(&self, names: &[&str]) -> Result<Vec<Asset>, SendError> {
        let mut assets = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match self.read(name).await {
                Ok(asset) => assets.push(asset),
                Err(SendError::ResourceNotFound { missing: absent }) => missing.extend(absent),
                Err(e) => return Err(e),
            }
        }

        if missing.is_empty() {
            Ok(assets)
        } else {
            Err(SendError::ResourceNotFound { missing })
        }
    }
}
