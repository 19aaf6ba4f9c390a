//! Two-step presigned uploads
//!
//! 1. `POST <presign path> {fileName, contentType}` returns a short-lived
//!    upload URL plus the storage key to reference later.
//! 2. The raw bytes are `PUT` to that URL with the same content type.

use crate::error::{Error, Result};
use crate::http::ApiClient;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Body of the presign request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub file_name: String,
    pub content_type: String,
}

/// Presign response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    pub upload_url: String,
    #[serde(default)]
    pub file_key: Option<String>,
    /// Public URL of the object once uploaded
    #[serde(default)]
    pub file_url: Option<String>,
}

impl PresignedUpload {
    /// Key to send back to the backend, falling back to the public URL
    pub fn key(&self) -> Option<&str> {
        self.file_key.as_deref().or(self.file_url.as_deref())
    }
}

/// A file that reached storage
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub key: String,
    pub url: Option<String>,
}

/// MIME type from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Uploads files through one presign endpoint
#[derive(Debug, Clone)]
pub struct Uploader<'c> {
    client: &'c ApiClient,
    presign_path: String,
}

impl<'c> Uploader<'c> {
    pub fn new(client: &'c ApiClient, presign_path: impl Into<String>) -> Self {
        Self {
            client,
            presign_path: presign_path.into(),
        }
    }

    /// Read a local file and upload it
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::upload(path.display().to_string(), "path has no file name"))?
            .to_string();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    path: path.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        self.upload_bytes(&file_name, Bytes::from(bytes), content_type_for(path))
            .await
    }

    /// Presign and upload in-memory bytes
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<UploadedFile> {
        let request = PresignRequest {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        };
        let presigned: PresignedUpload = self.client.post(&self.presign_path, &request).await?;

        let key = presigned
            .key()
            .ok_or_else(|| Error::upload(file_name, "presign response has no file key"))?
            .to_string();

        debug!("Uploading {} ({}, {} bytes)", file_name, content_type, bytes.len());
        self.client
            .upload_presigned(&presigned.upload_url, bytes, content_type)
            .await?;

        info!("Uploaded {} as {}", file_name, key);
        Ok(UploadedFile {
            key,
            url: presigned.file_url,
        })
    }
}
