//! Multipart asset upload.
//!
//! Draft images, source archives and proof images are uploaded first; the
//! returned `url` is what the draft and disclaimer bodies reference.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use dispatch_core::error::require_non_blank;
use dispatch_core::{DomainError, RecordId};

use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::ApiEnvelope;
use crate::error::ClientResult;

/// Stored object descriptor returned by `ossFile/uploadFile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: RecordId,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub name: String,
    pub url: String,
    /// Size as the server formats it.
    #[serde(default)]
    pub size_kb: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl DispatchClient {
    /// Upload in-memory content as the single `file` part.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<ApiEnvelope<StoredFile>> {
        require_non_blank("file", file_name)?;
        if bytes.is_empty() {
            return Err(DomainError::validation("file", "must not be empty").into());
        }
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part("file", part);
        self.post_multipart(endpoints::UPLOAD_FILE, form).await
    }

    pub async fn upload_path(&self, path: &Path) -> ClientResult<ApiEnvelope<StoredFile>> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::validation("file", format!("{} has no file name", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&file_name, bytes).await
    }
}
