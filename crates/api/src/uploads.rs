//! Local disk storage for avatars and chat attachments.
//!
//! Files land in the configured upload directory and are served back by
//! `ServeDir` under [`PUBLIC_PREFIX`](muraja_core::uploads::PUBLIC_PREFIX).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use muraja_core::uploads::{public_url, stored_file_name, stored_name_from_url, validate_size};

use crate::error::{AppError, AppResult};

/// A file received in a multipart field, before it is stored.
#[derive(Debug)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Text fields and at most one file read from a multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<IncomingFile>,
}

impl MultipartForm {
    /// Read every field. The part named `file_field` is kept as the file;
    /// every other part is read as text.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == file_field {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was picked.
                if !bytes.is_empty() {
                    form.file = Some(IncomingFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field, trimmed, or `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Writes uploads to a directory on disk.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    /// Directory the files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store a file and return its public URL.
    pub async fn save(&self, file: &IncomingFile) -> AppResult<String> {
        validate_size(file.bytes.len(), self.max_bytes)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot create upload dir: {e}")))?;

        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let name = stored_file_name(
            &file.file_name,
            chrono::Utc::now().timestamp_millis(),
            &nonce[..8],
        );
        tokio::fs::write(self.dir.join(&name), &file.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot write upload: {e}")))?;

        tracing::debug!(file = %name, bytes = file.bytes.len(), "Stored upload");
        Ok(public_url(&name))
    }

    /// Delete the file behind a public URL. Failures are logged, not returned.
    pub async fn remove(&self, url: &str) {
        let Some(name) = stored_name_from_url(url) else {
            tracing::debug!(url, "Not a local upload, nothing to remove");
            return;
        };
        if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
            tracing::warn!(url, error = %e, "Failed to remove stored upload");
        }
    }
}
