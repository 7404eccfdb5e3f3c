//! Disk storage for admin uploads.
//!
//! Files land in the uploads dir as `<field>-<timestamp_ms>-<rand><ext>` and
//! are served back under `/uploads/`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::errors::ServiceError;

pub const PUBLIC_PREFIX: &str = "/uploads";

const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "mp4", "webm", "mov", "pdf",
];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredFile {
    pub field: String,
    pub filename: String,
    pub url: String,
    pub size: usize,
}

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(ServiceError::storage)?;
        Ok(Arc::new(Self { dir }))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a generated name and return where it is served.
    pub async fn save(&self, field: &str, original_name: Option<&str>, bytes: &[u8]) -> Result<StoredFile, ServiceError> {
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let filename = file_name(field, original_name, Utc::now().timestamp_millis(), suffix)?;
        fs::write(self.dir.join(&filename), bytes).await.map_err(ServiceError::storage)?;
        info!(%filename, size = bytes.len(), "upload stored");
        Ok(StoredFile {
            field: sanitize_field(field),
            url: format!("{PUBLIC_PREFIX}/{filename}"),
            filename,
            size: bytes.len(),
        })
    }
}

fn sanitize_field(field: &str) -> String {
    let cleaned: String = field
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() { "file".to_string() } else { cleaned }
}

/// Lowercased extension of `original_name` including the dot, checked
/// against the allow list.
fn extension(original_name: Option<&str>) -> Result<String, ServiceError> {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ServiceError::Validation("uploaded file needs an extension".into()))?;
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ServiceError::Validation(format!("file type .{ext} is not allowed")));
    }
    Ok(format!(".{ext}"))
}

pub fn file_name(field: &str, original_name: Option<&str>, timestamp_ms: i64, suffix: u32) -> Result<String, ServiceError> {
    let ext = extension(original_name)?;
    Ok(format!("{}-{}-{}{}", sanitize_field(field), timestamp_ms, suffix, ext))
}
