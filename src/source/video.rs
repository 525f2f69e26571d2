use super::mime::{normalize_extension, MimeTable};
use crate::errors::{ThumbnailerError, ThumbnailerResult};
use axum::body::Bytes;
use log::info;
use std::path::{Path, PathBuf};

/// A video held fully in memory, ready to be served.
#[derive(Debug, Clone)]
pub struct VideoSource {
    path: PathBuf,
    bytes: Bytes,
    extension: String,
    mime_type: String,
}

impl VideoSource {
    /// Read the whole file into memory.
    ///
    /// Fails with [`ThumbnailerError::MissingInput`] when nothing exists at `path`,
    /// and with [`ThumbnailerError::Other`] when existence cannot be checked.
    pub async fn load<P: AsRef<Path>>(path: P, mime_table: &MimeTable) -> ThumbnailerResult<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            return Err(ThumbnailerError::MissingInput(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path).await?;
        info!("📹 Read video: {} ({} bytes)", path.display(), bytes.len());

        Ok(Self::from_bytes(path, bytes, mime_table))
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Bytes>, mime_table: &MimeTable) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .map(|ext| normalize_extension(&ext.to_string_lossy()))
            .unwrap_or_default();
        let mime_type = mime_table.lookup(&extension).to_string();

        Self {
            path,
            bytes: bytes.into(),
            extension,
            mime_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension with its leading dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
