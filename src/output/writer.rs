use super::types::ThumbnailData;
use crate::errors::{OutputError, ThumbnailerResult};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use log::info;
use std::io::Cursor;
use std::path::Path;

/// What `canvas.toDataURL('image/jpeg', ..)` puts in front of the payload.
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Strip the JPEG data-URL prefix and decode the base64 payload.
pub fn decode_jpeg_data_url(data_url: &str) -> Result<Vec<u8>, OutputError> {
    let payload = data_url.strip_prefix(JPEG_DATA_URL_PREFIX).ok_or_else(|| {
        // An empty canvas exports as "data:,"
        let head: String = data_url.chars().take(32).collect();
        OutputError::new(format!("Canvas export is not a JPEG data URL: {:?}", head))
    })?;

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| OutputError::new(format!("Invalid base64 in canvas export: {}", e)))
}

/// Check the SOI marker at the start and the EOI marker at the end.
pub fn validate_jpeg(bytes: &[u8]) -> Result<(), OutputError> {
    if bytes.len() < 4 {
        return Err(OutputError::new(format!(
            "JPEG too short: {} bytes",
            bytes.len()
        )));
    }
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return Err(OutputError::new("Missing JPEG start-of-image marker"));
    }
    if !bytes.ends_with(&[0xFF, 0xD9]) {
        return Err(OutputError::new("Missing JPEG end-of-image marker"));
    }
    Ok(())
}

/// Pixel dimensions from the JPEG header.
pub fn jpeg_dimensions(bytes: &[u8]) -> Result<(u32, u32), OutputError> {
    let mut reader = image::io::Reader::new(Cursor::new(bytes));
    reader.set_format(ImageFormat::Jpeg);
    reader
        .into_dimensions()
        .map_err(|e| OutputError::new(format!("Unreadable JPEG header: {}", e)))
}

/// Decode a canvas export and write it to `path`, replacing any existing file.
pub async fn write_thumbnail<P: AsRef<Path>>(
    data_url: &str,
    path: P,
) -> ThumbnailerResult<ThumbnailData> {
    let path = path.as_ref();
    let bytes = decode_jpeg_data_url(data_url)?;
    validate_jpeg(&bytes)?;
    let (width, height) = jpeg_dimensions(&bytes)?;

    tokio::fs::write(path, &bytes).await.map_err(|e| {
        OutputError::new(format!("Failed to write {}: {}", path.display(), e))
    })?;
    info!(
        "💾 Wrote {} bytes ({}x{}) to {}",
        bytes.len(),
        width,
        height,
        path.display()
    );

    Ok(ThumbnailData {
        path: path.to_path_buf(),
        width,
        height,
        size: bytes.len(),
    })
}
