use std::path::PathBuf;

/// A thumbnail written to disk
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThumbnailData {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}
