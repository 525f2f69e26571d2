use std::collections::HashMap;

/// Served when the extension is not in the table.
pub const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// Extension to MIME type lookup used when serving the video.
///
/// Extensions are stored lowercased with their leading dot (`.mp4`).
/// Lookups are case-insensitive and accept the extension with or without
/// the dot. This is a name-based heuristic, the bytes are never sniffed.
#[derive(Debug, Clone, PartialEq)]
pub struct MimeTable {
    entries: HashMap<String, String>,
    fallback: String,
}

impl Default for MimeTable {
    fn default() -> Self {
        let entries = [
            (".mp4", "video/mp4"),
            (".webm", "video/webm"),
            (".ogg", "video/ogg"),
            (".mov", "video/quicktime"),
        ]
        .into_iter()
        .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
        .collect();

        Self {
            entries,
            fallback: DEFAULT_VIDEO_MIME.to_string(),
        }
    }
}

impl MimeTable {
    /// Table with no entries, everything maps to `fallback`.
    pub fn empty(fallback: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Add or replace the MIME type for an extension.
    pub fn insert(&mut self, extension: &str, mime_type: impl Into<String>) {
        self.entries
            .insert(normalize_extension(extension), mime_type.into());
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolve the MIME type for an extension, falling back to the default type.
    pub fn lookup(&self, extension: &str) -> &str {
        self.entries
            .get(&normalize_extension(extension))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    /// Parse an `ext=type` pair, as given on the command line.
    pub fn parse_entry(entry: &str) -> Option<(String, String)> {
        let (ext, mime) = entry.split_once('=')?;
        let (ext, mime) = (ext.trim(), mime.trim());
        if ext.trim_start_matches('.').is_empty() || mime.is_empty() {
            return None;
        }
        Some((normalize_extension(ext), mime.to_string()))
    }
}

/// `MP4`, `.Mp4` and `.mp4` all become `.mp4`. Empty stays empty.
pub(crate) fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return String::new();
    }
    format!(".{}", trimmed.to_lowercase())
}
