use crate::browser::LaunchOptions;
use crate::errors::ConfigError;
use crate::source::MimeTable;
use std::path::PathBuf;
use std::time::Duration;

/// Longest wait for the first frame, counted from the start of the capture session.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How often recorded page events are collected.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Quality handed to `canvas.toDataURL`.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.95;

/// Settings for one thumbnail run.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub jpeg_quality: f32,
    pub mime_table: MimeTable,
    pub launch: LaunchOptions,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            mime_table: MimeTable::default(),
            launch: LaunchOptions::default(),
        }
    }
}

impl ThumbnailOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_jpeg_quality(mut self, jpeg_quality: f32) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    pub fn with_mime_table(mut self, mime_table: MimeTable) -> Self {
        self.mime_table = mime_table;
        self
    }

    pub fn with_browser_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.launch.executable = Some(executable.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.launch.headless = headless;
        self
    }

    /// Reject settings the capture cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.jpeg_quality > 0.0 && self.jpeg_quality <= 1.0) {
            return Err(ConfigError::new(format!(
                "JPEG quality must be in (0, 1], got {}",
                self.jpeg_quality
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::new("timeout must be greater than zero"));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::new("poll interval must be greater than zero"));
        }
        Ok(())
    }
}
