pub mod browser;
pub use browser::{
    BrowserLauncher, BrowserPage, BrowserSession, ChromiumLauncher, LaunchError, LaunchOptions,
};

pub mod capture;
pub use capture::{CaptureState, CapturedFrame, FrameEvent, FrameExtractor};

pub mod config;
pub use config::ThumbnailOptions;

pub mod output;
pub use output::ThumbnailData;

pub mod server;
pub use server::ContentServer;

pub mod source;
pub use source::{MimeTable, VideoSource};

pub mod thumbnailer;
pub use thumbnailer::Thumbnailer;

pub mod errors;
pub use errors::{
    BrowserError, CaptureError, ConfigError, OutputError, ServerError, ThumbnailerError,
    ThumbnailerResult,
};

use std::path::Path;

/// Save the first frame of `video` as a JPEG at `output` using Chromium and
/// default settings.
pub async fn generate_thumbnail<V: AsRef<Path>, O: AsRef<Path>>(
    video: V,
    output: O,
) -> ThumbnailerResult<ThumbnailData> {
    Thumbnailer::new(ThumbnailOptions::default())
        .generate(video, output)
        .await
}

/// Same as [`generate_thumbnail`] with explicit options.
pub async fn generate_thumbnail_with<V: AsRef<Path>, O: AsRef<Path>>(
    video: V,
    output: O,
    options: ThumbnailOptions,
) -> ThumbnailerResult<ThumbnailData> {
    Thumbnailer::new(options).generate(video, output).await
}
