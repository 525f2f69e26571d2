//! Orchestration of one thumbnail run.
//!
//! The sequence is strictly serial: load the video, serve it, launch the
//! browser, capture, write. The content server is stopped on every exit path
//! and the browser is closed on every path once it has been launched.

use crate::browser::{BrowserLauncher, BrowserSession, ChromiumLauncher, LaunchError};
use crate::capture::FrameExtractor;
use crate::config::ThumbnailOptions;
use crate::errors::{ThumbnailerError, ThumbnailerResult};
use crate::output::{write_thumbnail, ThumbnailData};
use crate::server::ContentServer;
use crate::source::VideoSource;
use log::{error, info, warn};
use std::path::Path;

pub struct Thumbnailer<L: BrowserLauncher = ChromiumLauncher> {
    launcher: L,
    options: ThumbnailOptions,
}

impl Thumbnailer<ChromiumLauncher> {
    pub fn new(options: ThumbnailOptions) -> Self {
        Self::with_launcher(ChromiumLauncher::new(), options)
    }
}

impl<L: BrowserLauncher> Thumbnailer<L> {
    pub fn with_launcher(launcher: L, options: ThumbnailOptions) -> Self {
        Self { launcher, options }
    }

    pub fn options(&self) -> &ThumbnailOptions {
        &self.options
    }

    /// Write the first frame of `video` to `output` as a JPEG.
    pub async fn generate<V: AsRef<Path>, O: AsRef<Path>>(
        &self,
        video: V,
        output: O,
    ) -> ThumbnailerResult<ThumbnailData> {
        let result = self.run(video.as_ref(), output.as_ref()).await;
        if let Err(err) = &result {
            report_error(err);
        }
        result
    }

    async fn run(&self, video: &Path, output: &Path) -> ThumbnailerResult<ThumbnailData> {
        self.options.validate()?;

        info!("📹 Reading video: {}", video.display());
        let source = VideoSource::load(video, &self.options.mime_table).await?;
        info!("🖼️  Generating thumbnail with Canvas: {}", output.display());

        let extension = source.extension().to_string();
        let mut server = ContentServer::start(source).await?;
        let url = server.resource_url(&extension);
        info!("🌐 Temporary server: {}", url);

        let result = self.capture_to_file(&url, output).await;

        server.print_stats();
        server.stop();
        server.join().await;
        info!("🛑 Temporary server stopped");

        if let Ok(thumbnail) = &result {
            info!("✅ Thumbnail successfully created: {}", thumbnail.path.display());
        }
        result
    }

    async fn capture_to_file(&self, url: &str, output: &Path) -> ThumbnailerResult<ThumbnailData> {
        let mut session = self
            .launcher
            .launch(&self.options.launch)
            .await
            .map_err(|e| match e {
                LaunchError::Unavailable(e) => ThumbnailerError::BrowserUnavailable(e),
                LaunchError::Failed(e) => ThumbnailerError::Browser(e),
            })?;

        let result = self.capture_in_session(session.as_mut(), url, output).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser: {}", e);
        }
        result
    }

    async fn capture_in_session(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        output: &Path,
    ) -> ThumbnailerResult<ThumbnailData> {
        let page = session.new_page().await?;
        let frame = FrameExtractor::new(&self.options)
            .extract(page.as_ref(), url)
            .await?;

        let thumbnail = write_thumbnail(&frame.data_url, output).await?;
        if let Some((width, height)) = frame.dimensions {
            if (width, height) != (thumbnail.width, thumbnail.height) {
                warn!(
                    "Thumbnail is {}x{} but the video reported {}x{}",
                    thumbnail.width, thumbnail.height, width, height
                );
            }
        }
        Ok(thumbnail)
    }
}

fn report_error(err: &ThumbnailerError) {
    match err {
        ThumbnailerError::BrowserUnavailable(_) => {
            error!("❌ Chromium is not installed!");
            error!("📦 Install it with your package manager (e.g. `apt install chromium`) or set FIRSTFRAME_CHROME");
        }
        _ => error!("❌ Error: {}", err),
    }
}
