use super::script::{install_script, CAPTURE_DOCUMENT, DRAIN_EVENTS_SCRIPT};
use super::state::{CaptureState, CapturedFrame, FrameEvent};
use crate::browser::BrowserPage;
use crate::config::ThumbnailOptions;
use crate::errors::{CaptureError, ThumbnailerResult};
use log::{debug, info};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Captures the frame at position zero of a served video inside a browser page.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    timeout: Duration,
    poll_interval: Duration,
    jpeg_quality: f32,
}

impl FrameExtractor {
    pub fn new(options: &ThumbnailOptions) -> Self {
        Self {
            timeout: options.timeout,
            poll_interval: options.poll_interval,
            jpeg_quality: options.jpeg_quality,
        }
    }

    /// Load `source_url` into the page and return the JPEG data URL of its
    /// first frame.
    ///
    /// The whole session, document setup included, is bounded by the
    /// configured timeout.
    pub async fn extract(
        &self,
        page: &dyn BrowserPage,
        source_url: &str,
    ) -> ThumbnailerResult<CapturedFrame> {
        // An unrepresentable deadline waits forever instead of overflowing.
        match timeout(self.timeout, self.capture(page, source_url)).await {
            Ok(result) => result,
            Err(_) => Err(CaptureError::Timeout(self.timeout).into()),
        }
    }

    async fn capture(
        &self,
        page: &dyn BrowserPage,
        source_url: &str,
    ) -> ThumbnailerResult<CapturedFrame> {
        page.set_content(CAPTURE_DOCUMENT).await?;
        page.evaluate(&install_script(source_url, self.jpeg_quality))
            .await?;
        debug!("Capture handlers installed for {}", source_url);

        let mut state = CaptureState::default();
        loop {
            for event in self.drain_events(page).await? {
                state.apply(event);
            }

            match state {
                CaptureState::Resolved(frame) => {
                    if let Some((width, height)) = frame.dimensions {
                        info!("🎞️  Captured frame {}x{}", width, height);
                    }
                    return Ok(frame);
                }
                CaptureState::Failed(err) => return Err(err.into()),
                _ => {}
            }

            sleep(self.poll_interval).await;
        }
    }

    async fn drain_events(&self, page: &dyn BrowserPage) -> ThumbnailerResult<Vec<FrameEvent>> {
        let raw = page.evaluate(DRAIN_EVENTS_SCRIPT).await?;
        if raw.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(raw).map_err(|e| {
            CaptureError::Script(format!("Unreadable capture events: {}", e)).into()
        })
    }
}
