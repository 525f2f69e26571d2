use super::{BrowserLauncher, BrowserPage, BrowserSession, LaunchError, LaunchOptions};
use crate::errors::BrowserError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use log::{debug, info, warn};
use std::io;
use tokio::task::JoinHandle;

/// Launches Chromium/Chrome through the DevTools protocol.
#[derive(Debug, Default, Clone)]
pub struct ChromiumLauncher;

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>, LaunchError> {
        let mut builder = BrowserConfig::builder().args(options.args());
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        // Only fails when no executable can be located.
        let config = builder
            .build()
            .map_err(|e| LaunchError::Unavailable(BrowserError::new(e)))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| match &e {
            CdpError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                LaunchError::Unavailable(BrowserError::new(e.to_string()))
            }
            _ => LaunchError::Failed(BrowserError::new(format!(
                "Failed to launch browser: {}",
                e
            ))),
        })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("DevTools handler: {}", e);
                }
            }
        });

        info!("🧭 Launched headless browser");
        Ok(Box::new(ChromiumSession {
            browser,
            handler_task: Some(handler_task),
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler_task: Option<JoinHandle<()>>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn new_page(&mut self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::new(format!("Failed to open page: {}", e)))?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        let Some(handler_task) = self.handler_task.take() else {
            return Ok(());
        };

        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::new(format!("Failed to close browser: {}", e)));
        reap(&mut self.browser, &closed).await;
        handler_task.abort();
        closed
    }
}

/// The child process behind a browser connection.
#[async_trait]
pub(super) trait BrowserProcess: Send {
    async fn kill(&mut self) -> io::Result<()>;
    async fn wait(&mut self) -> io::Result<()>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn kill(&mut self) -> io::Result<()> {
        Browser::kill(self).await.unwrap_or(Ok(()))
    }

    async fn wait(&mut self) -> io::Result<()> {
        Browser::wait(self).await.map(|_| ())
    }
}

/// Wait for the browser process to exit. If the polite close failed the
/// process may still be running, so it is killed first.
pub(super) async fn reap<P: BrowserProcess + ?Sized>(
    process: &mut P,
    closed: &Result<(), BrowserError>,
) {
    if closed.is_err() {
        if let Err(e) = process.kill().await {
            warn!("Failed to kill browser process: {}", e);
        }
    }
    if let Err(e) = process.wait().await {
        warn!("Browser process did not exit cleanly: {}", e);
    }
}

struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn set_content(&self, html: &str) -> Result<(), BrowserError> {
        self.page
            .set_content(html)
            .await
            .map_err(|e| BrowserError::new(format!("Failed to set page content: {}", e)))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError> {
        let params = EvaluateParams::builder()
            .expression(script)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(BrowserError::new)?;

        let result = self
            .page
            .evaluate_expression(params)
            .await
            .map_err(|e| BrowserError::new(format!("Script evaluation failed: {}", e)))?;

        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }
}
