//! Headless browser capability.
//!
//! The capture logic only talks to these traits, so it can run against a fake
//! page in tests. [`ChromiumLauncher`] drives a real Chromium over the
//! DevTools protocol.

mod chromium;
mod options;


pub use chromium::ChromiumLauncher;
pub use options::{LaunchOptions, DEFAULT_BROWSER_ARGS};

use crate::errors::BrowserError;
use async_trait::async_trait;

/// Starts isolated browser instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch a browser. A missing executable must be reported as
    /// [`LaunchError::Unavailable`] so callers can print install instructions.
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>, LaunchError>;
}

/// One running browser process.
#[async_trait]
pub trait BrowserSession: Send {
    async fn new_page(&mut self) -> Result<Box<dyn BrowserPage>, BrowserError>;

    /// Terminate the browser. Calling it again is a no-op.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// One tab in a [`BrowserSession`].
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Replace the document with `html`.
    async fn set_content(&self, html: &str) -> Result<(), BrowserError>;

    /// Evaluate a JavaScript expression, awaiting it if it is a promise, and
    /// return its value as JSON.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError>;
}

#[derive(Debug)]
pub enum LaunchError {
    /// No browser executable could be found or spawned.
    Unavailable(BrowserError),
    Failed(BrowserError),
}
