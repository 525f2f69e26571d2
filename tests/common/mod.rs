use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use firstframe::capture::DRAIN_EVENTS_SCRIPT;
use firstframe::{
    BrowserError, BrowserLauncher, BrowserPage, BrowserSession, LaunchError, LaunchOptions,
};
use image::{ImageOutputFormat, Rgb, RgbImage};
use regex::Regex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the fake page reports after the video source is assigned.
#[derive(Clone)]
pub enum PageBehavior {
    /// Metadata, then a seek carrying this data URL.
    Frame { width: u32, height: u32, data_url: String },
    /// Like `Frame`, with a second redundant seek in the same batch.
    DoubleSeek { width: u32, height: u32, data_url: String },
    /// Never reports anything.
    Silent,
    LoadError(String),
}

/// Everything the fake browser observed.
#[derive(Default)]
pub struct Observed {
    pub launches: usize,
    pub closes: usize,
    pub source_urls: Vec<String>,
    pub served_content_types: Vec<String>,
    pub served_bytes: Vec<Vec<u8>>,
    pub launch_args: Vec<Vec<String>>,
}

#[derive(Clone)]
pub struct FakeLauncher {
    behavior: PageBehavior,
    pub observed: Arc<Mutex<Observed>>,
}

impl FakeLauncher {
    pub fn new(behavior: PageBehavior) -> Self {
        Self {
            behavior,
            observed: Arc::new(Mutex::new(Observed::default())),
        }
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>, LaunchError> {
        let mut observed = self.observed.lock().unwrap();
        observed.launches += 1;
        observed.launch_args.push(options.args());
        Ok(Box::new(FakeSession {
            behavior: self.behavior.clone(),
            observed: Arc::clone(&self.observed),
            closed: false,
        }))
    }
}

struct FakeSession {
    behavior: PageBehavior,
    observed: Arc<Mutex<Observed>>,
    closed: bool,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn new_page(&mut self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Ok(Box::new(FakePage {
            behavior: self.behavior.clone(),
            observed: Arc::clone(&self.observed),
            pending: Mutex::new(VecDeque::new()),
        }))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if !self.closed {
            self.closed = true;
            self.observed.lock().unwrap().closes += 1;
        }
        Ok(())
    }
}

struct FakePage {
    behavior: PageBehavior,
    observed: Arc<Mutex<Observed>>,
    pending: Mutex<VecDeque<Value>>,
}

impl FakePage {
    fn batches(&self) -> Vec<Value> {
        match &self.behavior {
            PageBehavior::Frame { width, height, data_url } => vec![
                json!([{ "type": "metadata", "width": width, "height": height }]),
                json!([{ "type": "seeked", "dataUrl": data_url }]),
            ],
            PageBehavior::DoubleSeek { width, height, data_url } => vec![json!([
                { "type": "metadata", "width": width, "height": height },
                { "type": "seeked", "dataUrl": data_url },
                { "type": "seeked", "dataUrl": "data:image/jpeg;base64,AAAA" },
            ])],
            PageBehavior::Silent => Vec::new(),
            PageBehavior::LoadError(message) => {
                vec![json!([{ "type": "loadError", "message": message }])]
            }
        }
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn set_content(&self, _html: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, BrowserError> {
        if script == DRAIN_EVENTS_SCRIPT {
            let next = self.pending.lock().unwrap().pop_front();
            return Ok(next.unwrap_or_else(|| json!([])));
        }

        // Install script: load the video the way the real element would.
        let url = Regex::new(r#"video\.src = "([^"]+)";"#)
            .unwrap()
            .captures(script)
            .map(|c| c[1].to_string())
            .ok_or_else(|| BrowserError::new("no video source in script"))?;
        let response = reqwest::get(&url)
            .await
            .map_err(|e| BrowserError::new(e.to_string()))?;
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| BrowserError::new(e.to_string()))?;

        {
            let mut observed = self.observed.lock().unwrap();
            observed.source_urls.push(url);
            observed.served_content_types.push(content_type);
            observed.served_bytes.push(body.to_vec());
        }
        self.pending.lock().unwrap().extend(self.batches());
        Ok(json!(true))
    }
}

pub fn jpeg_data_url(width: u32, height: u32) -> String {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut buffer = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageOutputFormat::Jpeg(95))
        .unwrap();
    format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(&buffer)
    )
}

/// A connection attempt to `url` is refused.
pub async fn is_unreachable(url: &str) -> bool {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();
    client.get(url).send().await.is_err()
}
