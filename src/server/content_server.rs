use crate::errors::{ServerError, ThumbnailerResult};
use crate::source::VideoSource;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Router;
use log::{debug, info, warn};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct ServedVideo {
    source: VideoSource,
    request_count: AtomicU64,
}

/// A loopback listener serving one video for the lifetime of a run.
///
/// Dropping the server stops it, so the port is released on every exit path.
pub struct ContentServer {
    addr: SocketAddr,
    served: Arc<ServedVideo>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ContentServer {
    /// Bind `127.0.0.1` on an OS-assigned port and start answering requests.
    pub async fn start(source: VideoSource) -> ThumbnailerResult<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .map_err(|e| ServerError::new(format!("Failed to bind content server: {}", e)))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::new(format!("Failed to read bound address: {}", e)))?;

        let served = Arc::new(ServedVideo {
            source,
            request_count: AtomicU64::new(0),
        });
        let app = Router::new()
            .fallback(serve_video)
            .with_state(Arc::clone(&served));

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                warn!("Content server stopped with error: {}", e);
            }
        });

        debug!("Content server bound to {}", addr);
        Ok(Self {
            addr,
            served,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// URL the browser should load, e.g. `http://127.0.0.1:41234/video.mp4`.
    ///
    /// The path is cosmetic, any path returns the same bytes.
    pub fn resource_url(&self, extension: &str) -> String {
        format!("http://{}/video{}", self.addr, extension)
    }

    /// Number of requests answered so far.
    pub fn request_count(&self) -> u64 {
        self.served.request_count.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Stop accepting connections. Returns `true` only for the call that
    /// actually stopped the server; later calls are no-ops.
    pub fn stop(&mut self) -> bool {
        let Some(shutdown) = self.shutdown.take() else {
            return false;
        };
        let _ = shutdown.send(());
        if let Some(task) = &self.task {
            // In-flight video transfers are not worth waiting for.
            task.abort();
        }
        true
    }

    /// Wait until the listener task has exited and the port is free.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Content server task failed: {}", e);
                }
            }
        }
    }

    /// Log serving statistics.
    pub fn print_stats(&self) {
        info!(
            "📊 Served {} request(s), {} bytes each ({})",
            self.request_count(),
            self.served.source.len(),
            self.served.source.mime_type()
        );
    }
}

impl Drop for ContentServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn serve_video(State(served): State<Arc<ServedVideo>>) -> impl IntoResponse {
    served.request_count.fetch_add(1, Ordering::Relaxed);
    debug!(
        "Serving {} bytes as {}",
        served.source.len(),
        served.source.mime_type()
    );
    (
        [
            (CONTENT_TYPE, served.source.mime_type().to_string()),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        ],
        served.source.bytes().clone(),
    )
}
