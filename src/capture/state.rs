use crate::errors::CaptureError;
use log::{debug, warn};
use serde::Deserialize;

/// Something the page observed on the video element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FrameEvent {
    Metadata {
        width: u32,
        height: u32,
    },
    /// The seek to zero finished. `data_url` is only set for the first one.
    Seeked {
        #[serde(rename = "dataUrl")]
        data_url: Option<String>,
    },
    LoadError {
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CaptureState {
    #[default]
    WaitingForMetadata,
    WaitingForSeek { width: u32, height: u32 },
    Resolved(CapturedFrame),
    Failed(CaptureError),
}

/// Canvas export of the frame at position zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub data_url: String,
    /// Video dimensions, when metadata was seen first.
    pub dimensions: Option<(u32, u32)>,
}

impl CaptureState {
    /// `Resolved` and `Failed` are terminal.
    pub fn is_settled(&self) -> bool {
        matches!(self, CaptureState::Resolved(_) | CaptureState::Failed(_))
    }

    /// Advance on one event. Events after settling are ignored, so a frame
    /// is resolved at most once.
    pub fn apply(&mut self, event: FrameEvent) {
        if self.is_settled() {
            debug!("Ignoring {} after capture settled", event_name(&event));
            return;
        }

        let next = match (&*self, event) {
            (_, FrameEvent::LoadError { message }) => {
                CaptureState::Failed(CaptureError::LoadFailed(message))
            }
            (_, FrameEvent::Error { message }) => CaptureState::Failed(CaptureError::Script(message)),
            (CaptureState::WaitingForMetadata, FrameEvent::Metadata { width, height }) => {
                debug!("Video metadata: {}x{}", width, height);
                CaptureState::WaitingForSeek { width, height }
            }
            (CaptureState::WaitingForSeek { .. }, FrameEvent::Metadata { width, height }) => {
                warn!("Repeated metadata event ({}x{})", width, height);
                CaptureState::WaitingForSeek { width, height }
            }
            (state, FrameEvent::Seeked { data_url: Some(data_url) }) => {
                let dimensions = match state {
                    CaptureState::WaitingForSeek { width, height } => Some((*width, *height)),
                    _ => None,
                };
                CaptureState::Resolved(CapturedFrame {
                    data_url,
                    dimensions,
                })
            }
            (state, FrameEvent::Seeked { data_url: None }) => {
                debug!("Seek completed without a frame");
                state.clone()
            }
            (state, FrameEvent::Metadata { .. }) => state.clone(),
        };
        *self = next;
    }
}

fn event_name(event: &FrameEvent) -> &'static str {
    match event {
        FrameEvent::Metadata { .. } => "metadata",
        FrameEvent::Seeked { .. } => "seeked",
        FrameEvent::LoadError { .. } => "loadError",
        FrameEvent::Error { .. } => "error",
    }
}
