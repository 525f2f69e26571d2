mod extractor;
mod script;
mod state;


pub use extractor::FrameExtractor;
pub use script::{install_script, CAPTURE_DOCUMENT, DRAIN_EVENTS_SCRIPT};
pub use state::{CaptureState, CapturedFrame, FrameEvent};
