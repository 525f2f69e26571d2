mod mime;
mod video;

#[cfg(test)]
mod unit_test;

pub use mime::{MimeTable, DEFAULT_VIDEO_MIME};
pub use video::VideoSource;
