mod types;
mod writer;


pub use types::ThumbnailData;
pub use writer::{
    decode_jpeg_data_url, jpeg_dimensions, validate_jpeg, write_thumbnail, JPEG_DATA_URL_PREFIX,
};
