//! Image decoding, encoding and output file naming.

pub mod exporters;
pub mod image_loader;
pub mod naming;

pub use self::exporters::{EncodeOptions, ImageFileFormat, save_image};
pub use self::image_loader::load_image;
pub use self::naming::{BatchNaming, content_hash, next_counter, timestamp_token};
