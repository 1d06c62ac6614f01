//! Nodes that load images from disk.

pub mod path_loader;
pub mod sequential;

pub use self::path_loader::ImagePathLoaderPlugin;
pub use self::sequential::SequentialImageLoaderPlugin;
