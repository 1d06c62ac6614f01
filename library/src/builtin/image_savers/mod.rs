//! Nodes that write image batches to disk.

pub mod batch_saver;
pub mod image_saver;

pub use self::batch_saver::BatchImageSaverPlugin;
pub use self::image_saver::ImageSaverPlugin;
