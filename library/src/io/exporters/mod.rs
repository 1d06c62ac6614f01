//! Writing images to disk. Each format carries its own encoder settings.

mod png_export;
mod raster_export;

use std::path::Path;

use log::info;

use crate::error::LibraryError;
use crate::model::Image;

pub use self::png_export::write_png;

/// Output format selected on a saver node. `Jpg` and `Jpeg` only differ in extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFileFormat {
    Png,
    Jpg,
    Jpeg,
    Webp,
    Bmp,
    Tiff,
    Gif,
}

impl ImageFileFormat {
    pub const ALL: [ImageFileFormat; 7] = [
        ImageFileFormat::Png,
        ImageFileFormat::Jpg,
        ImageFileFormat::Jpeg,
        ImageFileFormat::Webp,
        ImageFileFormat::Bmp,
        ImageFileFormat::Tiff,
        ImageFileFormat::Gif,
    ];

    pub fn parse(name: &str) -> Result<Self, LibraryError> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == name)
            .ok_or_else(|| LibraryError::invalid_argument(format!("unknown image format '{}'", name)))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFileFormat::Png => "png",
            ImageFileFormat::Jpg => "jpg",
            ImageFileFormat::Jpeg => "jpeg",
            ImageFileFormat::Webp => "webp",
            ImageFileFormat::Bmp => "bmp",
            ImageFileFormat::Tiff => "tiff",
            ImageFileFormat::Gif => "gif",
        }
    }
}

/// Encoder settings, one variant per output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOptions {
    Png {
        /// zlib level 0-9
        compression: u8,
        /// Stored as a text chunk under the key `metadata`
        metadata: Option<String>,
    },
    Jpeg {
        /// 1-100
        quality: u8,
    },
    Webp {
        /// 1-100, lossy
        quality: u8,
    },
    Bmp,
    Tiff,
    Gif,
}

impl EncodeOptions {
    /// Builds the settings a saver node asks for. `metadata` only survives for PNG.
    pub fn for_format(
        format: ImageFileFormat,
        quality: u8,
        png_compression: u8,
        metadata: Option<&str>,
    ) -> Self {
        match format {
            ImageFileFormat::Png => EncodeOptions::Png {
                compression: png_compression.min(9),
                metadata: metadata
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
            },
            ImageFileFormat::Jpg | ImageFileFormat::Jpeg => EncodeOptions::Jpeg {
                quality: quality.clamp(1, 100),
            },
            ImageFileFormat::Webp => EncodeOptions::Webp {
                quality: quality.clamp(1, 100),
            },
            ImageFileFormat::Bmp => EncodeOptions::Bmp,
            ImageFileFormat::Tiff => EncodeOptions::Tiff,
            ImageFileFormat::Gif => EncodeOptions::Gif,
        }
    }
}

pub fn save_image(path: &Path, image: &Image, options: &EncodeOptions) -> Result<(), LibraryError> {
    let expected = image.width as usize * image.height as usize * image.layout.channels();
    if image.data.len() != expected {
        return Err(LibraryError::invalid_argument(format!(
            "image buffer holds {} bytes, {}x{} {:?} needs {}",
            image.data.len(),
            image.width,
            image.height,
            image.layout,
            expected
        )));
    }

    match options {
        EncodeOptions::Png {
            compression,
            metadata,
        } => write_png(path, image, *compression, metadata.as_deref())?,
        EncodeOptions::Jpeg { quality } => raster_export::write_jpeg(path, image, *quality)?,
        EncodeOptions::Webp { quality } => raster_export::write_webp(path, image, *quality)?,
        EncodeOptions::Bmp => raster_export::write_with_format(path, image, image::ImageFormat::Bmp)?,
        EncodeOptions::Tiff => raster_export::write_with_format(path, image, image::ImageFormat::Tiff)?,
        EncodeOptions::Gif => raster_export::write_with_format(path, image, image::ImageFormat::Gif)?,
    }
    info!("save_image: wrote {}", path.display());
    Ok(())
}
