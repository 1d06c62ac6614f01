//! In-memory image representation passed between nodes.

use serde::{Deserialize, Serialize};

/// Channel layout of an [`Image`]'s pixel buffer (8 bits per channel).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// 8-bit image; `data` is row-major with `layout.channels()` bytes per pixel.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Converts a decoded image, keeping alpha only when the source has it.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        use image::DynamicImage::{ImageRgba8, ImageRgba16, ImageRgba32F};

        if matches!(img, ImageRgba8(_) | ImageRgba16(_) | ImageRgba32F(_)) {
            let rgba = img.into_rgba8();
            Self::new(rgba.width(), rgba.height(), PixelLayout::Rgba8, rgba.into_raw())
        } else {
            let rgb = img.into_rgb8();
            Self::new(rgb.width(), rgb.height(), PixelLayout::Rgb8, rgb.into_raw())
        }
    }

    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        match self.layout {
            PixelLayout::Rgb8 => {
                image::RgbImage::from_raw(self.width, self.height, self.data.clone())
                    .map(image::DynamicImage::ImageRgb8)
            }
            PixelLayout::Rgba8 => {
                image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
                    .map(image::DynamicImage::ImageRgba8)
            }
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layout", &self.layout)
            .field("bytes", &self.data.len())
            .finish()
    }
}
