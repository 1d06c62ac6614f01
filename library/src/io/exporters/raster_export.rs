use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use crate::error::LibraryError;
use crate::model::{Image, PixelLayout};

fn as_dynamic(image: &Image) -> Result<DynamicImage, LibraryError> {
    image
        .to_dynamic()
        .ok_or_else(|| LibraryError::invalid_argument("pixel buffer does not match dimensions"))
}

/// JPEG has no alpha channel, so RGBA input is flattened to RGB.
pub fn write_jpeg(path: &Path, image: &Image, quality: u8) -> Result<(), LibraryError> {
    let rgb = as_dynamic(image)?.into_rgb8();
    let mut writer = BufWriter::new(File::create(path)?);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode_image(&rgb)?;
    Ok(())
}

/// Lossy WebP at `quality` (1-100).
pub fn write_webp(path: &Path, image: &Image, quality: u8) -> Result<(), LibraryError> {
    let encoder = match image.layout {
        PixelLayout::Rgb8 => webp::Encoder::from_rgb(&image.data, image.width, image.height),
        PixelLayout::Rgba8 => webp::Encoder::from_rgba(&image.data, image.width, image.height),
    };
    let encoded = encoder.encode(f32::from(quality));
    std::fs::write(path, &*encoded)?;
    Ok(())
}

pub fn write_with_format(path: &Path, image: &Image, format: ImageFormat) -> Result<(), LibraryError> {
    let dynamic = as_dynamic(image)?;
    let dynamic = if format == ImageFormat::Gif {
        DynamicImage::ImageRgba8(dynamic.into_rgba8())
    } else {
        dynamic
    };
    dynamic.save_with_format(path, format)?;
    Ok(())
}
