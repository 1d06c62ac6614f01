use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::LibraryError;
use crate::model::{Image, PixelLayout};

/// Text chunk key used for the optional metadata string.
pub const METADATA_KEY: &str = "metadata";

fn compression_for_level(level: u8) -> png::DeflateCompression {
    match level {
        0 => png::DeflateCompression::NoCompression,
        n => png::DeflateCompression::Level(n.min(9)),
    }
}

/// Writes an 8-bit PNG. Latin-1 metadata goes into a `tEXt` chunk, anything else into `iTXt`.
pub fn write_png(
    path: &Path,
    image: &Image,
    compression: u8,
    metadata: Option<&str>,
) -> Result<(), LibraryError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(match image.layout {
        PixelLayout::Rgb8 => png::ColorType::Rgb,
        PixelLayout::Rgba8 => png::ColorType::Rgba,
    });
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_deflate_compression(compression_for_level(compression));

    if let Some(text) = metadata {
        if text.chars().all(|c| (c as u32) < 0x100) {
            encoder.add_text_chunk(METADATA_KEY.to_string(), text.to_string())?;
        } else {
            encoder.add_itxt_chunk(METADATA_KEY.to_string(), text.to_string())?;
        }
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.data)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_text_chunks(path: &Path) -> Vec<(String, String)> {
        let decoder = png::Decoder::new(std::io::BufReader::new(File::open(path).unwrap()));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        let mut chunks: Vec<(String, String)> = info
            .uncompressed_latin1_text
            .iter()
            .map(|c| (c.keyword.clone(), c.text.clone()))
            .collect();
        for chunk in &info.utf8_text {
            chunks.push((chunk.keyword.clone(), chunk.get_text().unwrap()));
        }
        chunks
    }

    #[test]
    fn metadata_lands_in_text_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.png");
        let image = Image::new(1, 1, PixelLayout::Rgba8, vec![10, 20, 30, 40]);

        write_png(&path, &image, 9, Some("seed=42")).unwrap();

        let chunks = read_text_chunks(&path);
        assert_eq!(chunks, vec![("metadata".to_string(), "seed=42".to_string())]);
        let back = image::open(&path).unwrap().into_rgba8();
        assert_eq!(back.into_raw(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn non_latin_metadata_uses_itxt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.png");
        let image = Image::new(1, 1, PixelLayout::Rgb8, vec![0, 0, 0]);

        write_png(&path, &image, 0, Some("猫")).unwrap();

        assert_eq!(
            read_text_chunks(&path),
            vec![("metadata".to_string(), "猫".to_string())]
        );
    }

    #[test]
    fn compression_level_is_a_zlib_level() {
        let dir = tempfile::tempdir().unwrap();
        let (width, height) = (64u32, 64u32);
        let mut state: u32 = 0x1234_5678;
        let data: Vec<u8> = (0..width * height * 3)
            .map(|i| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                if i % 7 == 0 { (state >> 24) as u8 } else { (i / 96) as u8 }
            })
            .collect();
        let raw_len = data.len() as u64;
        let image = Image::new(width, height, PixelLayout::Rgb8, data.clone());

        let sizes: Vec<u64> = (0..=9u8)
            .map(|level| {
                let path = dir.path().join(format!("level{}.png", level));
                write_png(&path, &image, level, None).unwrap();
                let back = image::open(&path).unwrap().into_rgb8();
                assert_eq!(back.into_raw(), data, "level {}", level);
                std::fs::metadata(&path).unwrap().len()
            })
            .collect();

        assert!(sizes[0] >= raw_len, "level 0 stored {} bytes", sizes[0]);
        assert!(sizes[1] < sizes[0]);
        assert!(sizes[9] <= sizes[1]);
    }
}
