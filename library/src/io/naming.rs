//! Output file names for the image savers.

use std::path::Path;

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

use crate::error::LibraryError;
use crate::model::Image;
use crate::util::{TemplateValue, render_template};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn timestamp_token(now: &DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns one past the highest `NNNN` among files named `{base}_NNNN.{extension}` in `dir`,
/// or 0 when there are none. A missing directory counts as empty.
pub fn next_counter(dir: &Path, base: &str, extension: &str) -> Result<u64, LibraryError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let prefix = format!("{}_", base);
    let suffix = format!(".{}", extension);
    let mut highest: Option<u64> = None;

    for entry in entries {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(middle) = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(&suffix))
        else {
            continue;
        };
        if middle.is_empty() || !middle.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(n) = middle.parse::<u64>() {
            highest = Some(highest.map_or(n, |h| h.max(n)));
        }
    }

    Ok(highest.map_or(0, |h| h + 1))
}

/// First 8 hex digits of the SHA-256 of the pixel buffer.
pub fn content_hash(image: &Image) -> String {
    let digest = Sha256::digest(&image.data);
    digest
        .iter()
        .take(4)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// File naming scheme of the batch saver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchNaming {
    Index,
    Hash,
    TimestampIndex,
    Custom(String),
}

impl BatchNaming {
    pub const NAMES: [&'static str; 4] = ["index", "hash", "timestamp_index", "custom"];

    pub fn parse(name: &str, custom_pattern: &str) -> Result<Self, LibraryError> {
        match name {
            "index" => Ok(BatchNaming::Index),
            "hash" => Ok(BatchNaming::Hash),
            "timestamp_index" => Ok(BatchNaming::TimestampIndex),
            "custom" => Ok(BatchNaming::Custom(custom_pattern.to_string())),
            other => Err(LibraryError::invalid_argument(format!(
                "unknown naming pattern '{}'",
                other
            ))),
        }
    }

    /// File stem for the `index`-th image (0-based) of a batch.
    pub fn file_stem(
        &self,
        base: &str,
        index: usize,
        timestamp: &str,
        image: &Image,
    ) -> Result<String, LibraryError> {
        let stem = match self {
            BatchNaming::Index => format!("{}_{:04}", base, index),
            BatchNaming::Hash => format!("{}_{}", base, content_hash(image)),
            BatchNaming::TimestampIndex => format!("{}_{}_{:04}", base, timestamp, index),
            BatchNaming::Custom(pattern) => render_template(
                pattern,
                &[
                    ("base", TemplateValue::from(base)),
                    ("index", TemplateValue::from(index as i64)),
                    ("timestamp", TemplateValue::from(timestamp)),
                    ("hash", TemplateValue::from(content_hash(image))),
                ],
            )?,
        };
        Ok(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PixelLayout;
    use chrono::TimeZone;

    #[test]
    fn counter_skips_unrelated_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "shot_0000.png",
            "shot_0007.png",
            "shot_0009.jpg",
            "shot_final.png",
            "shot_.png",
            "other_0042.png",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        assert_eq!(next_counter(dir.path(), "shot", "png").unwrap(), 8);
        assert_eq!(next_counter(dir.path(), "shot", "jpg").unwrap(), 10);
        assert_eq!(next_counter(dir.path(), "none", "png").unwrap(), 0);
        assert_eq!(next_counter(&dir.path().join("missing"), "shot", "png").unwrap(), 0);
    }

    #[test]
    fn batch_stems() {
        let image = Image::new(1, 1, PixelLayout::Rgb8, vec![1, 2, 3]);
        let ts = timestamp_token(&Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap());
        assert_eq!(ts, "20240305_070809");

        assert_eq!(
            BatchNaming::Index.file_stem("b", 3, &ts, &image).unwrap(),
            "b_0003"
        );
        assert_eq!(
            BatchNaming::TimestampIndex.file_stem("b", 12, &ts, &image).unwrap(),
            "b_20240305_070809_0012"
        );
        let hashed = BatchNaming::Hash.file_stem("b", 0, &ts, &image).unwrap();
        assert_eq!(hashed.len(), "b_".len() + 8);
        assert_eq!(hashed, format!("b_{}", content_hash(&image)));

        let custom = BatchNaming::parse("custom", "{index:03d}-{base}").unwrap();
        assert_eq!(custom.file_stem("b", 5, &ts, &image).unwrap(), "005-b");
        let custom = BatchNaming::parse("custom", "{hash}_{timestamp}").unwrap();
        assert_eq!(
            custom.file_stem("b", 0, &ts, &image).unwrap(),
            format!("{}_20240305_070809", content_hash(&image))
        );
        let broken = BatchNaming::parse("custom", "{frame}").unwrap();
        assert!(broken.file_stem("b", 5, &ts, &image).is_err());
    }

    #[test]
    fn hash_depends_on_pixels() {
        let a = Image::new(1, 1, PixelLayout::Rgb8, vec![1, 2, 3]);
        let b = Image::new(1, 1, PixelLayout::Rgb8, vec![1, 2, 4]);
        assert_ne!(content_hash(&a), content_hash(&b));
        assert_eq!(content_hash(&a), content_hash(&a.clone()));
    }
}
