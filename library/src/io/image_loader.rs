use std::path::Path;

use log::debug;

use crate::error::LibraryError;
use crate::model::Image;

/// Decodes the file at `path`. RGBA sources stay RGBA, everything else becomes RGB8.
pub fn load_image(path: &Path) -> Result<Image, LibraryError> {
    let decoded = image::open(path)?;
    let image = Image::from_dynamic(decoded);
    debug!(
        "load_image: {} ({}x{}, {:?})",
        path.display(),
        image.width,
        image.height,
        image.layout
    );
    Ok(image)
}

/// File stem used as the `filename` output of the loaders.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
