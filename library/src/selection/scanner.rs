use std::path::Path;

use log::debug;

use super::natural_sort::natural_sort;
use crate::error::LibraryError;

/// Parses a comma-separated, case-insensitive extension allowlist (`"png, JPG,.webp"`).
pub fn parse_extensions(extensions: &str) -> Vec<String> {
    extensions
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn has_allowed_extension(name: &str, allowed: &[String]) -> bool {
    let lower = name.to_lowercase();
    allowed
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Lists the files directly inside `directory` whose extension is in `extensions`, in
/// natural order. The directory is re-read on every call.
///
/// An empty result is not an error; callers decide whether it is fatal.
pub fn scan(directory: &Path, extensions: &str) -> Result<Vec<String>, LibraryError> {
    if !directory.exists() {
        return Err(LibraryError::not_found(format!(
            "Folder path does not exist: {}",
            directory.display()
        )));
    }
    if !directory.is_dir() {
        return Err(LibraryError::not_found(format!(
            "Not a directory: {}",
            directory.display()
        )));
    }

    let allowed = parse_extensions(extensions);
    let entries = std::fs::read_dir(directory).map_err(|e| {
        LibraryError::not_found(format!(
            "Folder is not readable: {} ({})",
            directory.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!("scan: skipping non UTF-8 file name in {}", directory.display());
            continue;
        };
        if has_allowed_extension(&name, &allowed) {
            files.push(name);
        }
    }

    natural_sort(&mut files);
    debug!(
        "scan: {} matching file(s) in {}",
        files.len(),
        directory.display()
    );
    Ok(files)
}
