//! Text grouping, saving and appending nodes.

pub mod appender;
pub mod counter;
pub mod extractor;
pub mod multi_saver;
pub mod saver;

use std::path::Path;

use log::warn;

use crate::error::LibraryError;
use crate::text::groups::normalize_newlines;
use crate::text::{Group, LoadMode, extract, group_titles};

pub use self::appender::TextAppenderPlugin;
pub use self::counter::{DialogueGroupCounterPlugin, TextLoadCounterPlugin};
pub use self::extractor::{DialogueExtractorPlugin, TextLoadPlugin};
pub use self::multi_saver::MultiTextSaverPlugin;
pub use self::saver::TextSaverPlugin;

const FILE_NOT_FOUND: &str = "File not found";

/// `None` when the file does not exist.
fn read_source(file_path: &str) -> Result<Option<String>, LibraryError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    Ok(Some(normalize_newlines(&text)))
}

fn read_error_message(err: &LibraryError) -> String {
    format!("Error reading file: {}", err)
}

/// Group `index` of the file, or a message in every slot when it cannot be produced.
pub(crate) fn extract_from_file(file_path: &str, mode: &LoadMode, index: i64) -> Group {
    let result = read_source(file_path).and_then(|text| match text {
        Some(text) => extract(&text, mode, index),
        None => Ok(Group::message(FILE_NOT_FOUND)),
    });
    result.unwrap_or_else(|e| {
        warn!("group extraction from {}: {}", file_path, e);
        Group::message(read_error_message(&e))
    })
}

/// Group count and `"{i}: {title}"` listing, or `(0, message)`.
pub(crate) fn count_in_file(file_path: &str, mode: &LoadMode) -> (usize, String) {
    let result = read_source(file_path).and_then(|text| match text {
        Some(text) => group_titles(&text, mode).map(|titles| (titles.len(), titles.join("\n"))),
        None => Ok((0, FILE_NOT_FOUND.to_string())),
    });
    result.unwrap_or_else(|e| {
        warn!("group count for {}: {}", file_path, e);
        (0, read_error_message(&e))
    })
}
