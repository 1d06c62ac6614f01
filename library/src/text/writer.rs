use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::LibraryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

impl WriteMode {
    pub const NAMES: [&'static str; 2] = ["overwrite", "append"];

    pub fn parse(name: &str) -> Result<Self, LibraryError> {
        match name {
            "overwrite" => Ok(WriteMode::Overwrite),
            "append" => Ok(WriteMode::Append),
            other => Err(LibraryError::invalid_argument(format!(
                "unknown write mode '{}'",
                other
            ))),
        }
    }
}

/// Trailing spacing the text saver adds after non-blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpacingType {
    /// `"\n\n"`
    EmptyLine,
    /// `"\n\n\n"`
    DoubleLine,
    Custom(String),
}

impl SpacingType {
    pub const NAMES: [&'static str; 3] = ["empty_line", "double_line", "custom"];

    pub fn parse(name: &str, custom_separator: &str) -> Result<Self, LibraryError> {
        match name {
            "empty_line" => Ok(SpacingType::EmptyLine),
            "double_line" => Ok(SpacingType::DoubleLine),
            "custom" => Ok(SpacingType::Custom(custom_separator.to_string())),
            other => Err(LibraryError::invalid_argument(format!(
                "unknown spacing type '{}'",
                other
            ))),
        }
    }

    pub fn suffix(&self) -> &str {
        match self {
            SpacingType::EmptyLine => "\n\n",
            SpacingType::DoubleLine => "\n\n\n",
            SpacingType::Custom(separator) => separator,
        }
    }

    /// `text` followed by the spacing, or `text` unchanged when it is blank.
    pub fn apply(&self, text: &str) -> String {
        if text.trim().is_empty() {
            text.to_string()
        } else {
            format!("{}{}", text, self.suffix())
        }
    }
}

/// Writes UTF-8 `content` to `path`, creating parent directories first.
pub fn write_text(path: &Path, content: &str, mode: WriteMode) -> Result<(), LibraryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = match mode {
        WriteMode::Overwrite => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
        WriteMode::Append => OpenOptions::new().append(true).create(true).open(path)?,
    };
    file.write_all(content.as_bytes())?;

    info!(
        "write_text: {} {} byte(s) to {}",
        match mode {
            WriteMode::Overwrite => "wrote",
            WriteMode::Append => "appended",
        },
        content.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_skipped_for_blank_text() {
        assert_eq!(SpacingType::EmptyLine.apply("hi"), "hi\n\n");
        assert_eq!(SpacingType::DoubleLine.apply("hi"), "hi\n\n\n");
        assert_eq!(SpacingType::Custom("--".into()).apply("hi"), "hi--");
        assert_eq!(SpacingType::EmptyLine.apply("  \n"), "  \n");
    }

    #[test]
    fn overwrite_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_text(&path, "one", WriteMode::Overwrite).unwrap();
        write_text(&path, "two", WriteMode::Append).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "onetwo");

        write_text(&path, "three", WriteMode::Overwrite).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "three");
    }
}
