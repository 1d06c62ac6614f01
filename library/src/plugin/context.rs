//! Per-evaluation context handed to nodes by the host.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    output_dir: PathBuf,
    fixed_time: Option<DateTime<Local>>,
}

impl ExecutionContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fixed_time: None,
        }
    }

    /// Pins the clock used for filename and appender timestamps.
    pub fn with_fixed_time(mut self, time: NaiveDateTime) -> Self {
        self.fixed_time = Local.from_local_datetime(&time).earliest();
        self
    }

    /// Host output root; relative save paths are joined under it.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn now(&self) -> DateTime<Local> {
        self.fixed_time.unwrap_or_else(Local::now)
    }

    /// `save_path` as given when absolute, under the output root when relative, the output
    /// root itself when blank.
    pub fn resolve_output_dir(&self, save_path: &str) -> PathBuf {
        let trimmed = save_path.trim();
        if trimmed.is_empty() {
            return self.output_dir.clone();
        }
        let path = Path::new(trimmed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }

    /// Same rule for a file path.
    pub fn resolve_file_path(&self, file_path: &str) -> PathBuf {
        let path = Path::new(file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new("output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_and_absolute_save_paths() {
        let ctx = ExecutionContext::new("/srv/out");
        assert_eq!(ctx.resolve_output_dir(""), PathBuf::from("/srv/out"));
        assert_eq!(ctx.resolve_output_dir("  "), PathBuf::from("/srv/out"));
        assert_eq!(ctx.resolve_output_dir("batch"), PathBuf::from("/srv/out/batch"));
        assert_eq!(ctx.resolve_output_dir("/tmp/abs"), PathBuf::from("/tmp/abs"));
    }

    #[test]
    fn fixed_time_is_returned() {
        let time = NaiveDateTime::parse_from_str("2025-08-17 09:30:05", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let ctx = ExecutionContext::new("out").with_fixed_time(time);
        assert_eq!(ctx.now().format("%Y%m%d_%H%M%S").to_string(), "20250817_093005");
    }
}
