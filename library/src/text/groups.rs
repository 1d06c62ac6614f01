//! Splitting a text file into groups and pulling a title out of each group.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LibraryError;

static LINE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\s*(.*)").expect("valid line title regex"));
static GROUP_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]").expect("valid group title regex"));
static BRACKET_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.*\]$").expect("valid bracket line regex"));

/// How a text file is cut into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMode {
    /// Every non-blank line is a group
    ByLine,
    /// Groups are separated by one blank line (`"\n\n"`)
    ByDoubleNewline,
    /// Groups are separated by a literal string; blank groups are dropped
    ByCustomSeparator(String),
}

impl LoadMode {
    pub const NAMES: [&'static str; 3] = ["by_line", "by_double_newline", "by_custom_separator"];

    pub fn parse(name: &str, custom_separator: &str) -> Result<Self, LibraryError> {
        match name {
            "by_line" => Ok(LoadMode::ByLine),
            "by_double_newline" => Ok(LoadMode::ByDoubleNewline),
            "by_custom_separator" => Ok(LoadMode::ByCustomSeparator(custom_separator.to_string())),
            other => Err(LibraryError::invalid_argument(format!(
                "unknown load mode '{}'",
                other
            ))),
        }
    }

    fn is_line_mode(&self) -> bool {
        matches!(self, LoadMode::ByLine)
    }
}

/// One extracted group: derived title, body without title markup, and the raw group text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub title: String,
    pub content: String,
    pub full_group: String,
}

impl Group {
    /// A message repeated in all three slots, used for user-facing soft failures.
    pub fn message(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Self {
            title: msg.clone(),
            content: msg.clone(),
            full_group: msg,
        }
    }
}

/// Converts `\r\n` line endings so files written on any platform split the same way.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

pub fn split_groups(text: &str, mode: &LoadMode) -> Result<Vec<String>, LibraryError> {
    let text = text.trim();
    let groups = match mode {
        LoadMode::ByLine => text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        LoadMode::ByDoubleNewline => text.split("\n\n").map(str::to_string).collect(),
        LoadMode::ByCustomSeparator(separator) => {
            if separator.is_empty() {
                return Err(LibraryError::invalid_argument("custom separator is empty"));
            }
            text.split(separator.as_str())
                .map(str::trim)
                .filter(|group| !group.is_empty())
                .map(str::to_string)
                .collect()
        }
    };
    Ok(groups)
}

fn line_group(line: &str, index: usize) -> Group {
    let (title, content) = if let Some(caps) = LINE_TITLE.captures(line) {
        let rest = &caps[2];
        let content = if rest.is_empty() { line } else { rest };
        (caps[1].to_string(), content.to_string())
    } else if let Some((label, rest)) = line.split_once(':') {
        (label.trim().to_string(), rest.trim().to_string())
    } else {
        (format!("Line {}", index), line.to_string())
    };
    Group {
        title,
        content,
        full_group: line.to_string(),
    }
}

fn block_group(group: &str) -> Group {
    let lines: Vec<&str> = group.trim().split('\n').collect();
    let first = lines.first().copied().unwrap_or_default();

    let title_caps = GROUP_TITLE.captures(first);
    let title = match &title_caps {
        Some(caps) => caps[1].to_string(),
        None => first.to_string(),
    };

    let mut content_lines = Vec::with_capacity(lines.len());
    for (i, &line) in lines.iter().enumerate() {
        if BRACKET_ONLY.is_match(line) {
            continue;
        }
        // "[Title] text" on the first line keeps only the text.
        if i == 0 {
            if let Some(caps) = &title_caps {
                let rest = line[caps[0].len()..].trim_start();
                if !rest.is_empty() {
                    content_lines.push(rest);
                }
                continue;
            }
        }
        content_lines.push(line);
    }

    Group {
        title,
        content: content_lines.join("\n"),
        full_group: group.to_string(),
    }
}

/// Picks group `index` out of `text`.
///
/// Out-of-range indices and texts without groups do not fail: the returned group carries a
/// descriptive message in every slot. `Err` is reserved for an unusable `mode`.
pub fn extract(text: &str, mode: &LoadMode, index: i64) -> Result<Group, LibraryError> {
    let groups = split_groups(text, mode)?;
    if groups.is_empty() {
        return Ok(Group::message("No groups found"));
    }

    let max = groups.len() as i64 - 1;
    if index < 0 || index > max {
        return Ok(Group::message(format!(
            "Group index {} out of range (max: {})",
            index, max
        )));
    }

    let index = index as usize;
    let selected = &groups[index];
    if mode.is_line_mode() {
        Ok(line_group(selected, index))
    } else {
        Ok(block_group(selected))
    }
}

/// Title of every group, formatted `"{i}: {title}"`.
pub fn group_titles(text: &str, mode: &LoadMode) -> Result<Vec<String>, LibraryError> {
    let groups = split_groups(text, mode)?;
    let titles = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let title = if mode.is_line_mode() {
                if let Some(caps) = LINE_TITLE.captures(group) {
                    caps[1].to_string()
                } else if let Some((label, _)) = group.split_once(':') {
                    label.trim().to_string()
                } else {
                    format!("Line {}", i)
                }
            } else {
                let first = group.trim().split('\n').next().unwrap_or_default();
                match GROUP_TITLE.captures(first) {
                    Some(caps) => caps[1].to_string(),
                    None => format!("Group {}", i),
                }
            };
            format!("{}: {}", i, title)
        })
        .collect();
    Ok(titles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOGUE: &str = "[Alice]\nHello there\nHow are you?\n\n[Bob]\nFine.\n\nNo title here\nsecond";

    #[test]
    fn double_newline_groups_and_titles() {
        let mode = LoadMode::ByDoubleNewline;
        assert_eq!(split_groups(DIALOGUE, &mode).unwrap().len(), 3);

        let alice = extract(DIALOGUE, &mode, 0).unwrap();
        assert_eq!(alice.title, "Alice");
        assert_eq!(alice.content, "Hello there\nHow are you?");
        assert_eq!(alice.full_group, "[Alice]\nHello there\nHow are you?");

        let untitled = extract(DIALOGUE, &mode, 2).unwrap();
        assert_eq!(untitled.title, "No title here");
        assert_eq!(untitled.content, "No title here\nsecond");
    }

    #[test]
    fn out_of_range_is_a_message_in_every_slot() {
        let group = extract(DIALOGUE, &LoadMode::ByDoubleNewline, 5).unwrap();
        let msg = "Group index 5 out of range (max: 2)";
        assert_eq!(group, Group::message(msg));

        let negative = extract(DIALOGUE, &LoadMode::ByDoubleNewline, -1).unwrap();
        assert_eq!(negative.title, "Group index -1 out of range (max: 2)");
    }

    #[test]
    fn inline_bracket_title() {
        let line = extract("[Alice] Hello there", &LoadMode::ByLine, 0).unwrap();
        assert_eq!(line.title, "Alice");
        assert_eq!(line.content, "Hello there");

        let block = extract("[Alice] Hello there", &LoadMode::ByDoubleNewline, 0).unwrap();
        assert_eq!(block.title, "Alice");
        assert_eq!(block.content, "Hello there");
    }

    #[test]
    fn by_line_titles() {
        let text = "Bob: Hi\n\n  \n[Carol]\njust text\n";
        let mode = LoadMode::ByLine;
        assert_eq!(split_groups(text, &mode).unwrap(), vec!["Bob: Hi", "[Carol]", "just text"]);

        let bob = extract(text, &mode, 0).unwrap();
        assert_eq!((bob.title.as_str(), bob.content.as_str()), ("Bob", "Hi"));

        let carol = extract(text, &mode, 1).unwrap();
        assert_eq!((carol.title.as_str(), carol.content.as_str()), ("Carol", "[Carol]"));

        let plain = extract(text, &mode, 2).unwrap();
        assert_eq!((plain.title.as_str(), plain.content.as_str()), ("Line 2", "just text"));
    }

    #[test]
    fn custom_separator_drops_blank_groups() {
        let text = "---\none\n---\n   \n---\n[T]\ntwo\n---";
        let mode = LoadMode::ByCustomSeparator("---".to_string());
        assert_eq!(split_groups(text, &mode).unwrap(), vec!["one", "[T]\ntwo"]);
        let two = extract(text, &mode, 1).unwrap();
        assert_eq!((two.title.as_str(), two.content.as_str()), ("T", "two"));
    }

    #[test]
    fn empty_separator_is_rejected() {
        let mode = LoadMode::ByCustomSeparator(String::new());
        assert!(split_groups("a", &mode).is_err());
    }

    #[test]
    fn no_groups_message() {
        let group = extract("\n \n", &LoadMode::ByLine, 0).unwrap();
        assert_eq!(group.title, "No groups found");
    }

    #[test]
    fn titles_listing() {
        assert_eq!(
            group_titles(DIALOGUE, &LoadMode::ByDoubleNewline).unwrap(),
            vec!["0: Alice", "1: Bob", "2: Group 2"]
        );
        assert_eq!(
            group_titles("Bob: Hi\n[Ann] yo\nplain", &LoadMode::ByLine).unwrap(),
            vec!["0: Bob", "1: Ann", "2: Line 2"]
        );
    }

    #[test]
    fn crlf_files_split_like_lf() {
        let text = normalize_newlines("[A]\r\nx\r\n\r\n[B]\r\ny");
        assert_eq!(split_groups(&text, &LoadMode::ByDoubleNewline).unwrap().len(), 2);
    }
}
