use std::collections::HashMap;

use crate::error::LibraryError;
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::text::{Group, LoadMode};

use super::extract_from_file;

fn group_outputs(group: Group) -> Vec<NodeValue> {
    vec![
        NodeValue::from(group.title),
        NodeValue::from(group.content),
        NodeValue::from(group.full_group),
    ]
}

fn common_inputs() -> Vec<PinDefinition> {
    vec![
        PinDefinition::input("file_path", "File Path", PinDataType::String).with_default(""),
        PinDefinition::input("group_index", "Group Index", PinDataType::Integer)
            .with_range(0, 9999)
            .with_default(0i64),
    ]
}

fn group_output_pins() -> Vec<PinDefinition> {
    vec![
        PinDefinition::output("title", "Title", PinDataType::String),
        PinDefinition::output("content", "Content", PinDataType::String),
        PinDefinition::output("full_group", "Full Group", PinDataType::String),
    ]
}

/// Extracts one blank-line separated dialogue group from a text file.
pub struct DialogueExtractorPlugin;

impl DialogueExtractorPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialogueExtractorPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    DialogueExtractorPlugin,
    id: "DialogueExtractor",
    name: "Dialogue Extractor",
    category: NodeCategory::Utils,
    version: (0, 1, 0)
);

impl NodePlugin for DialogueExtractorPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("DialogueExtractor", "Dialogue Extractor", NodeCategory::Utils)
            .with_description("Extracts a dialogue group (title, content) from a text file")
            .with_inputs(common_inputs())
            .with_outputs(group_output_pins())
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let group = extract_from_file(
            &inputs.string("file_path")?,
            &LoadMode::ByDoubleNewline,
            inputs.integer("group_index")?,
        );
        Ok(group_outputs(group))
    }
}

/// Like [`DialogueExtractorPlugin`] with a selectable split mode.
pub struct TextLoadPlugin;

impl TextLoadPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLoadPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    TextLoadPlugin,
    id: "TextLoad",
    name: "Text Load",
    category: NodeCategory::Utils,
    version: (0, 1, 0)
);

/// `load_mode` and `custom_separator` pins shared with the counter.
pub(crate) fn load_mode_inputs() -> Vec<PinDefinition> {
    vec![
        PinDefinition::input("load_mode", "Load Mode", PinDataType::Enum)
            .with_options(&LoadMode::NAMES)
            .with_default("by_line"),
        PinDefinition::input("custom_separator", "Custom Separator", PinDataType::String)
            .with_default("---"),
    ]
}

pub(crate) fn load_mode_from(inputs: &NodeInputs<'_>) -> Result<LoadMode, LibraryError> {
    LoadMode::parse(
        &inputs.string("load_mode")?,
        &inputs.string("custom_separator")?,
    )
}

impl NodePlugin for TextLoadPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        let mut inputs = common_inputs();
        inputs.extend(load_mode_inputs());
        NodeTypeDefinition::new("TextLoad", "Text Load", NodeCategory::Utils)
            .with_description("Extracts a line or group from a text file")
            .with_inputs(inputs)
            .with_outputs(group_output_pins())
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let mode = load_mode_from(&inputs)?;
        let group = extract_from_file(
            &inputs.string("file_path")?,
            &mode,
            inputs.integer("group_index")?,
        );
        Ok(group_outputs(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_dialogue(path: &str, index: i64) -> Vec<NodeValue> {
        let inputs = HashMap::from([
            ("file_path".to_string(), NodeValue::from(path)),
            ("group_index".to_string(), NodeValue::from(index)),
        ]);
        DialogueExtractorPlugin::new()
            .execute(&inputs, &ExecutionContext::default())
            .unwrap()
    }

    #[test]
    fn missing_file_is_reported_in_all_slots() {
        let out = run_dialogue("/definitely/not/here.txt", 0);
        assert_eq!(out, vec![NodeValue::from("File not found"); 3]);
    }

    #[test]
    fn dialogue_groups_from_crlf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.txt");
        std::fs::write(&path, "[Alice]\r\nHello\r\n\r\n[Bob]\r\nHi\r\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let out = run_dialogue(&path, 1);
        assert_eq!(out[0], NodeValue::from("Bob"));
        assert_eq!(out[1], NodeValue::from("Hi"));
        assert_eq!(out[2], NodeValue::from("[Bob]\nHi"));
    }

    #[test]
    fn invalid_utf8_becomes_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let out = run_dialogue(&path.to_string_lossy(), 0);
        assert!(matches!(&out[0], NodeValue::String(s) if s.starts_with("Error reading file: ")));
    }

    #[test]
    fn text_load_by_line_with_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        std::fs::write(&path, "Bob: Hi\n\nAnn: Bye\n").unwrap();
        let inputs = HashMap::from([
            ("file_path".to_string(), NodeValue::from(path.to_string_lossy().into_owned())),
            ("group_index".to_string(), NodeValue::from(1i64)),
            ("load_mode".to_string(), NodeValue::from("by_line")),
            ("custom_separator".to_string(), NodeValue::from("---")),
        ]);

        let out = TextLoadPlugin::new()
            .execute(&inputs, &ExecutionContext::default())
            .unwrap();
        assert_eq!(out[0], NodeValue::from("Ann"));
        assert_eq!(out[1], NodeValue::from("Bye"));
    }
}
