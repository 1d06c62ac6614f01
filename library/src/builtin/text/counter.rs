use std::collections::HashMap;

use crate::error::LibraryError;
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::text::LoadMode;

use super::count_in_file;
use super::extractor::{load_mode_from, load_mode_inputs};

fn file_path_input() -> PinDefinition {
    PinDefinition::input("file_path", "File Path", PinDataType::String).with_default("")
}

fn count_outputs() -> Vec<PinDefinition> {
    vec![
        PinDefinition::output("total_groups", "Total Groups", PinDataType::Integer),
        PinDefinition::output("group_titles", "Group Titles", PinDataType::String),
    ]
}

/// Counts the dialogue groups of a file and lists their titles.
pub struct DialogueGroupCounterPlugin;

impl DialogueGroupCounterPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialogueGroupCounterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    DialogueGroupCounterPlugin,
    id: "DialogueGroupCounter",
    name: "Dialogue Group Counter",
    category: NodeCategory::Utils,
    version: (0, 1, 0)
);

impl NodePlugin for DialogueGroupCounterPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new(
            "DialogueGroupCounter",
            "Dialogue Group Counter",
            NodeCategory::Utils,
        )
        .with_description("Counts dialogue groups and lists their titles")
        .with_inputs(vec![file_path_input()])
        .with_outputs(count_outputs())
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let file_path = NodeInputs::new(inputs).string("file_path")?;
        let (count, titles) = count_in_file(&file_path, &LoadMode::ByDoubleNewline);
        Ok(vec![NodeValue::from(count), NodeValue::from(titles)])
    }
}

pub struct TextLoadCounterPlugin;

impl TextLoadCounterPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLoadCounterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    TextLoadCounterPlugin,
    id: "TextLoadCounter",
    name: "Text Load Counter",
    category: NodeCategory::Utils,
    version: (0, 1, 0)
);

impl NodePlugin for TextLoadCounterPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        let mut inputs = vec![file_path_input()];
        inputs.extend(load_mode_inputs());
        NodeTypeDefinition::new("TextLoadCounter", "Text Load Counter", NodeCategory::Utils)
            .with_description("Counts lines or groups of a text file and lists their titles")
            .with_inputs(inputs)
            .with_outputs(count_outputs())
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let mode = load_mode_from(&inputs)?;
        let (count, titles) = count_in_file(&inputs.string("file_path")?, &mode);
        Ok(vec![NodeValue::from(count), NodeValue::from(titles)])
    }
}
