use std::collections::HashMap;

use log::warn;

use crate::error::LibraryError;
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::text::{WriteMode, write_text};
use crate::util::{TemplateValue, render_template};

const APPEND_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends text, optionally timestamped, to an existing or new file.
pub struct TextAppenderPlugin;

impl TextAppenderPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextAppenderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    TextAppenderPlugin,
    id: "TextAppender",
    name: "Text Appender",
    category: NodeCategory::TextIo,
    version: (0, 1, 0)
);

impl NodePlugin for TextAppenderPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("TextAppender", "Text Appender", NodeCategory::TextIo)
            .with_description("Appends text to a file")
            .with_inputs(vec![
                PinDefinition::input("file_path", "File Path", PinDataType::String)
                    .with_default(""),
                PinDefinition::input("text_to_append", "Text To Append", PinDataType::String)
                    .with_default(""),
                PinDefinition::input("add_timestamp", "Add Timestamp", PinDataType::Boolean)
                    .with_default(true),
                PinDefinition::input("timestamp_format", "Timestamp Format", PinDataType::String)
                    .with_default("[{timestamp}] "),
                PinDefinition::input("separator_before", "Separator Before", PinDataType::String)
                    .with_default("\n\n"),
                PinDefinition::input("separator_after", "Separator After", PinDataType::String)
                    .with_default("\n"),
            ])
            .with_outputs(vec![
                PinDefinition::output("file_path", "File Path", PinDataType::String),
                PinDefinition::output("appended_content", "Appended Content", PinDataType::String),
            ])
            .as_output_node()
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let file_path = inputs.string("file_path")?;
        if file_path.trim().is_empty() {
            return Ok(vec![
                NodeValue::from("Error: No file path specified"),
                NodeValue::from(""),
            ]);
        }
        let path = ctx.resolve_file_path(&file_path);

        let text = inputs.string("text_to_append")?;
        let add_timestamp = inputs.boolean("add_timestamp")?;
        let timestamp_format = inputs.string("timestamp_format")?;
        let before = inputs.string("separator_before")?;
        let after = inputs.string("separator_after")?;

        let append = || -> Result<String, LibraryError> {
            let body = if add_timestamp {
                let stamp = ctx.now().format(APPEND_TIMESTAMP_FORMAT).to_string();
                let prefix =
                    render_template(&timestamp_format, &[("timestamp", TemplateValue::from(stamp))])?;
                format!("{}{}", prefix, text)
            } else {
                text.clone()
            };
            let content = format!("{}{}{}", before, body, after);
            write_text(&path, &content, WriteMode::Append)?;
            Ok(content)
        };

        let outputs = match append() {
            Ok(content) => (path.to_string_lossy().into_owned(), content),
            Err(e) => {
                warn!("TextAppender: {}", e);
                (format!("Error appending to file: {}", e), String::new())
            }
        };
        Ok(vec![NodeValue::from(outputs.0), NodeValue::from(outputs.1)])
    }
}
