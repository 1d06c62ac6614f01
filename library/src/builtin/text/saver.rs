use std::collections::HashMap;
use std::path::PathBuf;

use log::warn;

use crate::builtin::save_error_message;
use crate::error::LibraryError;
use crate::io::timestamp_token;
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::text::{SpacingType, WriteMode, write_text};

/// `{dir}/{filename}[_{timestamp}].txt`
pub(crate) fn text_file_path(
    ctx: &ExecutionContext,
    save_path: &str,
    filename: &str,
    add_timestamp: bool,
) -> PathBuf {
    let stem = if add_timestamp {
        format!("{}_{}", filename, timestamp_token(&ctx.now()))
    } else {
        filename.to_string()
    };
    ctx.resolve_output_dir(save_path).join(format!("{}.txt", stem))
}

/// Writes or appends a text, optionally followed by spacing.
pub struct TextSaverPlugin;

impl TextSaverPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextSaverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    TextSaverPlugin,
    id: "TextSaver",
    name: "Text Saver",
    category: NodeCategory::TextIo,
    version: (0, 1, 0)
);

impl NodePlugin for TextSaverPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("TextSaver", "Text Saver", NodeCategory::TextIo)
            .with_description("Saves text to a .txt file")
            .with_inputs(vec![
                PinDefinition::input("text", "Text", PinDataType::String).with_default(""),
                PinDefinition::input("filename", "Filename", PinDataType::String)
                    .with_default("output"),
                PinDefinition::input("save_path", "Save Path", PinDataType::String)
                    .with_default(""),
                PinDefinition::input("add_timestamp", "Add Timestamp", PinDataType::Boolean)
                    .with_default(false),
                PinDefinition::input("write_mode", "Write Mode", PinDataType::Enum)
                    .with_options(&WriteMode::NAMES)
                    .with_default("overwrite"),
                PinDefinition::input("add_spacing", "Add Spacing", PinDataType::Boolean)
                    .with_default(true),
                PinDefinition::input("spacing_type", "Spacing Type", PinDataType::Enum)
                    .with_options(&SpacingType::NAMES)
                    .with_default("empty_line"),
                PinDefinition::input("custom_separator", "Custom Separator", PinDataType::String)
                    .with_default("\n\n"),
            ])
            .with_outputs(vec![
                PinDefinition::output("saved_path", "Saved Path", PinDataType::String),
                PinDefinition::output("content", "Content", PinDataType::String),
            ])
            .as_output_node()
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let text = inputs.string("text")?;
        let write_mode = WriteMode::parse(&inputs.string("write_mode")?)?;
        let spacing = SpacingType::parse(
            &inputs.string("spacing_type")?,
            &inputs.string("custom_separator")?,
        )?;
        let path = text_file_path(
            ctx,
            &inputs.string("save_path")?,
            &inputs.string("filename")?,
            inputs.boolean("add_timestamp")?,
        );

        let content = if inputs.boolean("add_spacing")? {
            spacing.apply(&text)
        } else {
            text
        };

        let outputs = match write_text(&path, &content, write_mode) {
            Ok(()) => (path.to_string_lossy().into_owned(), content),
            Err(e) => {
                warn!("TextSaver: {}", e);
                let msg = save_error_message(&e);
                (msg.clone(), msg)
            }
        };
        Ok(vec![NodeValue::from(outputs.0), NodeValue::from(outputs.1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn defaults() -> HashMap<String, NodeValue> {
        TextSaverPlugin::new()
            .definition()
            .inputs
            .into_iter()
            .filter_map(|pin| pin.default_value.map(|v| (pin.name, v)))
            .collect()
    }

    #[test]
    fn append_accumulates_with_spacing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ExecutionContext::new(dir.path());
        let mut inputs = defaults();
        inputs.insert("write_mode".into(), "append".into());

        for text in ["one", "two"] {
            inputs.insert("text".into(), text.into());
            TextSaverPlugin::new().execute(&inputs, &ctx).unwrap();
        }

        let written = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
        assert_eq!(written, "one\n\ntwo\n\n");
    }

    #[test]
    fn blank_text_gets_no_spacing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ExecutionContext::new(dir.path());
        let mut inputs = defaults();
        inputs.insert("text".into(), "   ".into());
        inputs.insert("spacing_type".into(), "double_line".into());

        let out = TextSaverPlugin::new().execute(&inputs, &ctx).unwrap();
        assert_eq!(out[1], NodeValue::from("   "));
    }

    #[test]
    fn timestamped_name_in_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        let time = NaiveDateTime::parse_from_str("2024-12-31 23:59:58", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let ctx = ExecutionContext::new(dir.path()).with_fixed_time(time);
        let mut inputs = defaults();
        inputs.insert("text".into(), "x".into());
        inputs.insert("save_path".into(), "notes".into());
        inputs.insert("add_timestamp".into(), true.into());
        inputs.insert("spacing_type".into(), "custom".into());
        inputs.insert("custom_separator".into(), "|".into());

        let out = TextSaverPlugin::new().execute(&inputs, &ctx).unwrap();
        let expected = dir.path().join("notes/output_20241231_235958.txt");
        assert_eq!(out[0], NodeValue::from(expected.to_string_lossy().into_owned()));
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "x|");
    }
}
