use std::collections::HashMap;
use std::path::Path;

use log::warn;

use super::saver::text_file_path;
use crate::builtin::save_error_message;
use crate::error::LibraryError;
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::text::{WriteMode, write_text};
use crate::util::{TemplateValue, render_template};

const EXTRA_TEXTS: [&str; 5] = ["text1", "text2", "text3", "text4", "text5"];

/// Joins up to six texts into one file, optionally numbering each.
pub struct MultiTextSaverPlugin;

impl MultiTextSaverPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MultiTextSaverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    MultiTextSaverPlugin,
    id: "MultiTextSaver",
    name: "Multi Text Saver",
    category: NodeCategory::TextIo,
    version: (0, 1, 0)
);

fn combine(texts: &[String], separator: &str, index_format: Option<&str>) -> Result<String, LibraryError> {
    let mut parts = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        match index_format {
            Some(format) => {
                let prefix = render_template(format, &[("index", TemplateValue::from(i + 1))])?;
                parts.push(format!("{}{}", prefix, text));
            }
            None => parts.push(text.clone()),
        }
    }
    Ok(parts.join(separator))
}

fn has_content(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.len() > 0)
}

impl NodePlugin for MultiTextSaverPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        let mut inputs = vec![
            PinDefinition::input("texts", "Texts", PinDataType::String).with_default(""),
            PinDefinition::input("filename", "Filename", PinDataType::String)
                .with_default("multi_output"),
            PinDefinition::input("save_path", "Save Path", PinDataType::String).with_default(""),
            PinDefinition::input("separator", "Separator", PinDataType::String)
                .with_default("\n\n"),
            PinDefinition::input("add_index", "Add Index", PinDataType::Boolean)
                .with_default(false),
            PinDefinition::input("index_format", "Index Format", PinDataType::String)
                .with_default("[{index}] "),
            PinDefinition::input("add_timestamp", "Add Timestamp", PinDataType::Boolean)
                .with_default(false),
            PinDefinition::input("write_mode", "Write Mode", PinDataType::Enum)
                .with_options(&WriteMode::NAMES)
                .with_default("overwrite"),
        ];
        for (i, name) in EXTRA_TEXTS.iter().enumerate() {
            inputs.push(
                PinDefinition::input(name, &format!("Text {}", i + 1), PinDataType::String)
                    .optional(),
            );
        }

        NodeTypeDefinition::new("MultiTextSaver", "Multi Text Saver", NodeCategory::TextIo)
            .with_description("Combines several texts and saves them to one .txt file")
            .with_inputs(inputs)
            .with_outputs(vec![
                PinDefinition::output("saved_path", "Saved Path", PinDataType::String),
                PinDefinition::output("combined_content", "Combined Content", PinDataType::String),
                PinDefinition::output("text_count", "Text Count", PinDataType::Integer),
            ])
            .as_output_node()
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);

        let mut texts = Vec::with_capacity(1 + EXTRA_TEXTS.len());
        for name in std::iter::once("texts").chain(EXTRA_TEXTS) {
            let text = inputs.string_or_empty(name)?;
            if !text.trim().is_empty() {
                texts.push(text);
            }
        }

        let separator = inputs.string("separator")?;
        let index_format = inputs.string("index_format")?;
        let add_index = inputs.boolean("add_index")?;
        let write_mode = WriteMode::parse(&inputs.string("write_mode")?)?;
        let path = text_file_path(
            ctx,
            &inputs.string("save_path")?,
            &inputs.string("filename")?,
            inputs.boolean("add_timestamp")?,
        );

        let save = || -> Result<String, LibraryError> {
            let combined = combine(&texts, &separator, add_index.then_some(index_format.as_str()))?;
            let to_write = if write_mode == WriteMode::Append && has_content(&path) {
                format!("{}{}", separator, combined)
            } else {
                combined.clone()
            };
            write_text(&path, &to_write, write_mode)?;
            Ok(combined)
        };

        let outputs = match save() {
            Ok(combined) => vec![
                NodeValue::from(path.to_string_lossy().into_owned()),
                NodeValue::from(combined),
                NodeValue::from(texts.len()),
            ],
            Err(e) => {
                warn!("MultiTextSaver: {}", e);
                let msg = save_error_message(&e);
                vec![NodeValue::from(msg.clone()), NodeValue::from(msg), NodeValue::Integer(0)]
            }
        };
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_one_based() {
        let texts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(combine(&texts, " | ", Some("[{index}] ")).unwrap(), "[1] a | [2] b");
        assert_eq!(combine(&texts, "\n", None).unwrap(), "a\nb");
        assert!(combine(&texts, "\n", Some("{idx}")).is_err());
    }

    #[test]
    fn blank_inputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ExecutionContext::new(dir.path());
        let mut inputs: HashMap<String, NodeValue> = MultiTextSaverPlugin::new()
            .definition()
            .inputs
            .into_iter()
            .filter_map(|pin| pin.default_value.map(|v| (pin.name, v)))
            .collect();
        inputs.insert("texts".into(), "  ".into());
        inputs.insert("text2".into(), "second".into());
        inputs.insert("text5".into(), "fifth".into());

        let out = MultiTextSaverPlugin::new().execute(&inputs, &ctx).unwrap();
        assert_eq!(out[1], NodeValue::from("second\n\nfifth"));
        assert_eq!(out[2], NodeValue::Integer(2));
    }
}
