use std::collections::HashMap;

use log::warn;

use crate::builtin::save_error_message;
use crate::error::LibraryError;
use crate::io::{BatchNaming, EncodeOptions, ImageFileFormat, save_image, timestamp_token};
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};

const FORMATS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"];
const PNG_COMPRESSION: u8 = 6;

/// Saves a batch under a naming pattern (index, content hash, timestamp or a custom template).
pub struct BatchImageSaverPlugin;

impl BatchImageSaverPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatchImageSaverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    BatchImageSaverPlugin,
    id: "BatchImageSaver",
    name: "Batch Image Saver",
    category: NodeCategory::ImageIo,
    version: (0, 1, 0)
);

impl NodePlugin for BatchImageSaverPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("BatchImageSaver", "Batch Image Saver", NodeCategory::ImageIo)
            .with_description("Saves every image of a batch using a naming pattern")
            .with_inputs(vec![
                PinDefinition::input("images", "Images", PinDataType::Image),
                PinDefinition::input("base_filename", "Base Filename", PinDataType::String)
                    .with_default("batch_image"),
                PinDefinition::input("format", "Format", PinDataType::Enum)
                    .with_options(&FORMATS)
                    .with_default("png"),
                PinDefinition::input("save_path", "Save Path", PinDataType::String)
                    .with_default("batch_output"),
                PinDefinition::input("naming_pattern", "Naming Pattern", PinDataType::Enum)
                    .with_options(&BatchNaming::NAMES)
                    .with_default("index"),
                PinDefinition::input("custom_pattern", "Custom Pattern", PinDataType::String)
                    .with_default("{base}_{index:04d}"),
                PinDefinition::input("quality", "Quality", PinDataType::Integer)
                    .with_range(1, 100)
                    .with_default(95i64),
            ])
            .with_outputs(vec![
                PinDefinition::output("saved_paths", "Saved Paths", PinDataType::String),
                PinDefinition::output("count", "Count", PinDataType::Integer),
            ])
            .as_output_node()
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let images = inputs.images("images")?;
        let base = inputs.string("base_filename")?;
        let format = ImageFileFormat::parse(&inputs.string("format")?)?;
        let naming = BatchNaming::parse(
            &inputs.string("naming_pattern")?,
            &inputs.string("custom_pattern")?,
        )?;
        let quality = inputs.integer("quality")?.clamp(1, 100) as u8;
        let output_dir = ctx.resolve_output_dir(&inputs.string("save_path")?);
        let options = EncodeOptions::for_format(format, quality, PNG_COMPRESSION, None);

        let save_all = || -> Result<Vec<String>, LibraryError> {
            std::fs::create_dir_all(&output_dir)?;
            let timestamp = timestamp_token(&ctx.now());
            let mut paths = Vec::with_capacity(images.len());
            for (idx, image) in images.iter().enumerate() {
                let stem = naming.file_stem(&base, idx, &timestamp, image)?;
                let path = output_dir.join(format!("{}.{}", stem, format.extension()));
                save_image(&path, image, &options)?;
                paths.push(path.to_string_lossy().into_owned());
            }
            Ok(paths)
        };

        let (saved_paths, count) = match save_all() {
            Ok(paths) => (paths.join("; "), paths.len()),
            Err(e) => {
                warn!("BatchImageSaver: {}", e);
                (save_error_message(&e), 0)
            }
        };
        Ok(vec![NodeValue::from(saved_paths), NodeValue::from(count)])
    }
}
