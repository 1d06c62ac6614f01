use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::warn;

use crate::builtin::save_error_message;
use crate::error::LibraryError;
use crate::io::{EncodeOptions, ImageFileFormat, next_counter, save_image, timestamp_token};
use crate::model::{Image, NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};

const FORMATS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff", "gif"];

/// Saves every image of a batch with a configurable name, format and encoder settings.
pub struct ImageSaverPlugin;

impl ImageSaverPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageSaverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    ImageSaverPlugin,
    id: "CustomImageSaver",
    name: "Custom Image Saver",
    category: NodeCategory::ImageIo,
    version: (0, 1, 0)
);

struct SaveRequest<'a> {
    images: &'a [Image],
    filename: String,
    format: ImageFileFormat,
    output_dir: PathBuf,
    add_timestamp: bool,
    add_counter: bool,
    options: EncodeOptions,
}

impl SaveRequest<'_> {
    fn run(&self, ctx: &ExecutionContext) -> Result<(Vec<String>, Vec<String>), LibraryError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut base = self.filename.clone();
        if self.add_timestamp {
            base = format!("{}_{}", base, timestamp_token(&ctx.now()));
        }

        let extension = self.format.extension();
        let mut paths = Vec::with_capacity(self.images.len());
        let mut names = Vec::with_capacity(self.images.len());

        for (idx, image) in self.images.iter().enumerate() {
            let stem = if self.add_counter && self.images.len() > 1 {
                format!("{}_{:04}", base, idx)
            } else if self.add_counter {
                let counter = next_counter(&self.output_dir, &base, extension)?;
                format!("{}_{:04}", base, counter)
            } else {
                base.clone()
            };

            let file_name = format!("{}.{}", stem, extension);
            let path = self.output_dir.join(&file_name);
            save_image(&path, image, &self.options)?;

            paths.push(display_path(&path));
            names.push(file_name);
        }
        Ok((paths, names))
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl NodePlugin for ImageSaverPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("CustomImageSaver", "Custom Image Saver", NodeCategory::ImageIo)
            .with_description("Saves images with custom filename, format and location")
            .with_inputs(vec![
                PinDefinition::input("images", "Images", PinDataType::Image),
                PinDefinition::input("filename", "Filename", PinDataType::String)
                    .with_default("image"),
                PinDefinition::input("format", "Format", PinDataType::Enum)
                    .with_options(&FORMATS)
                    .with_default("png"),
                PinDefinition::input("save_path", "Save Path", PinDataType::String)
                    .with_default(""),
                PinDefinition::input("add_timestamp", "Add Timestamp", PinDataType::Boolean)
                    .with_default(true),
                PinDefinition::input("add_counter", "Add Counter", PinDataType::Boolean)
                    .with_default(true),
                PinDefinition::input("quality", "Quality", PinDataType::Integer)
                    .with_range(1, 100)
                    .with_default(95i64),
                PinDefinition::input("png_compression", "PNG Compression", PinDataType::Integer)
                    .with_range(0, 9)
                    .with_default(6i64),
                PinDefinition::input("metadata", "Metadata", PinDataType::String)
                    .with_default("")
                    .optional(),
            ])
            .with_outputs(vec![
                PinDefinition::output("saved_path", "Saved Path", PinDataType::String),
                PinDefinition::output("filename", "Filename", PinDataType::String),
            ])
            .as_output_node()
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let format = ImageFileFormat::parse(&inputs.string("format")?)?;
        let metadata = inputs.string_or_empty("metadata")?;
        let request = SaveRequest {
            images: inputs.images("images")?,
            filename: inputs.string("filename")?,
            format,
            output_dir: ctx.resolve_output_dir(&inputs.string("save_path")?),
            add_timestamp: inputs.boolean("add_timestamp")?,
            add_counter: inputs.boolean("add_counter")?,
            options: EncodeOptions::for_format(
                format,
                inputs.integer("quality")?.clamp(1, 100) as u8,
                inputs.integer("png_compression")?.clamp(0, 9) as u8,
                Some(metadata.as_str()),
            ),
        };

        let (saved_path, filename) = match request.run(ctx) {
            Ok((paths, names)) => (paths.join("; "), names.join("; ")),
            Err(e) => {
                warn!("CustomImageSaver: {}", e);
                let msg = save_error_message(&e);
                (msg.clone(), msg)
            }
        };
        Ok(vec![NodeValue::from(saved_path), NodeValue::from(filename)])
    }
}
