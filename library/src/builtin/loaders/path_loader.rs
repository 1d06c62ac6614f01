use std::collections::HashMap;
use std::path::Path;

use crate::error::LibraryError;
use crate::io::image_loader::{file_stem, load_image};
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};

/// Loads a single image from an explicit path.
pub struct ImagePathLoaderPlugin;

impl ImagePathLoaderPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagePathLoaderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    ImagePathLoaderPlugin,
    id: "ImagePathLoader",
    name: "Image Path Loader",
    category: NodeCategory::Loader,
    version: (0, 1, 0)
);

impl NodePlugin for ImagePathLoaderPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new("ImagePathLoader", "Image Path Loader", NodeCategory::Loader)
            .with_description("Loads one image from a file path")
            .with_inputs(vec![
                PinDefinition::input("image_path", "Image Path", PinDataType::String)
                    .with_default(""),
            ])
            .with_outputs(vec![
                PinDefinition::output("image", "Image", PinDataType::Image),
                PinDefinition::output("filename", "Filename", PinDataType::String),
            ])
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let raw = NodeInputs::new(inputs).string("image_path")?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LibraryError::invalid_argument("Image path cannot be empty"));
        }

        let path = Path::new(raw);
        if !path.exists() {
            return Err(LibraryError::not_found(format!(
                "Image file does not exist: {}",
                raw
            )));
        }
        if !path.is_file() {
            return Err(LibraryError::invalid_argument(format!(
                "Path is not a file: {}",
                raw
            )));
        }

        let image = load_image(path)?;
        Ok(vec![NodeValue::from(image), NodeValue::from(file_stem(path))])
    }
}
