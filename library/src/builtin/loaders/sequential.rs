use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::error::LibraryError;
use crate::io::image_loader::{file_stem, load_image};
use crate::model::{NodeInputs, NodeValue, PinDataType, PinDefinition};
use crate::plugin::{ExecutionContext, NodeCategory, NodePlugin, NodeTypeDefinition};
use crate::selection::{SelectionMode, SelectorState, scan};

pub const DEFAULT_EXTENSIONS: &str = "png,jpg,jpeg,webp,bmp,tiff,gif";

/// Loads one image per evaluation from a naturally sorted folder listing.
///
/// Increment and decrement modes remember their position per folder in the plugin's
/// [`SelectorState`]. Hosts that want independent walks for two graph positions give each
/// its own plugin instance via [`SequentialImageLoaderPlugin::with_state`].
pub struct SequentialImageLoaderPlugin {
    state: Arc<SelectorState>,
}

impl SequentialImageLoaderPlugin {
    pub fn new() -> Self {
        Self::with_state(Arc::new(SelectorState::new()))
    }

    pub fn with_state(state: Arc<SelectorState>) -> Self {
        Self { state }
    }
}

impl Default for SequentialImageLoaderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

crate::builtin::define_node_plugin!(
    SequentialImageLoaderPlugin,
    id: "SequentialImageLoader",
    name: "Sequential Image Loader",
    category: NodeCategory::Loader,
    version: (0, 2, 0)
);

impl NodePlugin for SequentialImageLoaderPlugin {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new(
            "SequentialImageLoader",
            "Sequential Image Loader",
            NodeCategory::Loader,
        )
        .with_description("Loads images from a folder in fixed, increment, decrement or random order")
        .with_inputs(vec![
            PinDefinition::input("folder_path", "Folder Path", PinDataType::String)
                .with_default(""),
            PinDefinition::input("mode", "Mode", PinDataType::Enum)
                .with_options(&SelectionMode::NAMES)
                .with_default("increment"),
            PinDefinition::input("index", "Index", PinDataType::Integer)
                .with_range(0, 99999)
                .with_default(0i64),
            PinDefinition::input("extensions", "Extensions", PinDataType::String)
                .with_default(DEFAULT_EXTENSIONS),
            PinDefinition::input("seed", "Seed", PinDataType::Integer).optional(),
        ])
        .with_outputs(vec![
            PinDefinition::output("image", "Image", PinDataType::Image),
            PinDefinition::output("filename", "Filename", PinDataType::String),
            PinDefinition::output("current_index", "Current Index", PinDataType::Integer),
            PinDefinition::output("total_count", "Total Count", PinDataType::Integer),
        ])
    }

    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        _ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let inputs = NodeInputs::new(inputs);
        let folder = inputs.string("folder_path")?;
        let folder = folder.trim();
        if folder.is_empty() {
            return Err(LibraryError::invalid_argument("Folder path cannot be empty"));
        }
        let mode: SelectionMode = inputs.string("mode")?.parse()?;
        let offset = inputs.integer("index")?;
        let extensions = inputs.string("extensions")?;
        let seed = inputs.optional_integer("seed")?.map(|s| s as u64);

        let files = scan(Path::new(folder), &extensions)?;
        if files.is_empty() {
            return Err(LibraryError::empty_collection(format!(
                "No images found in folder: {}",
                folder
            )));
        }

        let selection = self.state.select(folder, mode, offset, files.len(), seed)?;
        let selected = &files[selection.index];
        let path = Path::new(folder).join(selected);
        debug!("SequentialImageLoader: {} -> {}", folder, path.display());

        let image = load_image(&path)?;
        Ok(vec![
            NodeValue::from(image),
            NodeValue::from(file_stem(&path)),
            NodeValue::from(selection.index),
            NodeValue::from(selection.total),
        ])
    }

    fn should_reevaluate(&self, inputs: &HashMap<String, NodeValue>) -> bool {
        inputs
            .get("mode")
            .and_then(|v| v.get_as::<String>())
            .and_then(|mode| mode.parse::<SelectionMode>().ok())
            .is_some_and(|mode| mode != SelectionMode::Fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_with(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            image::RgbImage::from_pixel(1, 1, image::Rgb([0, 0, 0]))
                .save(dir.path().join(name))
                .unwrap();
        }
        dir
    }

    fn inputs(folder: &Path, mode: &str, index: i64) -> HashMap<String, NodeValue> {
        HashMap::from([
            ("folder_path".to_string(), NodeValue::from(folder.to_string_lossy().into_owned())),
            ("mode".to_string(), NodeValue::from(mode)),
            ("index".to_string(), NodeValue::from(index)),
            ("extensions".to_string(), NodeValue::from(DEFAULT_EXTENSIONS)),
        ])
    }

    #[test]
    fn increment_walks_the_natural_order() {
        let dir = folder_with(&["10.png", "2.png", "1.png"]);
        let node = SequentialImageLoaderPlugin::new();
        let ctx = ExecutionContext::default();

        let names: Vec<NodeValue> = (0..4)
            .map(|_| node.execute(&inputs(dir.path(), "increment", 0), &ctx).unwrap()[1].clone())
            .collect();
        assert_eq!(
            names,
            vec![
                NodeValue::from("1"),
                NodeValue::from("2"),
                NodeValue::from("10"),
                NodeValue::from("1")
            ]
        );
    }

    #[test]
    fn separate_instances_keep_separate_counters() {
        let dir = folder_with(&["a.png", "b.png"]);
        let ctx = ExecutionContext::default();
        let first = SequentialImageLoaderPlugin::new();
        let second = SequentialImageLoaderPlugin::new();

        first.execute(&inputs(dir.path(), "increment", 0), &ctx).unwrap();
        let out = first.execute(&inputs(dir.path(), "increment", 0), &ctx).unwrap();
        assert_eq!(out[2], NodeValue::Integer(1));

        let out = second.execute(&inputs(dir.path(), "increment", 0), &ctx).unwrap();
        assert_eq!(out[2], NodeValue::Integer(0));
    }

    #[test]
    fn empty_folder_fails() {
        let dir = folder_with(&[]);
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let err = SequentialImageLoaderPlugin::new()
            .execute(&inputs(dir.path(), "fixed", 0), &ExecutionContext::default())
            .unwrap_err();
        assert!(matches!(err, LibraryError::EmptyCollection(msg) if msg.starts_with("No images found")));
    }

    #[test]
    fn blank_folder_path_fails() {
        let err = SequentialImageLoaderPlugin::new()
            .execute(&inputs(Path::new("  "), "fixed", 0), &ExecutionContext::default())
            .unwrap_err();
        assert!(matches!(err, LibraryError::InvalidArgument(_)));
    }

    #[test]
    fn only_fixed_mode_is_cacheable() {
        let node = SequentialImageLoaderPlugin::new();
        let dir = Path::new("/tmp");
        assert!(!node.should_reevaluate(&inputs(dir, "fixed", 0)));
        for mode in ["increment", "decrement", "random"] {
            assert!(node.should_reevaluate(&inputs(dir, mode, 0)), "{}", mode);
        }
    }
}
