//! Built-in node plugins.

macro_rules! define_node_plugin {
    (
        $struct_name:ident,
        id: $id:expr,
        name: $name:expr,
        category: $category:expr,
        version: ($major:expr, $minor:expr, $patch:expr)
    ) => {
        impl $crate::plugin::Plugin for $struct_name {
            fn id(&self) -> &'static str {
                $id
            }

            fn name(&self) -> String {
                $name.to_string()
            }

            fn category(&self) -> String {
                $category.to_string()
            }

            fn version(&self) -> (u32, u32, u32) {
                ($major, $minor, $patch)
            }
        }
    };
}
pub(crate) use define_node_plugin;

pub mod image_savers;
pub mod loaders;
pub mod text;

use std::sync::Arc;

use crate::error::LibraryError;
use crate::plugin::{NodePlugin, PluginManager};

pub use self::image_savers::{BatchImageSaverPlugin, ImageSaverPlugin};
pub use self::loaders::{ImagePathLoaderPlugin, SequentialImageLoaderPlugin};
pub use self::text::{
    DialogueExtractorPlugin, DialogueGroupCounterPlugin, MultiTextSaverPlugin,
    TextAppenderPlugin, TextLoadCounterPlugin, TextLoadPlugin, TextSaverPlugin,
};

/// Every built-in node, in menu order.
pub fn builtin_nodes() -> Vec<Arc<dyn NodePlugin>> {
    vec![
        Arc::new(ImageSaverPlugin::new()),
        Arc::new(BatchImageSaverPlugin::new()),
        Arc::new(SequentialImageLoaderPlugin::new()),
        Arc::new(ImagePathLoaderPlugin::new()),
        Arc::new(DialogueExtractorPlugin::new()),
        Arc::new(DialogueGroupCounterPlugin::new()),
        Arc::new(TextLoadPlugin::new()),
        Arc::new(TextLoadCounterPlugin::new()),
        Arc::new(TextSaverPlugin::new()),
        Arc::new(MultiTextSaverPlugin::new()),
        Arc::new(TextAppenderPlugin::new()),
    ]
}

pub fn register_builtin_nodes(manager: &PluginManager) -> Result<(), LibraryError> {
    for node in builtin_nodes() {
        manager.register_node(node)?;
    }
    Ok(())
}

/// Message placed in a saver's string outputs when writing fails.
pub(crate) fn save_error_message(err: &LibraryError) -> String {
    format!("Error saving file: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_match_definitions_and_are_unique() {
        let nodes = builtin_nodes();
        assert_eq!(nodes.len(), 11);

        let mut seen = HashSet::new();
        for node in &nodes {
            let definition = node.definition();
            assert_eq!(node.id(), definition.type_id);
            assert_eq!(node.name(), definition.display_name);
            assert_eq!(node.category(), definition.category.to_string());
            assert!(seen.insert(definition.type_id.clone()), "duplicate {}", node.id());
            assert!(!definition.outputs.is_empty());
        }
    }

    #[test]
    fn every_saver_is_an_output_node() {
        for node in builtin_nodes() {
            let definition = node.definition();
            let is_saver = definition.type_id.ends_with("Saver") || definition.type_id == "TextAppender";
            assert_eq!(definition.output_node, is_saver, "{}", definition.type_id);
        }
    }
}
