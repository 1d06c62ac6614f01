//! Node type definitions exposed to the host.

use serde::Serialize;

use crate::model::PinDefinition;

/// Category a node is listed under in the host's node menu.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Image savers
    ImageIo,
    /// Text savers and appenders
    TextIo,
    /// Folder and path image loaders
    Loader,
    /// Dialogue / text group extraction
    Utils,
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeCategory::ImageIo => "image/io",
            NodeCategory::TextIo => "text/io",
            NodeCategory::Loader => "dialogue_extractor",
            NodeCategory::Utils => "utils",
        };
        write!(f, "{}", s)
    }
}

/// Definition of a node type, registered in the PluginManager.
///
/// The pin lists are the node's external contract: names, types, defaults and output
/// order are what a host wires against.
#[derive(Serialize, Debug, Clone)]
pub struct NodeTypeDefinition {
    /// Unique type identifier (e.g. "SequentialImageLoader")
    pub type_id: String,
    /// Human-readable name (e.g. "Sequential Image Loader")
    pub display_name: String,
    pub category: NodeCategory,
    pub description: String,
    pub inputs: Vec<PinDefinition>,
    pub outputs: Vec<PinDefinition>,
    /// Output nodes write to disk and are evaluated even when nothing consumes them
    pub output_node: bool,
}

impl NodeTypeDefinition {
    pub fn new(type_id: &str, display_name: &str, category: NodeCategory) -> Self {
        Self {
            type_id: type_id.to_string(),
            display_name: display_name.to_string(),
            category,
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            output_node: false,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PinDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PinDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn as_output_node(mut self) -> Self {
        self.output_node = true;
        self
    }

    pub fn input(&self, name: &str) -> Option<&PinDefinition> {
        self.inputs.iter().find(|pin| pin.name == name)
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|pin| pin.name.as_str()).collect()
    }
}
