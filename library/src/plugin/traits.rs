//! Core plugin traits.

use std::collections::HashMap;

use crate::error::LibraryError;
use crate::model::NodeValue;
use crate::plugin::context::ExecutionContext;
use crate::plugin::node_types::NodeTypeDefinition;

/// Base trait for all plugins.
pub trait Plugin: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> String;
    fn category(&self) -> String;
    fn version(&self) -> (u32, u32, u32);
}

/// A node the host can place in a graph and evaluate.
pub trait NodePlugin: Plugin {
    /// Pins, defaults and metadata for this node type.
    fn definition(&self) -> NodeTypeDefinition;

    /// Evaluates the node. `inputs` already carries pin defaults; the returned values are
    /// ordered like `definition().outputs`.
    fn execute(
        &self,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError>;

    /// True when a cached result for the same inputs must not be reused.
    fn should_reevaluate(&self, _inputs: &HashMap<String, NodeValue>) -> bool {
        false
    }
}
