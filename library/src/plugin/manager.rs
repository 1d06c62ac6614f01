//! Plugin manager for registering, describing and executing node plugins.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, warn};

use crate::error::LibraryError;
use crate::model::{NodeValue, PinDataType, PinDefinition};
use crate::plugin::context::ExecutionContext;
use crate::plugin::node_types::NodeTypeDefinition;
use crate::plugin::repository::PluginRegistry;
use crate::plugin::traits::NodePlugin;

/// Main plugin manager.
pub struct PluginManager {
    inner: RwLock<PluginRegistry>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PluginRegistry::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, PluginRegistry>, LibraryError> {
        self.inner
            .read()
            .map_err(|_| LibraryError::runtime("plugin registry lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, PluginRegistry>, LibraryError> {
        self.inner
            .write()
            .map_err(|_| LibraryError::runtime("plugin registry lock poisoned"))
    }

    pub fn register_node(&self, plugin: Arc<dyn NodePlugin>) -> Result<(), LibraryError> {
        let id = plugin.id();
        let mut inner = self.write()?;
        if inner.node_plugins.register(plugin).is_some() {
            warn!("PluginManager: node '{}' registered twice, keeping the latest", id);
        } else {
            debug!("PluginManager: registered node '{}'", id);
        }
        Ok(())
    }

    pub fn get_node(&self, type_id: &str) -> Option<Arc<dyn NodePlugin>> {
        self.read().ok()?.node_plugins.get(type_id).cloned()
    }

    pub fn get_definition(&self, type_id: &str) -> Option<NodeTypeDefinition> {
        self.get_node(type_id).map(|plugin| plugin.definition())
    }

    /// All registered node definitions, ordered by type id.
    pub fn node_definitions(&self) -> Vec<NodeTypeDefinition> {
        match self.read() {
            Ok(inner) => inner.node_plugins.values().map(|p| p.definition()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.read().map(|inner| inner.node_plugins.len()).unwrap_or(0)
    }

    /// Whether the host has to re-run `type_id` even if its inputs did not change.
    pub fn should_reevaluate(
        &self,
        type_id: &str,
        inputs: &HashMap<String, NodeValue>,
    ) -> Result<bool, LibraryError> {
        let plugin = self.lookup(type_id)?;
        let resolved = resolve_inputs(&plugin.definition(), inputs)?;
        Ok(plugin.should_reevaluate(&resolved))
    }

    /// Resolves defaults, validates inputs against the definition and runs the node.
    pub fn execute(
        &self,
        type_id: &str,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeValue>, LibraryError> {
        let plugin = self.lookup(type_id)?;
        let definition = plugin.definition();
        let resolved = resolve_inputs(&definition, inputs)?;

        debug!("PluginManager: executing '{}'", type_id);
        let outputs = plugin.execute(&resolved, ctx)?;

        if outputs.len() != definition.outputs.len() {
            return Err(LibraryError::plugin(format!(
                "node '{}' returned {} outputs, expected {}",
                type_id,
                outputs.len(),
                definition.outputs.len()
            )));
        }
        Ok(outputs)
    }

    /// Like [`execute`](Self::execute) but pairs each value with its output pin name.
    pub fn execute_named(
        &self,
        type_id: &str,
        inputs: &HashMap<String, NodeValue>,
        ctx: &ExecutionContext,
    ) -> Result<Vec<(String, NodeValue)>, LibraryError> {
        let definition = self
            .get_definition(type_id)
            .ok_or_else(|| unknown_node(type_id))?;
        let outputs = self.execute(type_id, inputs, ctx)?;
        Ok(definition
            .outputs
            .into_iter()
            .map(|pin| pin.name)
            .zip(outputs)
            .collect())
    }

    fn lookup(&self, type_id: &str) -> Result<Arc<dyn NodePlugin>, LibraryError> {
        self.get_node(type_id).ok_or_else(|| {
            error!("Node type '{}' not found", type_id);
            unknown_node(type_id)
        })
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_node(type_id: &str) -> LibraryError {
    LibraryError::plugin(format!("No node registered with type id '{}'", type_id))
}

fn resolve_inputs(
    definition: &NodeTypeDefinition,
    inputs: &HashMap<String, NodeValue>,
) -> Result<HashMap<String, NodeValue>, LibraryError> {
    for name in inputs.keys() {
        if definition.input(name).is_none() {
            warn!(
                "Node '{}' ignores unknown input '{}'",
                definition.type_id, name
            );
        }
    }

    let mut resolved = HashMap::with_capacity(definition.inputs.len());
    for pin in &definition.inputs {
        let value = inputs
            .get(&pin.name)
            .cloned()
            .or_else(|| pin.default_value.clone());
        match value {
            Some(value) => {
                validate_pin(&definition.type_id, pin, &value)?;
                resolved.insert(pin.name.clone(), value);
            }
            None if pin.optional => {}
            None => {
                return Err(LibraryError::invalid_argument(format!(
                    "node '{}' requires input '{}'",
                    definition.type_id, pin.name
                )));
            }
        }
    }
    Ok(resolved)
}

fn validate_pin(type_id: &str, pin: &PinDefinition, value: &NodeValue) -> Result<(), LibraryError> {
    if !pin.accepts(value) {
        return Err(LibraryError::invalid_argument(format!(
            "node '{}' input '{}' expects {}, got {}",
            type_id,
            pin.name,
            pin.data_type,
            value.type_name()
        )));
    }

    if let (Some((min, max)), NodeValue::Integer(i)) = (pin.range, value) {
        if *i < min || *i > max {
            return Err(LibraryError::invalid_argument(format!(
                "node '{}' input '{}' = {} is outside {}..={}",
                type_id, pin.name, i, min, max
            )));
        }
    }

    if pin.data_type == PinDataType::Enum {
        if let NodeValue::String(s) = value {
            if !pin.options.iter().any(|option| option == s) {
                return Err(LibraryError::invalid_argument(format!(
                    "node '{}' input '{}' must be one of [{}], got '{}'",
                    type_id,
                    pin.name,
                    pin.options.join(", "),
                    s
                )));
            }
        }
    }
    Ok(())
}
