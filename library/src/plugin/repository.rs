//! Generic plugin repository and registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::plugin::traits::{NodePlugin, Plugin};

/// Generic container for plugins of a specific type, keyed by plugin id.
pub struct PluginRepository<T: ?Sized> {
    pub plugins: BTreeMap<String, Arc<T>>,
}

impl<T: ?Sized + Plugin> PluginRepository<T> {
    pub fn new() -> Self {
        Self {
            plugins: BTreeMap::new(),
        }
    }

    /// Returns the plugin previously registered under the same id, if any.
    pub fn register(&mut self, plugin: Arc<T>) -> Option<Arc<T>> {
        self.plugins.insert(plugin.id().to_string(), plugin)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.plugins.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.plugins.values()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<T: ?Sized + Plugin> Default for PluginRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal registry holding all plugin repositories.
#[derive(Default)]
pub(crate) struct PluginRegistry {
    pub node_plugins: PluginRepository<dyn NodePlugin>,
}
