pub mod builtin;
pub mod error;
pub mod io;
pub mod model;
pub mod plugin;
pub mod selection;
pub mod text;
pub mod util;

pub use error::LibraryError;
pub use model::{Image, NodeValue, PixelLayout};
pub use plugin::{ExecutionContext, NodePlugin, NodeTypeDefinition, Plugin, PluginManager};

/// A manager with every built-in node registered.
pub fn create_plugin_manager() -> Result<PluginManager, LibraryError> {
    let manager = PluginManager::new();
    builtin::register_builtin_nodes(&manager)?;
    Ok(manager)
}
