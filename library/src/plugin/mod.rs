pub mod context;
pub mod manager;
pub mod node_types;
pub mod repository;
pub mod traits;

pub use self::context::ExecutionContext;
pub use self::manager::PluginManager;
pub use self::node_types::{NodeCategory, NodeTypeDefinition};
pub use self::repository::PluginRepository;
pub use self::traits::{NodePlugin, Plugin};
