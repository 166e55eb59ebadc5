//! # delta-graph
//!
//! Read-only data model consumed by the delta serializers.
//!
//! This crate holds the module graph snapshot, the added/modified/deleted
//! delta between two snapshots, and the session-scoped module id registry.
//! It does no I/O: graphs are built by the resolver and transform pipeline
//! and handed over fully populated.
//!
//! ## Quick Start
//!
//! ```rust
//! use delta_graph::{CreateModuleId, Graph, Module, ModuleIdRegistry};
//!
//! # fn main() -> Result<(), delta_graph::Error> {
//! let mut graph = Graph::new();
//! graph.add_entry_point("/entry.js");
//! graph.add_module(Module::builder("/entry.js").js_module("__d(function() {});").build());
//! graph.add_module(Module::builder("/a.js").js_module("__d(function() {});").build());
//! graph.add_dependency("/entry.js", "/a.js")?;
//!
//! let ids = ModuleIdRegistry::new();
//! for module in graph.modules() {
//!     ids.create_module_id(&module.path);
//! }
//! assert_eq!(ids.id_of("/a.js")?, 1);
//! # Ok(())
//! # }
//! ```

pub mod delta;
pub mod graph;
pub mod module;
pub mod module_id;

pub use delta::DeltaResult;
pub use graph::Graph;
pub use module::{
    AsyncType, Dependency, MappingSegment, Module, ModuleBuilder, ModuleOutput, OutputData,
    OutputKind, count_lines,
};
pub use module_id::{CreateModuleId, ModuleId, ModuleIdRegistry};

/// Error types for graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A module id was read for a path that never went through id assignment.
    #[error("no module id assigned for path: {path}")]
    UnassignedModuleId { path: String },

    /// A graph edge referenced a module that is not in the graph.
    #[error("module not found in graph: {0}")]
    ModuleNotFound(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

// Serde helper: path-keyed module maps travel as plain module lists.
pub(crate) mod modules_serde {
    use indexmap::IndexMap;
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::Deserialize;

    use crate::Module;

    pub fn serialize<S>(value: &IndexMap<String, Module>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(value.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<String, Module>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let modules = Vec::<Module>::deserialize(deserializer)?;
        Ok(modules
            .into_iter()
            .map(|module| (module.path.clone(), module))
            .collect())
    }
}

#[cfg(test)]
mod tests;
