//! Module graph snapshot.
//!
//! The graph is built and mutated by the dependency resolver. Serializers only
//! ever see `&Graph`, so a snapshot stays immutable for the duration of one
//! bundle or hot-update call.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::module::{AsyncType, Dependency, Module};
use crate::{Error, Result};

/// Mapping from module path to module, plus the graph's entry points.
///
/// Iteration follows insertion order. That order carries no meaning for the
/// serializers, which impose their own ordering through module ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    #[serde(default)]
    pub entry_points: IndexSet<String>,
    #[serde(default, with = "crate::modules_serde")]
    pub dependencies: IndexMap<String, Module>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry point path.
    pub fn add_entry_point(&mut self, path: impl Into<String>) {
        self.entry_points.insert(path.into());
    }

    /// Insert a module, replacing any module previously stored at the same path.
    pub fn add_module(&mut self, module: Module) -> Option<Module> {
        self.dependencies.insert(module.path.clone(), module)
    }

    /// Remove a module without touching the edges that point at it.
    ///
    /// Dependents keep listing the removed path until they are re-resolved,
    /// which is the transient state incremental updates go through.
    pub fn remove_module(&mut self, path: &str) -> Option<Module> {
        self.dependencies.shift_remove(path)
    }

    /// Add a synchronous dependency edge `from -> to`, keyed by `to`'s path.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<()> {
        self.link(from, to, Dependency::resolved(to))
    }

    /// Add an async (`import()`), prefetch or weak dependency edge.
    pub fn add_async_dependency(&mut self, from: &str, to: &str, async_type: AsyncType) -> Result<()> {
        self.link(from, to, Dependency::resolved(to).with_async_type(async_type))
    }

    fn link(&mut self, from: &str, to: &str, dependency: Dependency) -> Result<()> {
        if !self.dependencies.contains_key(to) {
            return Err(Error::ModuleNotFound(to.to_string()));
        }

        let importer = self
            .dependencies
            .get_mut(from)
            .ok_or_else(|| Error::ModuleNotFound(from.to_string()))?;
        importer.dependencies.insert(to.to_string(), dependency);

        if let Some(imported) = self.dependencies.get_mut(to) {
            imported.inverse_dependencies.insert(from.to_string());
        }

        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Module> {
        self.dependencies.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.dependencies.contains_key(path)
    }

    /// Iterate over all modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.dependencies.values()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
