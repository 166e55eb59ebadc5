//! Minimal inverse-dependency closure for a changed module.
//!
//! Instead of shipping the whole inverse-dependency graph with each hot
//! update, only the part reachable upwards from the changed module is sent.

use std::collections::BTreeMap;

use delta_graph::{CreateModuleId, Graph, ModuleId};
use indexmap::IndexMap;

/// Path-keyed closure: every visited module mapped to its direct dependents.
pub type InverseDependencies<'g> = IndexMap<&'g str, Vec<&'g str>>;

/// Collect `path` and every module that transitively imports it.
///
/// Each visited module maps to its direct inverse dependencies. Modules are
/// expanded at most once, so cycles terminate, and paths that are no longer
/// in the graph contribute nothing. Keys follow depth-first preorder.
pub fn resolve_inverse_dependencies<'g>(path: &str, graph: &'g Graph) -> InverseDependencies<'g> {
    let mut resolved: InverseDependencies<'g> = IndexMap::new();
    let Some(start) = graph.get(path) else {
        return resolved;
    };

    let mut stack: Vec<&'g str> = vec![start.path.as_str()];
    while let Some(current) = stack.pop() {
        if resolved.contains_key(current) {
            continue;
        }
        let Some(module) = graph.get(current) else {
            continue;
        };

        let inverse: Vec<&'g str> = module
            .inverse_dependencies
            .iter()
            .map(String::as_str)
            .collect();
        // Reverse so the first dependent is expanded first.
        stack.extend(inverse.iter().rev().copied());
        resolved.insert(module.path.as_str(), inverse);
    }

    resolved
}

/// Translate a path-keyed closure to ids, ordered by id.
pub fn inverse_dependencies_by_id(
    inverse: &InverseDependencies<'_>,
    ids: &dyn CreateModuleId,
) -> BTreeMap<ModuleId, Vec<ModuleId>> {
    inverse
        .iter()
        .map(|(path, dependents)| {
            let dependents = dependents
                .iter()
                .map(|dependent| ids.create_module_id(dependent))
                .collect();
            (ids.create_module_id(path), dependents)
        })
        .collect()
}
