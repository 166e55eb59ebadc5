//! Differences between two graph snapshots.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::module::Module;

/// Modules added, modified and deleted since a previous graph snapshot.
///
/// The three sets are expected to be disjoint. Producing a valid delta is the
/// caller's job; [`DeltaResult::is_partitioned`] only reports violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaResult {
    #[serde(default, with = "crate::modules_serde")]
    pub added: IndexMap<String, Module>,
    #[serde(default, with = "crate::modules_serde")]
    pub modified: IndexMap<String, Module>,
    #[serde(default)]
    pub deleted: IndexSet<String>,
    /// Set when the client must discard its state and reload everything.
    #[serde(default)]
    pub reset: bool,
}

impl DeltaResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, module: Module) -> Self {
        self.added.insert(module.path.clone(), module);
        self
    }

    pub fn modify(mut self, module: Module) -> Self {
        self.modified.insert(module.path.clone(), module);
        self
    }

    pub fn delete(mut self, path: impl Into<String>) -> Self {
        self.deleted.insert(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Paths that appear in more than one of `added`, `modified` and `deleted`.
    pub fn overlapping_paths(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        let mut overlapping = IndexSet::new();

        let all = self
            .added
            .keys()
            .chain(self.modified.keys())
            .chain(self.deleted.iter());
        for path in all {
            if !seen.insert(path.as_str()) {
                overlapping.insert(path.as_str());
            }
        }

        overlapping.into_iter().collect()
    }

    /// Returns true if no path appears in more than one set.
    pub fn is_partitioned(&self) -> bool {
        self.overlapping_paths().is_empty()
    }
}
