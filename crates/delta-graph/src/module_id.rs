//! Module id assignment.
//!
//! Every module path maps to a small integer that stays stable for a build
//! session. Ids are handed out lazily on first reference and reused after
//! that. The registry is an explicit value owned by the caller: two sessions
//! (or two tests) never share ids unless they share a registry.

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::{Error, Result};

/// Numeric module identifier used in bundles and hot updates.
pub type ModuleId = u32;

/// Source of module ids for the serializers.
///
/// Implementations must be referentially stable: the same path always yields
/// the same id for the lifetime of the session.
pub trait CreateModuleId: Send + Sync {
    /// Return the id for `path`, assigning a new one on first sight.
    fn create_module_id(&self, path: &str) -> ModuleId;

    /// Return the id previously assigned to `path`, without assigning.
    fn lookup(&self, path: &str) -> Option<ModuleId>;

    /// Like [`lookup`](Self::lookup), but an unassigned path is an error.
    fn id_of(&self, path: &str) -> Result<ModuleId> {
        self.lookup(path).ok_or_else(|| Error::UnassignedModuleId {
            path: path.to_string(),
        })
    }
}

/// Sequential, session-scoped path to id cache.
///
/// Ids start at zero and increase in first-seen order. Safe to share across
/// threads; all access goes through a single lock.
#[derive(Debug, Default)]
pub struct ModuleIdRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    ids: HashMap<String, ModuleId>,
    next: ModuleId,
}

impl ModuleIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths that have an id.
    pub fn len(&self) -> usize {
        self.inner.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().ids.is_empty()
    }

    /// Forget every assignment. Used when the session restarts or the
    /// project root changes.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.ids.clear();
        inner.next = 0;
    }

    /// All assignments, ordered by id.
    pub fn snapshot(&self) -> Vec<(String, ModuleId)> {
        let inner = self.inner.lock();
        let mut entries: Vec<_> = inner
            .ids
            .iter()
            .map(|(path, id)| (path.clone(), *id))
            .collect();
        entries.sort_by_key(|(_, id)| *id);
        entries
    }
}

impl CreateModuleId for ModuleIdRegistry {
    fn create_module_id(&self, path: &str) -> ModuleId {
        let mut inner = self.inner.lock();
        if let Some(id) = inner.ids.get(path) {
            return *id;
        }

        let id = inner.next;
        inner.next += 1;
        inner.ids.insert(path.to_string(), id);
        id
    }

    fn lookup(&self, path: &str) -> Option<ModuleId> {
        self.inner.lock().ids.get(path).copied()
    }
}
