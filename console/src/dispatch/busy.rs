//! Set of microservice ids with a lifecycle action in flight

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// The busy set, owned by the dispatcher.
///
/// Ids enter through [`try_acquire`](Self::try_acquire) and leave when the
/// returned guard drops. Renderers only ever see a [`BusyView`].
#[derive(Debug, Clone, Default)]
pub struct BusySet {
    ids: Arc<Mutex<BTreeSet<String>>>,
}

impl BusySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy, or return `None` if it already is
    pub(crate) fn try_acquire(&self, id: &str) -> Option<BusyGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if !ids.insert(id.to_string()) {
            return None;
        }
        Some(BusyGuard {
            set: self.clone(),
            id: id.to_string(),
        })
    }

    fn release(&self, id: &str) {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.remove(id);
    }

    /// Read-only handle for renderers
    pub fn view(&self) -> BusyView {
        BusyView { set: self.clone() }
    }
}

/// Keeps an id busy until dropped
#[derive(Debug)]
pub struct BusyGuard {
    set: BusySet,
    id: String,
}

impl BusyGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.set.release(&self.id);
    }
}

/// Read-only view of the busy set
#[derive(Debug, Clone)]
pub struct BusyView {
    set: BusySet,
}

impl BusyView {
    /// Whether every control for `id` should be disabled
    pub fn is_busy(&self, id: &str) -> bool {
        let ids = self.set.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.contains(id)
    }

    /// Busy ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        let ids = self.set.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        let ids = self.set.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.is_empty()
    }
}
