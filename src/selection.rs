//! Selected activity identifiers
//!
//! Iteration order is insertion order; generation snapshots it as-is.

/// Set of activity ids the user has toggled on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn add(&mut self, id: u32) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: u32) {
        self.ids.retain(|&i| i != id);
    }

    pub fn toggle(&mut self, id: u32) {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
    }

    /// Union with the visible ids; hidden items are left untouched
    pub fn select_all(&mut self, visible_ids: &[u32]) {
        for &id in visible_ids {
            self.add(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }
}
