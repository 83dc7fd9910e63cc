//! Shared selection types for table rows.

use std::collections::HashSet;
use std::hash::Hash;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    Multi,
}

/// Tracks selected rows by their keys.
///
/// Keys rather than positions are stored so a selection survives sorting
/// and page changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Clone + Eq + Hash> {
    pub mode: SelectionMode,
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::none()
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create selection with no selection allowed.
    pub fn none() -> Self {
        Self::with_mode(SelectionMode::None)
    }

    /// Create single-selection mode.
    pub fn single() -> Self {
        Self::with_mode(SelectionMode::Single)
    }

    /// Create multi-selection mode.
    pub fn multi() -> Self {
        Self::with_mode(SelectionMode::Multi)
    }

    /// Create an empty selection in the given mode.
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Toggle selection for a key. Returns true if selection changed.
    pub fn toggle(&mut self, key: K) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(&key) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&key) {
                    self.selected.insert(key);
                }
                true
            }
        }
    }

    /// Select every key in `keys`. Only meaningful in `Multi` mode.
    /// Returns the number of newly selected keys.
    pub fn select_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>) -> usize
    where
        K: 'a,
    {
        if self.mode != SelectionMode::Multi {
            return 0;
        }
        keys.into_iter()
            .filter(|key| self.selected.insert((*key).clone()))
            .count()
    }

    /// Keep only keys for which `keep` returns true.
    /// Returns the number of keys dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(|key| keep(key));
        before - self.selected.len()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Clear all selections. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected keys in the order they appear in `order`.
    ///
    /// The set itself is unordered; callers pass the dataset order to get a
    /// deterministic list.
    pub fn ordered<'a>(&self, order: impl IntoIterator<Item = &'a K>) -> Vec<K>
    where
        K: 'a,
    {
        order
            .into_iter()
            .filter(|key| self.selected.contains(*key))
            .cloned()
            .collect()
    }
}
