//! Entity selection set

use crate::types::Handle;

/// An ordered set of selected entity handles.
///
/// Selection order is preserved; selecting an already selected entity
/// does not move it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    handles: Vec<Handle>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Selection::default()
    }

    /// Add a handle to the selection; no-op if already selected
    pub fn select(&mut self, handle: Handle) {
        if !self.contains(handle) {
            self.handles.push(handle);
        }
    }

    /// Remove a handle from the selection; no-op if not selected
    pub fn deselect(&mut self, handle: Handle) {
        self.handles.retain(|h| *h != handle);
    }

    /// Whether a handle is selected
    pub fn contains(&self, handle: Handle) -> bool {
        self.handles.contains(&handle)
    }

    /// Selected handles in selection order
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Number of selected entities
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_preserves_order() {
        let mut sel = Selection::new();
        sel.select(Handle::new(3));
        sel.select(Handle::new(1));
        sel.select(Handle::new(3));
        assert_eq!(sel.handles(), &[Handle::new(3), Handle::new(1)]);
    }

    #[test]
    fn test_deselect() {
        let mut sel = Selection::new();
        sel.select(Handle::new(1));
        sel.select(Handle::new(2));
        sel.deselect(Handle::new(1));
        assert_eq!(sel.handles(), &[Handle::new(2)]);
        sel.deselect(Handle::new(9));
        assert_eq!(sel.len(), 1);
    }
}
