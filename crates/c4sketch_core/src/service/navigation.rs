//! Drill-down navigation history.
//!
//! # Invariants
//! - An element appears at most once in the stack.
//! - Pushing an element already on the stack moves it to the top.

use crate::model::element::ElementId;

/// Ordered history of entered views, most recently entered last.
///
/// An empty stack means the root view is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<ElementId>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `id`, removing any earlier occurrence first.
    pub fn push(&mut self, id: ElementId) {
        if let Some(index) = self.entries.iter().position(|entry| *entry == id) {
            self.entries.remove(index);
        }
        self.entries.push(id);
    }

    /// Removes and returns the most recently entered view.
    pub fn pop(&mut self) -> Option<ElementId> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<ElementId> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from the first entered view to the active one.
    pub fn as_slice(&self) -> &[ElementId] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationStack;
    use uuid::Uuid;

    #[test]
    fn push_moves_existing_entry_to_top() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut stack = NavigationStack::new();
        stack.push(a);
        stack.push(b);
        stack.push(c);

        stack.push(a);

        assert_eq!(stack.as_slice(), &[b, c, a]);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.top(), Some(a));
    }

    #[test]
    fn pushing_top_again_is_noop() {
        let a = Uuid::new_v4();
        let mut stack = NavigationStack::new();
        stack.push(a);
        stack.push(a);
        assert_eq!(stack.as_slice(), &[a]);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
    }
}
