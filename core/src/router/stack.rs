//! Ordered navigation history for a single navigation context
//!
//! Index 0 is the root, the last entry is the visible screen. A stack is
//! never empty: it is built with its root entry and the root cannot be popped.

use super::route::{EntryId, NavigationRoute, StackEntry};
use serde::Serialize;

/// Outcome of a stack operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackChange {
    /// A new entry was appended
    Pushed(EntryId),
    /// The route was already on top; nothing changed
    DuplicateSuppressed,
    /// The top entry was removed
    Popped(EntryId),
    /// Pop was requested on the root entry; nothing changed
    RootGuarded,
    /// The stack was collapsed to a fresh root entry
    ResetToRoot { removed: usize },
    /// Nothing to do
    Unchanged,
}

impl StackChange {
    /// Whether the stack contents changed
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StackChange::Pushed(_) | StackChange::Popped(_) | StackChange::ResetToRoot { .. }
        )
    }
}

/// Navigation history for one tab
#[derive(Debug, Clone)]
pub struct RouteStack<R> {
    entries: Vec<StackEntry<R>>,
    /// Route the stack was constructed with
    root_route: R,
}

impl<R: NavigationRoute> RouteStack<R> {
    /// Create a stack holding exactly one entry for `root`
    pub fn new(root: R) -> Self {
        Self {
            entries: vec![StackEntry::new(root.clone())],
            root_route: root,
        }
    }

    /// Push a route unless it is already the visible one.
    ///
    /// Only the immediate top is compared: `A, B, A` yields three entries.
    pub fn push(&mut self, route: R) -> StackChange {
        if self.top().route == route {
            tracing::debug!("Suppressed duplicate push of '{}'", route);
            return StackChange::DuplicateSuppressed;
        }

        let entry = StackEntry::new(route);
        let id = entry.id;
        tracing::debug!("Pushed '{}' ({}) at depth {}", entry.route, id, self.entries.len());
        self.entries.push(entry);
        StackChange::Pushed(id)
    }

    /// Remove the top entry. Popping the root is a no-op.
    pub fn pop(&mut self) -> StackChange {
        if self.entries.len() <= 1 {
            tracing::debug!("Ignored pop on root '{}'", self.root_route);
            return StackChange::RootGuarded;
        }

        match self.entries.pop() {
            Some(entry) => {
                tracing::debug!("Popped '{}' ({})", entry.route, entry.id);
                StackChange::Popped(entry.id)
            }
            None => StackChange::Unchanged,
        }
    }

    /// Collapse to a single fresh entry for the construction-time root route
    pub fn pop_to_root(&mut self) -> StackChange {
        if self.entries.len() == 1 {
            return StackChange::Unchanged;
        }

        let removed = self.entries.len() - 1;
        self.entries = vec![StackEntry::new(self.root_route.clone())];
        tracing::debug!("Reset to root '{}' ({} removed)", self.root_route, removed);
        StackChange::ResetToRoot { removed }
    }

    /// The visible entry
    pub fn top(&self) -> &StackEntry<R> {
        // Invariant: never empty.
        &self.entries[self.entries.len() - 1]
    }

    /// The root entry
    pub fn root(&self) -> &StackEntry<R> {
        &self.entries[0]
    }

    /// Route the stack was constructed with
    pub fn root_route(&self) -> &R {
        &self.root_route
    }

    pub fn entries(&self) -> &[StackEntry<R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a pop would remove an entry
    pub fn can_pop(&self) -> bool {
        self.entries.len() > 1
    }

    /// Index of a specific occurrence
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Look up a specific occurrence
    pub fn entry(&self, id: EntryId) -> Option<&StackEntry<R>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Routes from root to top
    pub fn routes(&self) -> impl Iterator<Item = &R> {
        self.entries.iter().map(|entry| &entry.route)
    }

    /// Copy of the current entries
    pub fn snapshot(&self) -> StackSnapshot<R> {
        StackSnapshot {
            entries: self.entries.clone(),
        }
    }
}

/// Point-in-time copy of a stack, handed to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSnapshot<R> {
    pub entries: Vec<StackEntry<R>>,
}

impl<R: NavigationRoute> StackSnapshot<R> {
    pub fn top(&self) -> Option<&StackEntry<R>> {
        self.entries.last()
    }

    pub fn routes(&self) -> Vec<R> {
        self.entries.iter().map(|entry| entry.route.clone()).collect()
    }
}
