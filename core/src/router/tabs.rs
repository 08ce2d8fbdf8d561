//! Multi-tab router state
//!
//! One [`RouteStack`] per configured tab plus the selected tab. Push and pop
//! always act on the selected tab's stack; switching tabs never touches a
//! stack. This type is plain state: locking, notification and deferred
//! pushes live in [`RouterHandle`](super::RouterHandle).

use super::route::{EntryId, NavigationRoute, StackEntry, TabId};
use super::stack::{RouteStack, StackChange};
use crate::error::RouterError;
use serde::Serialize;
use std::collections::HashSet;

/// Type alias for router operation results
pub type RouterResult<T> = Result<T, RouterError>;

/// Outcome of a tab switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSwitch {
    /// The selection moved from `from` to the requested tab
    Switched { from: TabId },
    /// The requested tab was already selected
    AlreadySelected,
}

/// Configuration for the tab router
#[derive(Debug, Clone)]
pub struct TabRouterConfig<R> {
    /// Tabs in display order, each with its root route
    pub tabs: Vec<(TabId, R)>,
    /// Routes that may be pushed besides the tab roots
    pub routes: HashSet<R>,
    /// Tab selected at start; the first tab when unset
    pub initial_tab: Option<TabId>,
}

impl<R: NavigationRoute> TabRouterConfig<R> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            routes: HashSet::new(),
            initial_tab: None,
        }
    }

    /// Add a tab and its root route
    pub fn add_tab(mut self, tab: impl Into<TabId>, root: R) -> Self {
        self.tabs.push((tab.into(), root));
        self
    }

    /// Register a pushable route
    pub fn add_route(mut self, route: R) -> Self {
        self.routes.insert(route);
        self
    }

    /// Set the initially selected tab
    pub fn with_initial_tab(mut self, tab: impl Into<TabId>) -> Self {
        self.initial_tab = Some(tab.into());
        self
    }
}

impl<R: NavigationRoute> Default for TabRouterConfig<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct Tab<R> {
    id: TabId,
    stack: RouteStack<R>,
}

/// Stacks for a fixed set of tabs and the current selection
#[derive(Debug, Clone)]
pub struct TabRouter<R> {
    tabs: Vec<Tab<R>>,
    routes: HashSet<R>,
    selected: usize,
}

impl<R: NavigationRoute> TabRouter<R> {
    /// Create a router with one stack per configured tab
    pub fn new(config: TabRouterConfig<R>) -> RouterResult<Self> {
        if config.tabs.is_empty() {
            return Err(RouterError::NoTabs);
        }

        let mut routes = config.routes;
        let mut tabs: Vec<Tab<R>> = Vec::with_capacity(config.tabs.len());
        for (id, root) in config.tabs {
            if tabs.iter().any(|tab| tab.id == id) {
                return Err(RouterError::DuplicateTab(id.0));
            }
            routes.insert(root.clone());
            tabs.push(Tab {
                id,
                stack: RouteStack::new(root),
            });
        }

        let selected = match &config.initial_tab {
            Some(initial) => tabs
                .iter()
                .position(|tab| &tab.id == initial)
                .ok_or_else(|| RouterError::InitialTabMissing(initial.0.clone()))?,
            None => 0,
        };

        Ok(Self {
            tabs,
            routes,
            selected,
        })
    }

    /// Push onto the selected tab's stack
    pub fn push(&mut self, route: R) -> RouterResult<StackChange> {
        self.ensure_registered(&route)?;
        Ok(self.tabs[self.selected].stack.push(route))
    }

    /// Push onto a specific tab's stack without changing the selection
    pub fn push_to(&mut self, tab: &TabId, route: R) -> RouterResult<StackChange> {
        self.ensure_registered(&route)?;
        let index = self.index_of(tab)?;
        Ok(self.tabs[index].stack.push(route))
    }

    /// Pop the selected tab's stack; the root is never removed
    pub fn pop(&mut self) -> StackChange {
        self.tabs[self.selected].stack.pop()
    }

    /// Collapse the selected tab's stack to its root
    pub fn pop_to_root(&mut self) -> StackChange {
        self.tabs[self.selected].stack.pop_to_root()
    }

    /// Select another tab. Stacks are left untouched.
    pub fn switch_tab(&mut self, tab: &TabId) -> RouterResult<TabSwitch> {
        let index = self.index_of(tab)?;
        if index == self.selected {
            return Ok(TabSwitch::AlreadySelected);
        }

        let from = self.tabs[self.selected].id.clone();
        self.selected = index;
        tracing::debug!("Switched tab '{}' -> '{}'", from, tab);
        Ok(TabSwitch::Switched { from })
    }

    pub fn selected_tab(&self) -> &TabId {
        &self.tabs[self.selected].id
    }

    /// Stack of the selected tab
    pub fn active_stack(&self) -> &RouteStack<R> {
        &self.tabs[self.selected].stack
    }

    pub fn stack(&self, tab: &TabId) -> Option<&RouteStack<R>> {
        self.tabs.iter().find(|t| &t.id == tab).map(|t| &t.stack)
    }

    /// Tab ids in configuration order
    pub fn tab_ids(&self) -> impl Iterator<Item = &TabId> {
        self.tabs.iter().map(|tab| &tab.id)
    }

    pub fn contains_tab(&self, tab: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == tab)
    }

    /// Whether `route` may be pushed
    pub fn is_registered(&self, route: &R) -> bool {
        self.routes.contains(route)
    }

    pub fn registered_routes(&self) -> impl Iterator<Item = &R> {
        self.routes.iter()
    }

    /// Visible entry of the selected tab
    pub fn current_entry(&self) -> &StackEntry<R> {
        self.active_stack().top()
    }

    /// Find the tab and index holding a specific entry
    pub fn locate(&self, id: EntryId) -> Option<(TabId, usize)> {
        self.tabs.iter().find_map(|tab| {
            tab.stack
                .position(id)
                .map(|index| (tab.id.clone(), index))
        })
    }

    /// Copy of every stack and the selection
    pub fn snapshot(&self) -> RouterSnapshot<R> {
        RouterSnapshot {
            selected: self.selected_tab().clone(),
            tabs: self
                .tabs
                .iter()
                .map(|tab| TabSnapshot {
                    tab: tab.id.clone(),
                    entries: tab.stack.entries().to_vec(),
                })
                .collect(),
        }
    }

    fn index_of(&self, tab: &TabId) -> RouterResult<usize> {
        self.tabs
            .iter()
            .position(|t| &t.id == tab)
            .ok_or_else(|| {
                tracing::warn!("Unknown tab '{}'", tab);
                RouterError::UnknownTab(tab.0.clone())
            })
    }

    fn ensure_registered(&self, route: &R) -> RouterResult<()> {
        if self.routes.contains(route) {
            Ok(())
        } else {
            tracing::warn!("Rejected push of unregistered route '{}'", route);
            Err(RouterError::UnregisteredRoute(route.to_string()))
        }
    }
}

/// Point-in-time copy of one tab's stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSnapshot<R> {
    pub tab: TabId,
    pub entries: Vec<StackEntry<R>>,
}

/// Point-in-time copy of the whole router, handed to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterSnapshot<R> {
    pub selected: TabId,
    pub tabs: Vec<TabSnapshot<R>>,
}

impl<R: NavigationRoute> RouterSnapshot<R> {
    /// Entries of one tab
    pub fn stack(&self, tab: &TabId) -> Option<&[StackEntry<R>]> {
        self.tabs
            .iter()
            .find(|snapshot| &snapshot.tab == tab)
            .map(|snapshot| snapshot.entries.as_slice())
    }

    /// Routes of one tab, root first
    pub fn routes(&self, tab: &TabId) -> Vec<R> {
        self.stack(tab)
            .map(|entries| entries.iter().map(|entry| entry.route.clone()).collect())
            .unwrap_or_default()
    }

    /// Visible entry of the selected tab
    pub fn visible(&self) -> Option<&StackEntry<R>> {
        self.stack(&self.selected).and_then(|entries| entries.last())
    }
}
