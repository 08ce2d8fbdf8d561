//! Generic single-stack router
//!
//! A router over one [`RouteStack`] for screens that are not organised in
//! tabs. Mutations are broadcast to subscribers as [`StackSnapshot`]s and the
//! stack can be laid out for a slide transition with [`StackRouter::layout`].

use super::notify::{ChangeNotifier, Subscription};
use super::presentation::{layout_stack, EntryLayout};
use super::route::NavigationRoute;
use super::stack::{RouteStack, StackChange, StackSnapshot};

pub struct StackRouter<R> {
    stack: RouteStack<R>,
    notifier: ChangeNotifier<StackSnapshot<R>>,
}

impl<R: NavigationRoute> StackRouter<R> {
    /// Create a router showing `initial_route`
    pub fn new(initial_route: R) -> Self {
        Self {
            stack: RouteStack::new(initial_route),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn push(&mut self, route: R) -> StackChange {
        let change = self.stack.push(route);
        self.publish(change)
    }

    /// Pop the top entry; the root stays
    pub fn pop(&mut self) -> StackChange {
        let change = self.stack.pop();
        self.publish(change)
    }

    pub fn pop_to_root(&mut self) -> StackChange {
        let change = self.stack.pop_to_root();
        self.publish(change)
    }

    pub fn stack(&self) -> &RouteStack<R> {
        &self.stack
    }

    pub fn current_route(&self) -> &R {
        &self.stack.top().route
    }

    /// Subscribe to snapshots taken after every mutation
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StackSnapshot<R>) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Per-entry placement for the current stack
    pub fn layout(&self) -> Vec<EntryLayout<R>> {
        layout_stack(self.stack.entries())
    }

    fn publish(&self, change: StackChange) -> StackChange {
        if change.is_mutation() {
            self.notifier.notify(self.stack.snapshot());
        }
        change
    }
}
