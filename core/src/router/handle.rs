//! Shareable, observable handle to a tab router
//!
//! The handle owns the router state behind a mutex, notifies subscribers with
//! a fresh snapshot after each mutation and schedules deferred cross-tab
//! pushes. Deferred continuations only hold a weak reference, so a push that
//! fires after the last handle is dropped is discarded.

use super::notify::{ChangeNotifier, Subscription};
use super::route::{EntryId, NavigationRoute, TabId};
use super::stack::StackChange;
use super::tabs::{RouterResult, RouterSnapshot, TabRouter, TabSwitch};
use crate::error::RouterError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

struct Shared<R> {
    router: Mutex<TabRouter<R>>,
    notifier: ChangeNotifier<RouterSnapshot<R>>,
}

/// A shareable, UI-friendly handle to control the router
pub struct RouterHandle<R>(Arc<Shared<R>>);

impl<R> Clone for RouterHandle<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R: NavigationRoute> RouterHandle<R> {
    /// Create a new router handle
    pub fn new(router: TabRouter<R>) -> Self {
        Self(Arc::new(Shared {
            router: Mutex::new(router),
            notifier: ChangeNotifier::new(),
        }))
    }

    fn lock(&self) -> MutexGuard<'_, TabRouter<R>> {
        self.0.router.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a mutation and notify observers if it reports a change.
    ///
    /// The snapshot is queued under the lock, so observers see snapshots in
    /// mutation order even when mutations race across threads. Callbacks run
    /// after the lock is released.
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut TabRouter<R>) -> RouterResult<(bool, T)>,
    ) -> RouterResult<T> {
        let value = {
            let mut guard = self.lock();
            let (changed, value) = op(&mut guard)?;
            if changed {
                self.0.notifier.post(guard.snapshot());
            }
            value
        };

        self.0.notifier.deliver();
        Ok(value)
    }

    /// Push a route onto the selected tab
    pub fn push(&self, route: R) -> RouterResult<StackChange> {
        self.mutate(|router| {
            let change = router.push(route)?;
            Ok((change.is_mutation(), change))
        })
    }

    /// Push a route onto a specific tab, leaving the selection alone
    pub fn push_to(&self, tab: &TabId, route: R) -> RouterResult<StackChange> {
        self.mutate(|router| {
            let change = router.push_to(tab, route)?;
            Ok((change.is_mutation(), change))
        })
    }

    /// Pop the selected tab. Popping the root is a no-op.
    pub fn pop(&self) -> StackChange {
        self.mutate(|router| {
            let change = router.pop();
            Ok((change.is_mutation(), change))
        })
        .unwrap_or(StackChange::Unchanged)
    }

    /// Collapse the selected tab to its root route
    pub fn pop_to_root(&self) -> StackChange {
        self.mutate(|router| {
            let change = router.pop_to_root();
            Ok((change.is_mutation(), change))
        })
        .unwrap_or(StackChange::Unchanged)
    }

    /// Select a tab
    pub fn switch_tab(&self, tab: impl Into<TabId>) -> RouterResult<TabSwitch> {
        let tab = tab.into();
        self.mutate(|router| {
            let switch = router.switch_tab(&tab)?;
            Ok((matches!(switch, TabSwitch::Switched { .. }), switch))
        })
    }

    /// Select `tab`, then push `route` onto it once `after` has elapsed.
    ///
    /// Both the tab and the route are validated before anything changes. The
    /// push is bound to `tab` when it is scheduled: if the selection moves to
    /// another tab during the delay, the push still lands on `tab` rather than
    /// on whichever tab is selected when the timer fires. Outside a tokio
    /// runtime the push is applied immediately.
    pub fn switch_tab_and_then_push(
        &self,
        tab: impl Into<TabId>,
        route: R,
        after: Duration,
    ) -> RouterResult<DeferredPush> {
        let tab = tab.into();
        self.mutate(|router| {
            if !router.is_registered(&route) {
                tracing::warn!("Rejected handoff of unregistered route '{}'", route);
                return Err(RouterError::UnregisteredRoute(route.to_string()));
            }
            let switch = router.switch_tab(&tab)?;
            Ok((matches!(switch, TabSwitch::Switched { .. }), ()))
        })?;

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::debug!("No async runtime, pushing '{}' onto '{}' now", route, tab);
                let change = self.push_to(&tab, route)?;
                return Ok(DeferredPush::finished(change.is_mutation()));
            }
        };

        tracing::debug!(
            "Scheduled push of '{}' onto '{}' in {}ms",
            route,
            tab,
            after.as_millis()
        );
        let weak = self.downgrade();
        let task = runtime.spawn(async move {
            tokio::time::sleep(after).await;

            let Some(router) = weak.upgrade() else {
                tracing::debug!("Dropped stale deferred push of '{}'", route);
                return false;
            };

            match router.push_to(&tab, route) {
                Ok(change) => change.is_mutation(),
                Err(e) => {
                    tracing::warn!("Deferred push failed: {}", e);
                    false
                }
            }
        });

        Ok(DeferredPush::scheduled(task))
    }

    /// Subscribe to snapshots taken after every mutation
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&RouterSnapshot<R>) + Send + Sync + 'static,
    {
        self.0.notifier.subscribe(callback)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> RouterSnapshot<R> {
        self.lock().snapshot()
    }

    /// Get the selected tab
    pub fn selected_tab(&self) -> TabId {
        self.lock().selected_tab().clone()
    }

    /// Get the route visible on the selected tab
    pub fn current_route(&self) -> R {
        self.lock().current_entry().route.clone()
    }

    /// Check if the selected tab can pop
    pub fn can_pop(&self) -> bool {
        self.lock().active_stack().can_pop()
    }

    /// Find the tab and index of a specific entry
    pub fn locate(&self, id: EntryId) -> Option<(TabId, usize)> {
        self.lock().locate(id)
    }

    /// Tab ids in configuration order
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.lock().tab_ids().cloned().collect()
    }

    /// Read the router state under the lock
    pub fn with_router<T>(&self, f: impl FnOnce(&TabRouter<R>) -> T) -> T {
        f(&self.lock())
    }

    /// Non-owning reference to this router
    pub fn downgrade(&self) -> WeakRouterHandle<R> {
        WeakRouterHandle(Arc::downgrade(&self.0))
    }
}

/// Weak reference to a router, used by deferred continuations
pub struct WeakRouterHandle<R>(Weak<Shared<R>>);

impl<R> Clone for WeakRouterHandle<R> {
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}

impl<R: NavigationRoute> WeakRouterHandle<R> {
    /// The router, if any strong handle is still alive
    pub fn upgrade(&self) -> Option<RouterHandle<R>> {
        self.0.upgrade().map(RouterHandle)
    }
}

enum DeferredState {
    Scheduled(JoinHandle<bool>),
    Finished(bool),
}

/// Handle to the follow-up push of a tab handoff
pub struct DeferredPush {
    state: DeferredState,
}

impl DeferredPush {
    fn scheduled(task: JoinHandle<bool>) -> Self {
        Self {
            state: DeferredState::Scheduled(task),
        }
    }

    fn finished(applied: bool) -> Self {
        Self {
            state: DeferredState::Finished(applied),
        }
    }

    /// Cancel the push if it has not fired yet
    pub fn cancel(&self) {
        if let DeferredState::Scheduled(task) = &self.state {
            if !task.is_finished() {
                tracing::debug!("Cancelled deferred push");
                task.abort();
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            DeferredState::Scheduled(task) => task.is_finished(),
            DeferredState::Finished(_) => true,
        }
    }

    /// Wait for the push; true when it changed a stack
    pub async fn completed(self) -> bool {
        match self.state {
            DeferredState::Scheduled(task) => task.await.unwrap_or(false),
            DeferredState::Finished(applied) => applied,
        }
    }
}

impl std::fmt::Debug for DeferredPush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredPush")
            .field("finished", &self.is_finished())
            .finish()
    }
}
