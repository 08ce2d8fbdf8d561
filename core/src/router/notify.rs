//! Change notification for router observers
//!
//! Observers register a callback and receive a reference to a fresh snapshot
//! after every mutation. Snapshots are queued with [`ChangeNotifier::post`]
//! and handed out by [`ChangeNotifier::deliver`], one thread at a time and in
//! the order they were posted. Callbacks run without any router lock held, so
//! a callback may call back into the router; snapshots it causes are delivered
//! once it returns.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Listeners<T> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(u64, Callback<T>)>>,
}

struct Outbox<T> {
    pending: VecDeque<T>,
    draining: bool,
}

/// Clears the draining flag if a callback panics
struct DrainGuard<'a, T>(&'a Mutex<Outbox<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draining = false;
    }
}

/// Fan-out of snapshots to registered observers
pub struct ChangeNotifier<T> {
    listeners: Arc<Listeners<T>>,
    outbox: Mutex<Outbox<T>>,
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Listeners {
                next_id: AtomicU64::new(0),
                callbacks: Mutex::new(Vec::new()),
            }),
            outbox: Mutex::new(Outbox {
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }

    fn outbox(&self) -> MutexGuard<'_, Outbox<T>> {
        self.outbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a callback. It stays registered until the returned
    /// subscription is cancelled or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: 'static,
    {
        let id = self.listeners.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));

        let weak: Weak<Listeners<T>> = Arc::downgrade(&self.listeners);
        let weak: Weak<dyn Unsubscribe> = weak;
        Subscription {
            id,
            listeners: Some(weak),
        }
    }

    /// Queue a snapshot.
    ///
    /// Call this while still holding the lock that serialises mutations, so
    /// the queue order is the mutation order.
    pub fn post(&self, value: T) {
        self.outbox().pending.push_back(value);
    }

    /// Deliver queued snapshots in order.
    ///
    /// If another thread, or an outer call on this thread, is already
    /// delivering, this returns at once and that caller delivers the queue.
    pub fn deliver(&self) {
        {
            let mut outbox = self.outbox();
            if outbox.draining {
                return;
            }
            outbox.draining = true;
        }
        let guard = DrainGuard(&self.outbox);

        loop {
            let next = {
                let mut outbox = self.outbox();
                let next = outbox.pending.pop_front();
                if next.is_none() {
                    // Release under the same lock that saw the queue empty.
                    outbox.draining = false;
                }
                next
            };
            match next {
                Some(value) => self.dispatch(&value),
                None => {
                    std::mem::forget(guard);
                    return;
                }
            }
        }
    }

    /// Queue a snapshot and deliver it
    pub fn notify(&self, value: T) {
        self.post(value);
        self.deliver();
    }

    fn dispatch(&self, value: &T) {
        // Clone the list so callbacks may subscribe or cancel while running.
        let callbacks: Vec<Callback<T>> = self
            .listeners
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64);
}

impl<T> Unsubscribe for Listeners<T> {
    fn unsubscribe(&self, id: u64) {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }
}

/// Registration handle returned by `subscribe`.
///
/// Dropping it cancels the registration; call [`Subscription::detach`] to keep
/// the callback for the lifetime of the notifier.
pub struct Subscription {
    id: u64,
    listeners: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn cancel(mut self) {
        self.release();
    }

    /// Keep the callback registered without holding the handle
    pub fn detach(mut self) {
        self.listeners = None;
    }

    fn release(&mut self) {
        if let Some(listeners) = self.listeners.take().and_then(|weak| weak.upgrade()) {
            listeners.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.listeners.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_reaches_subscribers_in_order() {
        let notifier = ChangeNotifier::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            notifier.subscribe(move |value| seen.lock().unwrap().push(("first", *value)))
        };
        let second = {
            let seen = Arc::clone(&seen);
            notifier.subscribe(move |value| seen.lock().unwrap().push(("second", *value)))
        };

        notifier.notify(7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn test_nested_notify_waits_for_current_delivery() {
        let notifier = Arc::new(ChangeNotifier::<u32>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _subscription = {
            let seen = Arc::clone(&seen);
            let inner = Arc::downgrade(&notifier);
            notifier.subscribe(move |value: &u32| {
                seen.lock().unwrap().push(("start", *value));
                if *value == 1 {
                    if let Some(notifier) = inner.upgrade() {
                        notifier.notify(2);
                    }
                }
                seen.lock().unwrap().push(("end", *value));
            })
        };

        notifier.notify(1);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("start", 1), ("end", 1), ("start", 2), ("end", 2)]
        );
    }

    #[test]
    fn test_posted_values_wait_for_deliver() {
        let notifier = ChangeNotifier::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _subscription = {
            let seen = Arc::clone(&seen);
            notifier.subscribe(move |value: &u32| seen.lock().unwrap().push(*value))
        };

        notifier.post(1);
        notifier.post(2);
        assert!(seen.lock().unwrap().is_empty());

        notifier.deliver();
        notifier.deliver();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_cancel_stops_delivery() {
        let notifier = ChangeNotifier::<u32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let count = Arc::clone(&count);
            notifier.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        notifier.notify(1);
        subscription.cancel();
        notifier.notify(2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_cancels_but_detach_keeps() {
        let notifier = ChangeNotifier::<u32>::new();

        drop(notifier.subscribe(|_| {}));
        assert_eq!(notifier.subscriber_count(), 0);

        notifier.subscribe(|_| {}).detach();
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier_is_harmless() {
        let notifier = ChangeNotifier::<u32>::new();
        let subscription = notifier.subscribe(|_| {});
        drop(notifier);
        subscription.cancel();
    }
}
