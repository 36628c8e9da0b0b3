//! Observable values shared between the navigation core and its observers.
//!
//! A [`State`] is a cheap, cloneable handle. Every clone observes the same
//! value, and subscribers are called synchronously, in subscription order,
//! each time the owner stores a new value. No lock is held while a
//! subscriber runs, so subscribers may read the state or subscribe others.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`State::subscribe`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: RwLock<T>,
    listeners: RwLock<Vec<(SubscriptionId, Listener<T>)>>,
    next_subscription: AtomicU64,
}

/// An observable value.
pub struct State<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &*self.inner.value.read())
            .field("listeners", &self.inner.listeners.read().len())
            .finish()
    }
}

impl<T> State<T>
where
    T: Send + Sync + 'static,
{
    /// Create a state holding `value`, with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                listeners: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
            }),
        }
    }

    /// Execute a closure with a shared reference to the value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.read())
    }

    /// Get a cloned value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Register a listener called after every update.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    /// Store a value and notify every listener before returning.
    pub(crate) fn set(&self, value: T)
    where
        T: Clone,
    {
        *self.inner.value.write() = value.clone();
        let listeners: Vec<_> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use parking_lot::Mutex;

    use super::State;

    #[test]
    fn listeners_run_synchronously_in_order() {
        let state = State::new(0);
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        state.subscribe(move |v| first.lock().push(("first", *v)));
        let second = Arc::clone(&log);
        state.subscribe(move |v| second.lock().push(("second", *v)));

        state.set(7);
        assert_eq!(*log.lock(), vec![("first", 7), ("second", 7)]);
        assert_eq!(state.get(), 7);
    }

    #[test]
    fn clones_share_the_value() {
        let state = State::new(String::from("Overview"));
        let observer = state.clone();
        state.set(String::from("Bills"));
        assert_eq!(observer.get(), "Bills");
    }

    #[test]
    fn listener_can_read_state_during_notification() {
        let state = State::new(1);
        let seen = Arc::new(AtomicUsize::new(0));
        let reader = state.clone();
        let seen_in_listener = Arc::clone(&seen);
        state.subscribe(move |_| {
            seen_in_listener.store(reader.get(), Ordering::SeqCst);
        });
        state.set(5);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let state = State::new(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = state.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        state.set(1);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set(2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.subscriber_count(), 0);
    }
}
