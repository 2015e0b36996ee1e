use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Receives the mutation's version and the state it produced.
type Subscriber<T> = Arc<dyn Fn(u64, &T) + Send + Sync>;

struct Subscribers<T> {
    next_id: usize,
    entries: Vec<(usize, Subscriber<T>)>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// A thread-safe, observable state container.
///
/// Every mutation through [`Store::update`] or [`Store::set`] notifies the
/// registered subscribers with the state that mutation produced. Cloning a
/// store yields another handle to the same state.
///
/// Subscribers may mutate the store they observe. A nested mutation notifies
/// before the outer one finishes, so plain [`Store::subscribe`] callbacks can
/// see an older snapshot after a newer one; [`Store::select`] watchers skip
/// such stale deliveries.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    // Bumped under the state write lock, so it orders mutations.
    version: Arc<AtomicU64>,
    subscribers: Arc<RwLock<Subscribers<T>>>,
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            version: Arc::new(AtomicU64::new(0)),
            subscribers: Arc::new(RwLock::new(Subscribers::new())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        read_lock(&self.state).clone()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = read_lock(&self.state);
        f(&state)
    }

    /// Update the state using a function, then notify subscribers.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, version, snapshot) = {
            let mut state = write_lock(&self.state);
            let result = f(&mut state);
            let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
            (result, version, state.clone())
        };
        self.notify(version, &snapshot);
        result
    }

    /// Replace the state, then notify subscribers.
    pub fn set(&self, new_state: T) {
        self.update(move |state| *state = new_state);
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every update. It stays registered until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.register(Arc::new(move |_version: u64, state: &T| callback(state)))
    }

    fn register(&self, subscriber: Subscriber<T>) -> Subscription {
        let id = {
            let mut subscribers = write_lock(&self.subscribers);
            let id = subscribers.next_id;
            subscribers.next_id += 1;
            subscribers.entries.push((id, subscriber));
            id
        };

        let subscribers: Weak<RwLock<Subscribers<T>>> = Arc::downgrade(&self.subscribers);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(subscribers) = subscribers.upgrade() {
                    write_lock(&subscribers)
                        .entries
                        .retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    /// Watch a value derived from the state.
    ///
    /// `on_change` is called immediately with the current projection, and
    /// afterwards only when an update changes the projected value. It may
    /// itself update the store.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulseboard::Store;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let store = Store::new((0, "a"));
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    ///
    /// let _guard = store.select(|s| s.0, move |n| sink.lock().unwrap().push(*n));
    /// store.update(|s| s.1 = "b");
    /// store.update(|s| s.0 = 1);
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
    /// ```
    pub fn select<U, P, F>(&self, project: P, on_change: F) -> Subscription
    where
        U: PartialEq + Clone + Send + 'static,
        P: Fn(&T) -> U + Send + Sync + 'static,
        F: Fn(&U) + Send + Sync + 'static,
    {
        let (initial, version) = {
            let state = read_lock(&self.state);
            (project(&state), self.version.load(Ordering::SeqCst))
        };
        let last = Mutex::new((version, initial.clone()));
        on_change(&initial);

        self.register(Arc::new(move |version: u64, state: &T| {
            let next = project(state);
            let changed = {
                let mut last = last.lock().unwrap_or_else(PoisonError::into_inner);
                if version <= last.0 {
                    false
                } else {
                    last.0 = version;
                    if last.1 != next {
                        last.1 = next.clone();
                        true
                    } else {
                        false
                    }
                }
            };
            // Called unlocked so the watcher may write back to the store.
            if changed {
                on_change(&next);
            }
        }))
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        read_lock(&self.subscribers).entries.len()
    }

    /// Notify all subscribers of a state change.
    fn notify(&self, version: u64, state: &T) {
        // Snapshot so callbacks may subscribe or drop guards.
        let subscribers: Vec<Subscriber<T>> = read_lock(&self.subscribers)
            .entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        tracing::trace!(version, subscribers = subscribers.len(), "notifying store subscribers");

        for subscriber in subscribers {
            subscriber(version, state);
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            version: Arc::clone(&self.version),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Default + Clone + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// RAII guard for a store subscriber.
///
/// Dropping the guard unregisters the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Keep the subscriber registered for as long as the store lives.
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
