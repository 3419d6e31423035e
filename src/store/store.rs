use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to detach the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Why a dispatched action left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The same request is already in flight.
    Busy,
    /// A newer request has superseded the one this completion belongs to.
    Stale,
}

/// Result of running one action through a reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(Ignored),
}

impl Transition {
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

/// State that can be advanced by actions through a pure reducer.
///
/// Implementations must not perform I/O: everything a transition needs is
/// carried by the action itself.
pub trait Reduce {
    type Action;

    fn reduce(&mut self, action: Self::Action) -> Transition;
}

/// A thread-safe store for managing application state.
///
/// Cloning a store yields another handle onto the same state and the same
/// subscriber list.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_id: Arc<AtomicUsize>,
}

impl<T: Clone> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update the state using a function and notify subscribers.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut *state)
        };
        self.notify();
        result
    }

    /// Replace the state wholesale.
    pub fn set(&self, new_state: T) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every applied change, with the lock released,
    /// so it may read the store again.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Detach a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    /// Notify all subscribers with a snapshot of the current state.
    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&*state)
    }
}

impl<T: Clone + Reduce> Store<T> {
    /// Run an action through the state's reducer.
    ///
    /// Subscribers are only notified when the transition was applied. The
    /// write lock is held for the whole reducer call, so dispatches from
    /// concurrent callers are serialized.
    pub fn dispatch(&self, action: T::Action) -> Transition {
        let transition = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.reduce(action)
        };
        if transition.is_applied() {
            self.notify();
        }
        transition
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
