// Observable value container
//
// A single-threaded value cell that notifies subscribed listeners, in
// registration order, whenever a write actually changes the held value.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback invoked with `(old, new)` after a value-changing write.
pub type Listener<T> = Rc<dyn Fn(&T, &T)>;

/// Token returned by [`Observable::subscribe`], used to detach the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Numeric id of this subscription (unique per observable).
    pub fn id(&self) -> u64 {
        self.0
    }
}

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(SubscriptionHandle, Listener<T>)>>,
    next_id: Cell<u64>,
}

/// Notify-on-change value container.
///
/// Writes go through [`set()`](Self::set), which compares the new value with
/// the current one and only notifies when they differ. All listeners for a
/// write run before `set()` returns.
///
/// No borrow of the value or the listener list is held while listeners run,
/// so a listener may read the observable, subscribe, unsubscribe or even
/// write to it again. Listeners added during a notification are not called
/// for that notification; listeners removed during a notification are not
/// called if they had not been reached yet.
///
/// Cloning an `Observable` produces another handle to the same value.
///
/// # Example
/// ```
/// use rebuildlab::Observable;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let clicks = Observable::new(0);
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// clicks.subscribe(move |_old, new| sink.set(*new));
///
/// assert!(clicks.set(3));
/// assert!(!clicks.set(3));
/// assert_eq!(seen.get(), 3);
/// ```
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Observable<T> {
    /// Create an observable holding `value` with no listeners.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Execute a function with read access to the current value.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let value = self.inner.value.borrow();
        f(&value)
    }

    /// Register a listener. Returns the handle needed to unsubscribe it.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&T, &T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let handle = SubscriptionHandle(id);
        let listener: Listener<T> = Rc::new(listener);
        self.inner.listeners.borrow_mut().push((handle, listener));

        tracing::trace!(subscription = id, "listener subscribed");
        handle
    }

    /// Remove a listener.
    ///
    /// Returns `false` when the handle is unknown or was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(h, _)| *h != handle);
        let removed = listeners.len() != before;

        if removed {
            tracing::trace!(subscription = handle.0, "listener unsubscribed");
        }
        removed
    }

    /// Whether `handle` is still attached.
    pub fn is_subscribed(&self, handle: SubscriptionHandle) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|(h, _)| *h == handle)
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, old: &T, new: &T) {
        // Snapshot so listeners can mutate the list while we iterate.
        let snapshot: Vec<(SubscriptionHandle, Listener<T>)> =
            self.inner.listeners.borrow().iter().cloned().collect();

        tracing::trace!(listeners = snapshot.len(), "notifying listeners");

        for (handle, listener) in snapshot {
            if self.is_subscribed(handle) {
                listener(old, new);
            }
        }
    }
}

impl<T: Clone> Observable<T> {
    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Replace the value and notify listeners if it changed.
    ///
    /// Returns `true` when the value differed and listeners were called.
    pub fn set(&self, new_value: T) -> bool {
        let old = {
            let mut value = self.inner.value.borrow_mut();
            if *value == new_value {
                return false;
            }
            std::mem::replace(&mut *value, new_value.clone())
        };

        self.notify(&old, &new_value);
        true
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
