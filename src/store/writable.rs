use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

use tracing::trace;

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Subscriber<T> {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: Callback<T>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
    // values waiting to be delivered while a notification round is running,
    // each with the subscribers registered when it was set
    pending: VecDeque<(T, Vec<Subscriber<T>>)>,
    notifying: bool,
}

/// An observable cell holding a single value.
///
/// Every `set` or `update` synchronously notifies all current subscribers, in
/// registration order, before returning. Identical consecutive values are
/// delivered too.
///
/// Cloning a `Writable` yields another handle to the same cell.
pub struct Writable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                subscribers: vec![],
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Returns a copy of the held value without subscribing.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Registers `callback`, calls it once with the current value, and then
    /// again on every change until the returned [`Subscription`] is released.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let active = Rc::new(Cell::new(true));
        let callback: Callback<T> = Rc::new(RefCell::new(callback));

        let (id, current, was_notifying) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push(Subscriber {
                id,
                active: Rc::clone(&active),
                callback: Rc::clone(&callback),
            });
            let was_notifying = inner.notifying;
            inner.notifying = true;
            (id, inner.value.clone(), was_notifying)
        };
        trace!("subscribed. id: {}", id);

        (*callback.borrow_mut())(&current);
        // a `set` made by the initial call was queued, deliver it now
        if !was_notifying {
            self.flush();
        }

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        let release_flag = Rc::clone(&active);
        Subscription {
            release: Some(Box::new(move || {
                release_flag.set(false);
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|s| s.id != id);
                    trace!("unsubscribed. id: {}", id);
                }
            })),
        }
    }

    /// Replaces the held value and notifies every subscriber.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            let subscribers = inner.subscribers.clone();
            inner.pending.push_back((value, subscribers));
            if inner.notifying {
                // the running round picks it up once the current value is delivered
                return;
            }
            inner.notifying = true;
        }
        self.flush();
    }

    /// Replaces the held value with `f(current)` and notifies like [`Writable::set`].
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let current = self.get();
        self.set(f(current));
    }

    fn flush(&self) {
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let next = inner.pending.pop_front();
                if next.is_none() {
                    inner.notifying = false;
                }
                next
            };

            let Some((value, subscribers)) = next else {
                break;
            };

            for subscriber in subscribers {
                if subscriber.active.get() {
                    (*subscriber.callback.borrow_mut())(&value);
                }
            }
        }
    }
}

impl<T: Default + Clone + 'static> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Writable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Handle to a registered subscriber. The subscriber is removed when this is
/// dropped or [`Subscription::unsubscribe`] is called.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    /// Keeps the subscriber registered for as long as the cell lives.
    pub fn forget(mut self) {
        self.release = None;
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
