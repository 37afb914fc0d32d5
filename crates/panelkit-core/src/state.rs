//! Observable single-threaded values.
//!
//! `MutableState` is the writer side, `State` the read-only view handed to
//! consumers such as the scrim, which only ever reads the opacity channel.

use crate::collections::map::HashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: RefCell<T>,
    observers: RefCell<HashMap<u64, Observer<T>>>,
    next_observer_id: Cell<u64>,
}

impl<T: Clone + 'static> StateInner<T> {
    fn notify(&self) {
        let observers: Vec<Observer<T>> = self.observers.borrow().values().cloned().collect();
        if observers.is_empty() {
            return;
        }
        let snapshot = self.value.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn subscribe(this: &Rc<Self>, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = this.next_observer_id.get();
        this.next_observer_id.set(id + 1);
        this.observers.borrow_mut().insert(id, Rc::new(observer));
        let weak: Weak<Self> = Rc::downgrade(this);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.observers.borrow_mut().remove(&id);
                }
            })),
        }
    }
}

/// Writable observable value.
pub struct MutableState<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                observers: RefCell::new(HashMap::default()),
                next_observer_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value` and notify every observer with the new value.
    pub fn set_value(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.inner.notify();
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.inner.notify();
        result
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        StateInner::subscribe(&self.inner, observer)
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableState").field(&self.get()).finish()
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        StateInner::subscribe(&self.inner, observer)
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&self.get()).finish()
    }
}

/// Observer registration. Dropping it stops notifications.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
