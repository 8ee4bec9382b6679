use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;
type Reducer<S, A> = Box<dyn Fn(&S, A) -> S>;
type Registrations = RefCell<Vec<Registration>>;

struct Registration {
    id: u64,
    active: Rc<Cell<bool>>,
    listener: Listener,
}

struct Inner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S, A>,
    listeners: Rc<Registrations>,
    next_id: Cell<u64>,
}

/// Observable container for one slice of application state.
///
/// The store is a cheap handle: clones share the same state and listener set.
/// Dispatch runs the reducer, swaps in the new state and then notifies every
/// listener that was registered when the dispatch started. A dispatch issued
/// from inside a listener runs its own complete notification pass before the
/// outer pass resumes.
pub struct Store<S, A> {
    inner: Rc<Inner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<S: 'static, A: 'static> Store<S, A> {
    pub fn new(initial: S, reducer: impl Fn(&S, A) -> S + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(Rc::new(initial)),
                reducer: Box::new(reducer),
                listeners: Rc::new(RefCell::new(Vec::new())),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    pub fn dispatch(&self, action: A) {
        let next = {
            let current = self.inner.state.borrow();
            (self.inner.reducer)(&current, action)
        };
        *self.inner.state.borrow_mut() = Rc::new(next);

        // Snapshot so listeners may subscribe, unsubscribe or dispatch while we iterate.
        let pass: Vec<(Rc<Cell<bool>>, Listener)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|reg| (Rc::clone(&reg.active), Rc::clone(&reg.listener)))
            .collect();

        for (active, listener) in pass {
            if active.get() {
                listener();
            }
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let active = Rc::new(Cell::new(true));
        self.inner.listeners.borrow_mut().push(Registration {
            id,
            active: Rc::clone(&active),
            listener: Rc::new(listener),
        });
        Subscription {
            id,
            active,
            listeners: Rc::downgrade(&self.inner.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning store handle, for listeners that need to read the store they observe.
pub struct WeakStore<S, A> {
    inner: Weak<Inner<S, A>>,
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A> WeakStore<S, A> {
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Rc<Cell<bool>>,
    listeners: Weak<Registrations>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|reg| reg.id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}
