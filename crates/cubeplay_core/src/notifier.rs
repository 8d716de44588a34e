use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

/// Callback that receives change events.
///
/// Errors are logged and do not affect other listeners.
pub type Listener<E> = Rc<dyn Fn(&E) -> eyre::Result<()>>;

/// Handle used to remove a listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry of listeners for events of type `E`.
///
/// Delivery is synchronous. A listener that returns an error or panics is
/// logged and skipped; the remaining listeners still run. Events emitted by a
/// listener while delivery is in progress are queued and delivered, in order,
/// after the current event has reached every listener.
pub struct ChangeNotifier<E> {
    listeners: RefCell<Vec<(ListenerId, Listener<E>)>>,
    next_id: Cell<u64>,
    queue: RefCell<VecDeque<E>>,
    delivering: Cell<bool>,
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(vec![]),
            next_id: Cell::new(0),
            queue: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
        }
    }
}

impl<E> fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listener_count", &self.len())
            .finish_non_exhaustive()
    }
}

impl<E> ChangeNotifier<E> {
    /// Constructs a notifier with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns a handle that can be used to remove it.
    pub fn add(&self, listener: impl 'static + Fn(&E) -> eyre::Result<()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let listener: Listener<E> = Rc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let len_before = listeners.len();
        listeners.retain(|(other, _)| *other != id);
        listeners.len() != len_before
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }
    /// Returns whether there are no registered listeners.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(other, _)| *other == id)
    }

    /// Delivers an event to every listener.
    pub fn notify(&self, event: E) {
        self.queue.borrow_mut().push_back(event);
        if self.delivering.replace(true) {
            // The outer call is still delivering and will pick this up.
            return;
        }

        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };

            // Listeners may be added or removed during delivery, so iterate
            // over a snapshot.
            let snapshot = self.listeners.borrow().clone();
            for (id, listener) in snapshot {
                if !self.is_registered(id) {
                    continue; // removed by an earlier listener
                }
                match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                    Ok(Ok(())) => (),
                    Ok(Err(e)) => log::error!("error in listener {id}: {e:#}"),
                    Err(_) => log::error!("listener {id} panicked"),
                }
            }
        }

        self.delivering.set(false);
    }
}
