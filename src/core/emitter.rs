// Event Emitters
// Synchronous publish/subscribe channels with explicit unsubscribe tokens
//
// Usage:
//   let emitter = Emitter::<()>::new();
//   let mut sub = emitter.event().subscribe(|_| println!("resized"));
//   emitter.fire(&());
//   sub.dispose();

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::lifecycle::Disposable;

type Listener<T> = Rc<dyn Fn(&T)>;

struct ListenerTable<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Owning side of a notification channel.
///
/// Cloning an emitter yields another handle to the same listener table, which is
/// how a component re-broadcasts a child's events on its own channel.
pub struct Emitter<T> {
    table: Rc<RefCell<ListenerTable<T>>>,
}

/// Subscribe-only view of an [`Emitter`]
pub struct Event<T> {
    table: Rc<RefCell<ListenerTable<T>>>,
}

/// Token returned by [`Event::subscribe`]; disposing it removes the listener
#[must_use = "dropping a Subscription without disposing it leaves the listener registered"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(ListenerTable {
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// Get the subscribe-only half of this emitter
    pub fn event(&self) -> Event<T> {
        Event {
            table: Rc::clone(&self.table),
        }
    }

    /// Deliver `value` to every listener, in registration order.
    ///
    /// The listener list is snapshotted first: listeners added or removed while
    /// firing take effect from the next fire. With no listeners the value is dropped.
    pub fn fire(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .table
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.table.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.table.borrow().listeners.len())
            .finish()
    }
}

impl<T: 'static> Event<T> {
    /// Register a listener
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<ListenerTable<T>>> = Rc::downgrade(&self.table);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(table) = weak.upgrade() {
                    table.borrow_mut().listeners.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl Subscription {
    /// Whether the listener is still registered through this token
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Disposable for Subscription {
    fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_fire_reaches_listeners_in_order() {
        let emitter = Emitter::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        let _a = emitter.event().subscribe(move |v| first.borrow_mut().push(("a", *v)));
        let second = seen.clone();
        let _b = emitter.event().subscribe(move |v| second.borrow_mut().push(("b", *v)));

        emitter.fire(&7);

        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_dispose_removes_listener() {
        let emitter = Emitter::<()>::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let mut sub = emitter.event().subscribe(move |_| *counter.borrow_mut() += 1);

        emitter.fire(&());
        sub.dispose();
        sub.dispose();
        emitter.fire(&());

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(emitter.listener_count(), 0);
        assert!(!sub.is_active());
    }

    #[test]
    fn test_fire_without_listeners_is_dropped() {
        let emitter = Emitter::<String>::new();
        emitter.fire(&"nobody".to_string());
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_listener_added_during_fire_waits_for_next_fire() {
        let emitter = Emitter::<()>::new();
        let hits = Rc::new(RefCell::new(0));
        let late_subs = Rc::new(RefCell::new(Vec::new()));

        let event = emitter.event();
        let counter = hits.clone();
        let subs = late_subs.clone();
        let _outer = emitter.event().subscribe(move |_| {
            let counter = counter.clone();
            subs.borrow_mut()
                .push(event.subscribe(move |_| *counter.borrow_mut() += 1));
        });

        emitter.fire(&());
        assert_eq!(*hits.borrow(), 0);

        emitter.fire(&());
        assert_eq!(*hits.borrow(), 1);
    }
}
