// Lifecycle
// Deterministic, exactly-once release of subscriptions and owned resources

/// Something that holds a resource which must be released exactly once.
///
/// Implementations must tolerate repeated calls; only the first one does work.
pub trait Disposable {
    fn dispose(&mut self);
}

/// Collects disposables and releases them together
#[derive(Default)]
pub struct DisposableStore {
    items: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl DisposableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a disposable.
    /// A store that was already disposed releases the item immediately.
    pub fn register<D: Disposable + 'static>(&mut self, mut item: D) {
        if self.disposed {
            item.dispose();
            return;
        }
        self.items.push(Box::new(item));
    }

    /// Number of items still held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Disposable for DisposableStore {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }
}

impl std::fmt::Debug for DisposableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposableStore")
            .field("items", &self.items.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
