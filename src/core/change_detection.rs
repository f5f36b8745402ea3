// Change Detection
// Explicit "redraw now" requests from components to the hosting shell

use std::cell::Cell;
use std::rc::Rc;

/// Shared handle a component uses to request an immediate redraw.
/// The shell drains pending requests once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw
    pub fn detect_changes(&self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }

    /// Return whether a redraw was requested since the last call, clearing the flag
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total number of requests made through any clone of this handle
    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }
}
