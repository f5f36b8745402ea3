// Tab Actions
// Toolbar actions owned by a tab and released with it

use crate::core::lifecycle::Disposable;

/// An action shown on a tab header.
/// Owned by the tab; `dispose` must be idempotent.
pub trait Action: Disposable {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
    fn is_enabled(&self) -> bool;
    fn is_disposed(&self) -> bool;
}

/// Plain labelled action
#[derive(Debug, Clone)]
pub struct TabAction {
    id: String,
    label: String,
    enabled: bool,
    disposed: bool,
}

impl TabAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
            disposed: false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled && !self.disposed;
    }
}

impl Disposable for TabAction {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.enabled = false;
        tracing::trace!(action = %self.id, "Disposed tab action");
    }
}

impl Action for TabAction {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
