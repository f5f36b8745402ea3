// Tab
// Activation gate around a single piece of tab content

use serde::Deserialize;
use std::str::FromStr;

use super::action::Action;
use crate::core::error::DashboardError;
use crate::core::lifecycle::Disposable;

/// Minimal capability any tab-hosted content must provide
pub trait TabChild {
    /// One-time initialization, run on first activation
    fn init(&mut self) {}

    /// Re-measure and lay out the content
    fn layout(&mut self);

    /// Drop measurement state when the hosting tab unmounts its content
    fn unmount(&mut self) {}
}

/// How a tab's content is kept while the tab is inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityType {
    /// Content is not mounted while inactive; internal state is lost
    #[default]
    If,
    /// Content stays mounted and is only hidden
    Visibility,
}

impl FromStr for VisibilityType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "if" => Ok(VisibilityType::If),
            "visibility" => Ok(VisibilityType::Visibility),
            other => Err(DashboardError::InvalidConfig(format!(
                "unknown visibility type '{}' (expected 'if' or 'visibility')",
                other
            ))),
        }
    }
}

/// A mountable slot holding at most one child, gated by an activation flag.
///
/// Writing the active flag through [`Tab::set_active`] is the only way the
/// child's lifecycle advances.
pub struct Tab<C: TabChild + ?Sized = dyn TabChild> {
    pub title: String,
    pub identifier: String,
    pub can_close: bool,
    pub icon_class: Option<String>,
    actions: Vec<Box<dyn Action>>,
    visibility_type: VisibilityType,
    child: Option<Box<C>>,
    active: bool,
    initialized: bool,
    disposed: bool,
}

impl<C: TabChild + ?Sized> Tab<C> {
    /// Create an empty tab
    pub fn new(title: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
            can_close: false,
            icon_class: None,
            actions: Vec::new(),
            visibility_type: VisibilityType::default(),
            child: None,
            active: false,
            initialized: false,
            disposed: false,
        }
    }

    /// Create a tab hosting `child`
    pub fn with_child(title: impl Into<String>, identifier: impl Into<String>, child: Box<C>) -> Self {
        let mut tab = Self::new(title, identifier);
        tab.child = Some(child);
        tab
    }

    pub fn with_visibility(mut self, visibility_type: VisibilityType) -> Self {
        self.visibility_type = visibility_type;
        self
    }

    pub fn with_actions(mut self, actions: Vec<Box<dyn Action>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn closable(mut self, can_close: bool) -> Self {
        self.can_close = can_close;
        self
    }

    /// Set the active flag.
    ///
    /// Activating initializes the child once, then lays it out on every
    /// activation (including redundant ones). Deactivating an `If` tab unmounts
    /// the child; a `Visibility` tab only stores the flag.
    pub fn set_active(&mut self, active: bool) {
        let was_active = self.active;
        self.active = active;
        if !self.active {
            if was_active && self.visibility_type == VisibilityType::If {
                if let Some(child) = self.child.as_mut() {
                    tracing::debug!(tab = %self.identifier, "Unmounting tab content");
                    child.unmount();
                }
            }
            return;
        }

        if let Some(child) = self.child.as_mut() {
            if !self.initialized {
                tracing::debug!(tab = %self.identifier, "Initializing tab content");
                child.init();
                self.initialized = true;
            }
            child.layout();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Forward a layout request to the child, if any
    pub fn layout(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.layout();
        }
    }

    pub fn visibility_type(&self) -> VisibilityType {
        self.visibility_type
    }

    /// Whether the content is currently mounted
    pub fn is_mounted(&self) -> bool {
        match self.visibility_type {
            VisibilityType::If => self.active,
            VisibilityType::Visibility => true,
        }
    }

    /// Whether the content is mounted but hidden
    pub fn is_hidden(&self) -> bool {
        self.visibility_type == VisibilityType::Visibility && !self.active
    }

    pub fn child(&self) -> Option<&C> {
        self.child.as_deref()
    }

    pub fn child_mut(&mut self) -> Option<&mut C> {
        self.child.as_deref_mut()
    }

    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<C: TabChild + ?Sized> Disposable for Tab<C> {
    /// Release every action owned by the tab
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for action in self.actions.iter_mut() {
            action.dispose();
        }
    }
}
