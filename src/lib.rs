// Dashboard Panels Library
// Tabbed dashboard panels: activation-gated tabs, widget containers and a tab selection dialog

// Core infrastructure - events, lifecycle, settings, shell state
pub mod core;

// Panel - tabs and the content capability contract
pub mod panel;

// Dashboard - widget containers and their collaborators
pub mod dashboard;

// Dialog - new tab selection
pub mod dialog;

// Model - descriptor-addressed components and forms
pub mod model;

// Render - ratatui renderers for tabs, widgets and the dialog
pub mod render;

// UI - event loop, views and styles
pub mod ui;

// Shell configuration (dashboard.yaml)
pub mod shell_config;

// Application constants
pub mod constants;

// Re-export commonly used items for convenience
pub use self::core::{App, AppConfig, Disposable, Emitter, EventBus};
pub use dashboard::{DashboardTab, HomeContainer, WidgetContainer};
pub use dialog::NewTabSelectionDialog;
pub use model::FormContainer;
pub use panel::{Tab, TabChild};
pub use shell_config::ShellConfig;
pub use constants::*;
