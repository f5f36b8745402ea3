// Render module - UI rendering functions

pub mod content;
pub mod dashboard;
pub mod dialog;

pub use content::{content_inner, render_content};
pub use dashboard::{render_form, render_home, render_tab_bar, render_widget_content};
pub use dialog::{dialog_layout, render_new_tab_dialog, DialogLayout};
