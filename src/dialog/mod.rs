// Dialog module
// Modal selection of dashboard tabs to open

pub mod new_tab_dialog;
pub mod view_model;

pub use new_tab_dialog::{icon_class, DialogFocus, NewTabSelectionDialog};
pub use view_model::{DashboardTabInfo, NewTabViewModel, UiTab};
