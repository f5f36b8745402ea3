// Panel module
// Tabs and the capability contract for tab-hosted content

pub mod action;
pub mod tab;

pub use action::{Action, TabAction};
pub use tab::{Tab, TabChild, VisibilityType};
