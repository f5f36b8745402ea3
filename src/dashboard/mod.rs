// Dashboard module
// Dashboard tab contract, widget containers and their collaborators

pub mod config;
pub mod containers;
pub mod interfaces;
pub mod service;
pub mod widget_content;
pub mod widget_wrapper;

pub use config::{ContainerEntries, TabConfig, WidgetConfig};
pub use containers::{ContainerState, HomeContainer, WidgetContainer};
pub use interfaces::DashboardTab;
pub use service::DashboardService;
pub use widget_content::WidgetContent;
pub use widget_wrapper::WidgetWrapper;
