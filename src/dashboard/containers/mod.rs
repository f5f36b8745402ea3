// Dashboard containers

pub mod home_container;
pub mod widget_container;

pub use home_container::HomeContainer;
pub use widget_container::{ContainerState, WidgetContainer};
