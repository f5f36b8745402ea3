// Core infrastructure module
// Provides foundational systems that other modules depend on

pub mod app;
pub mod app_config;
pub mod change_detection;
pub mod emitter;
pub mod error;
pub mod eventing;
pub mod events;
pub mod lifecycle;
pub mod settings;

pub use app::App;
pub use app_config::{AppConfig, LayoutSettings, ShellSettings};
pub use change_detection::ChangeDetector;
pub use emitter::{Emitter, Event, Subscription};
pub use error::{DashboardError, Result};
pub use eventing::{BusEvent, EventBus, EventType};
pub use events::{AppEvent, EventHandler};
pub use lifecycle::{Disposable, DisposableStore};
pub use settings::{
    ConfigEdit, ConfigValue, ConfigurationTarget, MemorySettings, SettingsStore, YamlSettingsStore,
};
