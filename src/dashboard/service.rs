// Dashboard Service
// Per-dashboard access to settings and the cross-component event bus

use std::rc::Rc;

use crate::constants::DASHBOARD_SETTINGS_PREFIX;
use crate::core::eventing::EventBus;
use crate::core::settings::{ConfigEdit, ConfigurationTarget, SettingsStore};
use crate::core::error::Result;

/// Services shared by the components of one dashboard
#[derive(Clone)]
pub struct DashboardService {
    settings: Rc<dyn SettingsStore>,
    bus: Rc<EventBus>,
    uri: String,
}

impl DashboardService {
    pub fn new(settings: Rc<dyn SettingsStore>, bus: Rc<EventBus>, uri: impl Into<String>) -> Self {
        Self {
            settings,
            bus,
            uri: uri.into(),
        }
    }

    /// Read a dashboard setting; `key` is relative to the `dashboard.` namespace
    pub fn get_settings(&self, key: &str) -> Option<String> {
        self.settings
            .get_setting(&format!("{}.{}", DASHBOARD_SETTINGS_PREFIX, key))
    }

    /// Write a setting under its full key
    pub fn write_configuration(&self, target: ConfigurationTarget, edit: ConfigEdit) -> Result<()> {
        self.settings.write_configuration(target, edit)
    }

    pub fn settings(&self) -> Rc<dyn SettingsStore> {
        Rc::clone(&self.settings)
    }

    pub fn event_bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// URI of the connection this dashboard shows; scopes bus events
    pub fn underlying_uri(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("uri", &self.uri)
            .finish()
    }
}
