// Application Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

use crate::panel::VisibilityType;

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Application-level configuration for dashboard-panels
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Layout sizes
    pub layout: LayoutSettings,

    /// Hosting shell behavior
    pub shell: ShellSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Height of the home properties widget while collapsed
    pub collapsed_height: u16,

    /// Height of the home properties widget while expanded
    pub expanded_height: u16,

    /// Fixed row height in the new tab selection dialog
    pub dialog_row_height: u16,

    /// Smallest height a widget is laid out with
    pub widget_min_height: u16,
}

#[derive(Debug, Clone)]
pub struct ShellSettings {
    /// Mount strategy for tabs that don't specify one
    pub default_visibility: VisibilityType,

    /// Event poll interval in milliseconds
    pub poll_interval_ms: u64,

    /// Enable mouse support
    pub mouse_enabled: bool,

    /// Default user settings file name
    pub settings_file: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            collapsed_height: compiled::COLLAPSED_HEIGHT,
            expanded_height: compiled::EXPANDED_HEIGHT,
            dialog_row_height: compiled::DIALOG_ROW_HEIGHT,
            widget_min_height: compiled::WIDGET_MIN_HEIGHT,
        }
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            default_visibility: compiled::DEFAULT_VISIBILITY
                .parse()
                .unwrap_or(VisibilityType::If),
            poll_interval_ms: compiled::POLL_INTERVAL_MS,
            mouse_enabled: compiled::MOUSE_ENABLED,
            settings_file: compiled::SETTINGS_FILE.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            shell: ShellSettings::default(),
        }
    }
}
