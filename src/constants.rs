// Application constants
// Handle names, settings keys and marker values shared across modules

/// Namespace of every dashboard setting
pub const DASHBOARD_SETTINGS_PREFIX: &str = "dashboard";

/// Persisted value marking the home properties widget as collapsed.
/// The expanded state is persisted as boolean `true`, not as a string.
pub const COLLAPSED_MARKER: &str = "collapsed";

/// Settings key (relative to the dashboard namespace) for a context's properties widget
pub fn properties_setting_key(context: &str) -> String {
    format!("{}.properties", context)
}

/// Full settings key used when persisting a context's properties widget state
pub fn properties_config_key(context: &str) -> String {
    format!("{}.{}", DASHBOARD_SETTINGS_PREFIX, properties_setting_key(context))
}

/// Identifier of the built-in home tab
pub const HOME_TAB_ID: &str = "homeTab";

/// Default shell configuration file
pub const DEFAULT_DASHBOARD_CONFIG: &str = "dashboard.yaml";

/// Log file written by the shell (the terminal is owned by the UI)
pub const LOG_FILE_NAME: &str = "dashboard-panels.log";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_keys() {
        assert_eq!(properties_setting_key("server"), "server.properties");
        assert_eq!(properties_config_key("server"), "dashboard.server.properties");
    }
}
