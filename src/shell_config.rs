// Shell Configuration
// The dashboard layout the hosting shell opens: home widgets, tabs, extension tabs and forms

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DASHBOARD_CONFIG, HOME_TAB_ID};
use crate::core::error::DashboardError;
use crate::dashboard::config::{TabConfig, WidgetConfig};
use crate::dialog::DashboardTabInfo;
use crate::model::component::LabelComponent;
use crate::model::form_container::{FormLayout, TitledFormItemLayout};
use crate::panel::VisibilityType;

/// Shell configuration, loaded from `dashboard.yaml`
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    pub title: String,

    /// Dashboard context (e.g. "server", "database")
    pub context: String,

    /// Connection URI scoping the dashboard's event bus
    pub uri: String,

    /// Mount strategy for tab content; compiled default when absent
    #[serde(default)]
    pub visibility: Option<VisibilityType>,

    /// Collapsible properties widget of the home tab
    #[serde(default)]
    pub properties: Option<WidgetConfig>,

    /// Widgets of the home tab
    #[serde(default)]
    pub home_widgets: Vec<WidgetConfig>,

    /// Tabs open at startup, after the home tab
    #[serde(default)]
    pub tabs: Vec<TabConfig>,

    /// Tabs offered by the new tab dialog
    #[serde(default)]
    pub available_tabs: Vec<DashboardTabInfo>,

    /// Optional form tab
    #[serde(default)]
    pub form: Option<FormTabConfig>,
}

/// A tab hosting a form
#[derive(Debug, Clone, Deserialize)]
pub struct FormTabConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub layout: FormLayout,
    #[serde(default)]
    pub items: Vec<FormItemConfig>,
}

/// One component placed in a form
#[derive(Debug, Clone, Deserialize)]
pub struct FormItemConfig {
    pub id: String,
    #[serde(rename = "type", default = "default_component_type")]
    pub component_type: String,
    #[serde(default)]
    pub text: String,
    /// Row configuration; items without it are only reachable as actions
    #[serde(default)]
    pub layout: Option<TitledFormItemLayout>,
}

fn default_component_type() -> String {
    LabelComponent::TYPE.to_string()
}

impl ShellConfig {
    /// Load shell configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dashboard config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid dashboard config: {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: ShellConfig =
            serde_yaml::from_str(content).context("Failed to parse dashboard config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// The home tab's configuration
    pub fn home_tab(&self) -> TabConfig {
        let mut tab = TabConfig::with_widgets(HOME_TAB_ID, "Home", self.home_widgets.clone());
        tab.context = self.context.clone();
        tab
    }

    /// Check ids are present and unique across every tab the shell opens
    pub fn validate(&self) -> std::result::Result<(), DashboardError> {
        let mut ids = HashSet::from([HOME_TAB_ID.to_string()]);

        let opened = self.tabs.iter().map(|tab| tab.id.as_str());
        let form = self.form.iter().map(|form| form.id.as_str());
        for id in opened.chain(form) {
            if id.trim().is_empty() {
                return Err(DashboardError::InvalidConfig("tab id must not be empty".into()));
            }
            if !ids.insert(id.to_string()) {
                return Err(DashboardError::InvalidConfig(format!("duplicate tab id '{}'", id)));
            }
        }

        if let Some(tab) = self.available_tabs.iter().find(|tab| tab.id.trim().is_empty()) {
            return Err(DashboardError::InvalidConfig(format!(
                "available tab '{}' has no id",
                tab.title
            )));
        }

        if let Some(form) = &self.form {
            let mut item_ids = HashSet::new();
            for item in &form.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(DashboardError::InvalidConfig(format!(
                        "duplicate component id '{}' in form '{}'",
                        item.id, form.id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Default configuration path, next to the crate manifest
pub fn default_config_path() -> PathBuf {
    let mut default_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    default_path.push(DEFAULT_DASHBOARD_CONFIG);
    default_path
}

/// Load and validate configuration, using the default path when none is given
pub fn load_and_validate_config(config_path: Option<PathBuf>) -> Result<ShellConfig> {
    let path = config_path.unwrap_or_else(default_config_path);
    let config = ShellConfig::load(&path)?;
    tracing::info!(
        path = %path.display(),
        tabs = config.tabs.len(),
        available = config.available_tabs.len(),
        "Loaded dashboard config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
title: Server Dashboard
context: server
uri: "mssql://localhost/master"
visibility: visibility
properties:
  name: Properties
  context: server
  widget:
    properties-widget: {}
home_widgets:
  - name: Databases
    widget:
      explorer-widget: {}
tabs:
  - id: performance
    title: Performance
    container:
      widgets-container:
        - name: Waits
          widget:
            insights-widget: {}
available_tabs:
  - id: performance
    title: Performance
    description: Query performance insights
    publisher: Microsoft
  - id: security
    title: Security
form:
  id: connection
  title: Connection
  items:
    - id: server
      text: localhost
      layout:
        title: Server
        actions: [refresh]
        isFormComponent: true
    - id: refresh
      type: button
      text: Refresh
"#;

    #[test]
    fn test_parse_sample() {
        let config = ShellConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.visibility, Some(VisibilityType::Visibility));
        assert_eq!(config.tabs[0].widgets().map(|w| w.len()), Some(1));
        assert_eq!(config.available_tabs.len(), 2);

        let form = config.form.unwrap();
        assert_eq!(form.items[0].component_type, "label");
        assert_eq!(form.items[1].component_type, "button");
        assert!(form.items[0].layout.as_ref().unwrap().is_form_component);
    }

    #[test]
    fn test_home_tab_carries_context() {
        let config = ShellConfig::parse(SAMPLE).unwrap();
        let home = config.home_tab();
        assert_eq!(home.id, HOME_TAB_ID);
        assert_eq!(home.context, "server");
        assert_eq!(home.widgets().map(|w| w.len()), Some(1));
    }

    #[test]
    fn test_duplicate_tab_id_rejected() {
        let yaml = "title: t\ncontext: server\nuri: u\ntabs:\n  - id: a\n  - id: a\n";
        let err = ShellConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate tab id"));
    }

    #[test]
    fn test_tab_may_not_shadow_home() {
        let yaml = format!("title: t\ncontext: server\nuri: u\ntabs:\n  - id: {}\n", HOME_TAB_ID);
        assert!(ShellConfig::parse(&yaml).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ShellConfig::load(Path::new("/nonexistent/dashboard.yaml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/dashboard.yaml"));
    }

    #[test]
    fn test_bundled_config_is_valid() {
        assert!(ShellConfig::load(&default_config_path()).is_ok());
    }
}
