// Dashboard Configuration Types
// Tab and widget configuration as supplied by the hosting shell

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Opaque per-widget configuration.
/// Compared structurally; containers keep their own clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Dashboard context the widget belongs to (e.g. "server", "database")
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub provider: Option<String>,
    /// Widget type and its arguments, e.g. `{ explorer-widget: {} }`
    #[serde(default)]
    pub widget: serde_yaml::Value,
}

impl WidgetConfig {
    /// The widget type, taken from the first key of the `widget` mapping
    pub fn widget_type(&self) -> Option<&str> {
        match &self.widget {
            serde_yaml::Value::Mapping(map) => map.keys().next().and_then(|key| key.as_str()),
            serde_yaml::Value::String(name) => Some(name),
            _ => None,
        }
    }

    /// Name shown in the widget header
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.widget_type())
            .unwrap_or("widget")
    }
}

/// Configuration of one dashboard tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub provider: Option<String>,
    /// Container kind → ordered widget list. Holds a single entry in practice.
    #[serde(default)]
    pub container: Option<ContainerEntries>,
}

/// Container entries in the order they were written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Mapping", into = "Mapping")]
pub struct ContainerEntries(Vec<(String, Vec<WidgetConfig>)>);

impl ContainerEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, replacing the widgets of an existing kind in place
    pub fn insert(&mut self, kind: impl Into<String>, widgets: Vec<WidgetConfig>) {
        let kind = kind.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == kind) {
            Some(entry) => entry.1 = widgets,
            None => self.0.push((kind, widgets)),
        }
    }

    /// Widgets of the first entry as written
    pub fn first(&self) -> Option<&Vec<WidgetConfig>> {
        self.0.first().map(|(_, widgets)| widgets)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(kind, _)| kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<WidgetConfig>)> for ContainerEntries {
    fn from_iter<I: IntoIterator<Item = (K, Vec<WidgetConfig>)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (kind, widgets) in iter {
            entries.insert(kind, widgets);
        }
        entries
    }
}

// Entries are read in document order
impl TryFrom<Mapping> for ContainerEntries {
    type Error = serde_yaml::Error;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        let mut entries = Self::new();
        for (key, value) in mapping {
            let kind: String = serde_yaml::from_value(key)?;
            let widgets: Vec<WidgetConfig> = serde_yaml::from_value(value)?;
            entries.insert(kind, widgets);
        }
        Ok(entries)
    }
}

impl From<ContainerEntries> for Mapping {
    fn from(entries: ContainerEntries) -> Self {
        entries
            .0
            .into_iter()
            .map(|(kind, widgets)| (Value::String(kind), serde_yaml::to_value(widgets).unwrap_or_default()))
            .collect()
    }
}

impl TabConfig {
    /// The widget list of the first container entry, or `None` while no container is set
    pub fn widgets(&self) -> Option<Vec<WidgetConfig>> {
        self.container
            .as_ref()
            .map(|container| container.first().cloned().unwrap_or_default())
    }

    /// Build a config with a single `widgets-container` entry
    pub fn with_widgets(id: impl Into<String>, title: impl Into<String>, widgets: Vec<WidgetConfig>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            container: Some(ContainerEntries::from_iter([("widgets-container", widgets)])),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widgets_come_from_first_container_entry() {
        let yaml = r#"
id: performance
title: Performance
editable: true
container:
  widgets-container:
    - name: Top queries
      context: database
      widget:
        query-data-store-widget: {}
    - widget: explorer-widget
"#;
        let tab: TabConfig = serde_yaml::from_str(yaml).unwrap();
        let widgets = tab.widgets().unwrap();

        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].display_name(), "Top queries");
        assert_eq!(widgets[0].widget_type(), Some("query-data-store-widget"));
        assert_eq!(widgets[1].display_name(), "explorer-widget");
        assert!(tab.editable);
    }

    #[test]
    fn test_missing_container_yields_none() {
        let tab = TabConfig {
            id: "empty".into(),
            ..TabConfig::default()
        };
        assert_eq!(tab.widgets(), None);

        let tab = TabConfig {
            container: Some(ContainerEntries::new()),
            ..tab
        };
        assert_eq!(tab.widgets(), Some(Vec::new()));
    }

    #[test]
    fn test_first_container_entry_follows_document_order() {
        let yaml = r#"
id: mixed
container:
  zeta-container:
    - name: Written first
  alpha-container:
    - name: Written second
    - name: Also second
"#;
        let tab: TabConfig = serde_yaml::from_str(yaml).unwrap();
        let container = tab.container.as_ref().unwrap();
        assert_eq!(container.kinds().collect::<Vec<_>>(), vec!["zeta-container", "alpha-container"]);

        let widgets = tab.widgets().unwrap();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].display_name(), "Written first");

        // Order survives a save and reload
        let reloaded: TabConfig = serde_yaml::from_str(&serde_yaml::to_string(&tab).unwrap()).unwrap();
        assert_eq!(reloaded, tab);
    }

    #[test]
    fn test_non_list_container_entry_is_rejected() {
        let yaml = r#"
id: broken
container:
  widgets-container: 42
"#;
        assert!(serde_yaml::from_str::<TabConfig>(yaml).is_err());
    }
}
