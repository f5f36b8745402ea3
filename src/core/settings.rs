// Settings Persistence
// Read/write boundary for user and workspace settings

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{DashboardError, Result};

/// Which settings layer a write goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationTarget {
    User,
    Workspace,
}

/// A persisted setting value.
///
/// Untagged, so it round-trips through YAML as a bare string or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Text(String),
}

impl ConfigValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(text) => Some(text),
            ConfigValue::Flag(_) => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Flag(flag) => write!(f, "{}", flag),
            ConfigValue::Text(text) => f.write_str(text),
        }
    }
}

/// A single key/value write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEdit {
    pub key: String,
    pub value: ConfigValue,
}

impl ConfigEdit {
    pub fn new(key: impl Into<String>, value: ConfigValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Settings read/write boundary.
///
/// Methods take `&self`: a store is shared between the components of a dashboard
/// and each implementation manages its own interior state.
pub trait SettingsStore {
    /// Read a setting by its full key
    fn get_setting(&self, key: &str) -> Option<String>;

    /// Persist a setting
    fn write_configuration(&self, target: ConfigurationTarget, edit: ConfigEdit) -> Result<()>;
}

/// On-disk / in-memory layout of the settings layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsLayers {
    #[serde(default)]
    pub user: BTreeMap<String, ConfigValue>,
    #[serde(default)]
    pub workspace: BTreeMap<String, ConfigValue>,
}

impl SettingsLayers {
    /// Workspace values override user values
    fn lookup(&self, key: &str) -> Option<String> {
        self.workspace
            .get(key)
            .or_else(|| self.user.get(key))
            .map(|value| value.to_string())
    }

    fn apply(&mut self, target: ConfigurationTarget, edit: ConfigEdit) {
        let layer = match target {
            ConfigurationTarget::User => &mut self.user,
            ConfigurationTarget::Workspace => &mut self.workspace,
        };
        layer.insert(edit.key, edit.value);
    }
}

/// Settings kept in memory only; records every write
#[derive(Debug, Default)]
pub struct MemorySettings {
    layers: RefCell<SettingsLayers>,
    writes: RefCell<Vec<(ConfigurationTarget, ConfigEdit)>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user-level value
    pub fn with_user_value(self, key: &str, value: ConfigValue) -> Self {
        self.layers.borrow_mut().user.insert(key.to_string(), value);
        self
    }

    /// Every write performed so far, oldest first
    pub fn writes(&self) -> Vec<(ConfigurationTarget, ConfigEdit)> {
        self.writes.borrow().clone()
    }

    pub fn user_value(&self, key: &str) -> Option<ConfigValue> {
        self.layers.borrow().user.get(key).cloned()
    }
}

impl SettingsStore for MemorySettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.layers.borrow().lookup(key)
    }

    fn write_configuration(&self, target: ConfigurationTarget, edit: ConfigEdit) -> Result<()> {
        self.writes.borrow_mut().push((target, edit.clone()));
        self.layers.borrow_mut().apply(target, edit);
        Ok(())
    }
}

/// Settings backed by a YAML file; every write rewrites the file
#[derive(Debug)]
pub struct YamlSettingsStore {
    path: PathBuf,
    layers: RefCell<SettingsLayers>,
}

impl YamlSettingsStore {
    /// Open a settings file. A missing file starts out empty and is created on first write.
    pub fn open(path: &Path) -> Result<Self> {
        let layers = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| DashboardError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if content.trim().is_empty() {
                SettingsLayers::default()
            } else {
                serde_yaml::from_str(&content).map_err(|source| DashboardError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        } else {
            SettingsLayers::default()
        };

        tracing::debug!(path = %path.display(), "Opened settings store");

        Ok(Self {
            path: path.to_path_buf(),
            layers: RefCell::new(layers),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = serde_yaml::to_string(&*self.layers.borrow())?;
        fs::write(&self.path, content).map_err(|source| DashboardError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for YamlSettingsStore {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.layers.borrow().lookup(key)
    }

    fn write_configuration(&self, target: ConfigurationTarget, edit: ConfigEdit) -> Result<()> {
        tracing::debug!(key = %edit.key, value = %edit.value, ?target, "Writing setting");
        self.layers.borrow_mut().apply(target, edit);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_value_yaml_forms() {
        let collapsed = serde_yaml::to_string(&ConfigValue::Text("collapsed".into())).unwrap();
        let expanded = serde_yaml::to_string(&ConfigValue::Flag(true)).unwrap();
        assert_eq!(collapsed.trim(), "collapsed");
        assert_eq!(expanded.trim(), "true");
    }

    #[test]
    fn test_workspace_overrides_user() {
        let settings = MemorySettings::new();
        settings
            .write_configuration(ConfigurationTarget::User, ConfigEdit::new("k", ConfigValue::Text("user".into())))
            .unwrap();
        assert_eq!(settings.get_setting("k").as_deref(), Some("user"));

        settings
            .write_configuration(ConfigurationTarget::Workspace, ConfigEdit::new("k", ConfigValue::Text("ws".into())))
            .unwrap();
        assert_eq!(settings.get_setting("k").as_deref(), Some("ws"));
        assert_eq!(settings.writes().len(), 2);
    }

    #[test]
    fn test_yaml_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");

        let store = YamlSettingsStore::open(&path).unwrap();
        assert_eq!(store.get_setting("dashboard.server.properties"), None);
        store
            .write_configuration(
                ConfigurationTarget::User,
                ConfigEdit::new("dashboard.server.properties", ConfigValue::Text("collapsed".into())),
            )
            .unwrap();
        store
            .write_configuration(
                ConfigurationTarget::User,
                ConfigEdit::new("dashboard.database.properties", ConfigValue::Flag(true)),
            )
            .unwrap();

        let reopened = YamlSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get_setting("dashboard.server.properties").as_deref(), Some("collapsed"));
        assert_eq!(reopened.get_setting("dashboard.database.properties").as_deref(), Some("true"));
    }

    #[test]
    fn test_yaml_store_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "user: [not, a, map").unwrap();

        let err = YamlSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }
}
