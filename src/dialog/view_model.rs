// New Tab View Model
// Diffs the available dashboard tabs against the ones already open

use serde::Deserialize;
use crate::core::emitter::{Emitter, Event};
use crate::dashboard::config::{ContainerEntries, TabConfig};

/// A dashboard tab contributed by a built-in layout or an extension
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardTabInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub always_show: bool,
    #[serde(default)]
    pub container: Option<ContainerEntries>,
}

impl DashboardTabInfo {
    /// Tab configuration for opening this tab in a dashboard of `context`
    pub fn to_tab_config(&self, context: &str) -> TabConfig {
        TabConfig {
            id: self.id.clone(),
            title: self.title.clone(),
            editable: self.editable,
            context: context.to_string(),
            provider: None,
            container: self.container.clone(),
        }
    }
}

/// A row of the selection dialog.
/// Built fresh on every diff and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct UiTab {
    pub tab_config: DashboardTabInfo,
    pub is_opened: bool,
}

/// Produces the dialog's row list
#[derive(Debug, Default)]
pub struct NewTabViewModel {
    on_tab_list_updated: Emitter<Vec<UiTab>>,
}

impl NewTabViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tab_list_updated(&self) -> Event<Vec<UiTab>> {
        self.on_tab_list_updated.event()
    }

    /// Rebuild the row list in candidate order, marking rows whose id is already open
    pub fn update_dashboard_tabs(&self, candidates: &[DashboardTabInfo], opened: &[DashboardTabInfo]) {
        let tabs: Vec<UiTab> = candidates
            .iter()
            .map(|candidate| UiTab {
                tab_config: candidate.clone(),
                is_opened: opened.iter().any(|open| open.id == candidate.id),
            })
            .collect();

        tracing::debug!(
            candidates = tabs.len(),
            opened = tabs.iter().filter(|t| t.is_opened).count(),
            "Tab list updated"
        );
        self.on_tab_list_updated.fire(&tabs);
    }
}
