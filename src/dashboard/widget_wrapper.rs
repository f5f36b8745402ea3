// Widget Wrapper
// Frame around a single widget: identity, collapse state and assigned area

use ratatui::layout::Rect;
use uuid::Uuid;

use super::config::WidgetConfig;

/// Hosts one widget inside a dashboard container
#[derive(Debug, Clone)]
pub struct WidgetWrapper {
    /// Instance-unique id; distinguishes identical widgets on dashboards open side by side
    guid: String,
    config: WidgetConfig,
    collapsable: bool,
    collapsed: bool,
    editing: bool,
    area: Rect,
    layout_count: usize,
    refresh_count: usize,
}

impl WidgetWrapper {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            guid: Uuid::new_v4().to_string(),
            config,
            collapsable: false,
            collapsed: false,
            editing: false,
            area: Rect::default(),
            layout_count: 0,
            refresh_count: 0,
        }
    }

    pub fn collapsable(mut self, collapsable: bool) -> Self {
        self.collapsable = collapsable;
        self
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_collapsable(&self) -> bool {
        self.collapsable
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Assign a new area. Returns whether the area changed.
    pub fn layout(&mut self, area: Rect) -> bool {
        self.layout_count += 1;
        let changed = self.area != area;
        self.area = area;
        changed
    }

    /// Forget the assigned area so the next layout counts as a change
    pub fn reset_area(&mut self) {
        self.area = Rect::default();
    }

    pub fn refresh(&mut self) {
        self.refresh_count += 1;
    }

    pub fn enable_edit(&mut self) {
        self.editing = true;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn layout_count(&self) -> usize {
        self.layout_count
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}
