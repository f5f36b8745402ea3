// Widget Container
// Dashboard tab that materializes its widget list from the tab configuration

use ratatui::{layout::Rect, Frame};

use crate::core::change_detection::ChangeDetector;
use crate::core::emitter::{Emitter, Event};
use crate::core::lifecycle::{Disposable, DisposableStore};
use crate::dashboard::config::{TabConfig, WidgetConfig};
use crate::dashboard::interfaces::DashboardTab;
use crate::dashboard::widget_content::WidgetContent;
use crate::panel::TabChild;
use crate::render::render_widget_content;

/// Readiness of a widget container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    /// Neither the framework init signal nor the tab's `init()` has arrived
    Uninitialized,
    /// One of the two signals arrived, or both did but no container config is set yet
    AwaitingConfig,
    /// The widget list has been extracted from the tab configuration
    Ready,
}

/// A dashboard tab hosting a list of widgets.
///
/// Widgets materialize only once both the framework init signal (`on_init`)
/// and the hosting tab's `init()` have happened, in either order.
#[derive(Debug)]
pub struct WidgetContainer {
    tab: TabConfig,
    widgets: Vec<WidgetConfig>,
    initted: bool,
    on_initted: bool,
    materialized: bool,
    content: Option<WidgetContent>,
    bounds: Rect,
    min_widget_height: u16,
    on_resize: Emitter<()>,
    change_detector: ChangeDetector,
    disposables: DisposableStore,
}

impl WidgetContainer {
    pub fn new(tab: TabConfig, change_detector: ChangeDetector) -> Self {
        Self {
            tab,
            widgets: Vec::new(),
            initted: false,
            on_initted: false,
            materialized: false,
            content: None,
            bounds: Rect::default(),
            min_widget_height: 1,
            on_resize: Emitter::new(),
            change_detector,
            disposables: DisposableStore::new(),
        }
    }

    pub fn with_min_widget_height(mut self, height: u16) -> Self {
        self.min_widget_height = height;
        self
    }

    /// Framework-level init signal
    pub fn on_init(&mut self) {
        self.on_initted = true;
        self.materialize();
    }

    /// New tab configuration from the shell.
    /// Once both init signals arrived, the widget list is recomputed and a redraw requested.
    pub fn set_tab(&mut self, tab: TabConfig) {
        self.tab = tab;
        if self.materialize() {
            self.change_detector.detect_changes();
        }
    }

    /// Project the widget content and relay its resize notifications
    pub fn after_content_init(&mut self) {
        if self.content.is_some() {
            return;
        }

        let mut content = WidgetContent::new(self.min_widget_height);
        content.set_widgets(&self.widgets);
        content.set_bounds(self.bounds);

        let relay = self.on_resize.clone();
        self.disposables
            .register(content.on_resize().subscribe(move |_| relay.fire(&())));
        self.content = Some(content);
    }

    fn materialize(&mut self) -> bool {
        if !(self.initted && self.on_initted) {
            return false;
        }
        let Some(widgets) = self.tab.widgets() else {
            return false;
        };

        tracing::debug!(tab = %self.tab.id, widgets = widgets.len(), "Materialized widgets");
        self.widgets = widgets;
        self.materialized = true;
        if let Some(content) = self.content.as_mut() {
            content.set_widgets(&self.widgets);
        }
        true
    }

    pub fn state(&self) -> ContainerState {
        match (self.initted, self.on_initted, self.materialized) {
            (_, _, true) => ContainerState::Ready,
            (false, false, false) => ContainerState::Uninitialized,
            _ => ContainerState::AwaitingConfig,
        }
    }

    pub fn widgets(&self) -> &[WidgetConfig] {
        &self.widgets
    }

    pub fn tab(&self) -> &TabConfig {
        &self.tab
    }

    pub fn content(&self) -> Option<&WidgetContent> {
        self.content.as_ref()
    }

    pub fn change_detector(&self) -> &ChangeDetector {
        &self.change_detector
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl TabChild for WidgetContainer {
    fn init(&mut self) {
        self.initted = true;
        self.materialize();
    }

    fn layout(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.layout();
        }
    }

    fn unmount(&mut self) {
        self.bounds = Rect::default();
        if let Some(content) = self.content.as_mut() {
            content.reset_layout();
        }
    }
}

impl Disposable for WidgetContainer {
    fn dispose(&mut self) {
        self.disposables.dispose();
    }
}

impl DashboardTab for WidgetContainer {
    fn id(&self) -> &str {
        &self.tab.id
    }

    fn editable(&self) -> bool {
        self.tab.editable
    }

    fn refresh(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.refresh();
        }
    }

    fn on_resize(&self) -> Event<()> {
        self.on_resize.event()
    }

    fn enable_edit(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.enable_edit();
        }
    }

    fn set_bounds(&mut self, area: Rect) {
        self.bounds = area;
        if let Some(content) = self.content.as_mut() {
            content.set_bounds(area);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        render_widget_content(frame, area, self.content.as_ref());
    }
}
