// Application State
// The dashboard shell: open tabs, the active tab and the new tab dialog

use ratatui::layout::Rect;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::change_detection::ChangeDetector;
use super::eventing::{BusEvent, EventBus};
use super::lifecycle::{Disposable, DisposableStore};
use super::settings::SettingsStore;
use super::AppConfig;
use crate::dashboard::{DashboardService, DashboardTab, HomeContainer, TabConfig, WidgetContainer};
use crate::dialog::{DashboardTabInfo, NewTabSelectionDialog, UiTab};
use crate::model::{ComponentDescriptor, ComponentRegistry, FormContainer, FormTab, LabelComponent};
use crate::panel::{Tab, TabAction, VisibilityType};
use crate::render::DialogLayout;
use crate::shell_config::{FormTabConfig, ShellConfig};

/// Two clicks on the same dialog row within this window count as a double-click
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Main application state
pub struct App {
    /// Application configuration (built-in defaults)
    pub config: AppConfig,

    /// Dashboard title shown in the header
    pub title: String,

    /// Dashboard context new tabs are opened in
    context: String,

    /// Open tabs; the home tab is always first
    tabs: Vec<Tab<dyn DashboardTab>>,

    /// Index of the active tab
    active: usize,

    /// Mount strategy applied to every tab
    visibility: VisibilityType,

    /// Area assigned to tab content
    bounds: Rect,

    /// New tab selection dialog
    dialog: NewTabSelectionDialog,

    /// Rows confirmed in the dialog, waiting to be opened
    pending_tabs: Rc<RefCell<Vec<UiTab>>>,

    /// Tabs offered by the dialog
    available_tabs: Vec<DashboardTabInfo>,

    /// Settings and event bus shared by this dashboard's containers
    service: DashboardService,

    /// Redraw requests from containers
    change_detector: ChangeDetector,

    /// Guid of the home properties widget
    properties_guid: Option<String>,

    /// Last dialog row clicked, for double-click detection
    last_click: Option<(usize, Instant)>,

    subscriptions: DisposableStore,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Build the shell from its configuration and activate the home tab
    pub fn new(config: AppConfig, shell: &ShellConfig, settings: Rc<dyn SettingsStore>) -> Self {
        let change_detector = ChangeDetector::new();
        let service = DashboardService::new(settings, Rc::new(EventBus::new()), shell.uri.clone());
        let visibility = shell.visibility.unwrap_or(config.shell.default_visibility);

        let mut home = HomeContainer::new(
            shell.home_tab(),
            shell.properties.clone(),
            service.clone(),
            change_detector.clone(),
            config.layout,
        );
        home.on_init();
        home.after_content_init();
        let properties_guid = home.properties_guid();

        let dialog = NewTabSelectionDialog::new(config.layout.dialog_row_height);
        let pending_tabs = Rc::new(RefCell::new(Vec::new()));
        let mut subscriptions = DisposableStore::new();

        let pending = Rc::clone(&pending_tabs);
        subscriptions.register(dialog.on_add_tabs().subscribe(move |rows: &Vec<UiTab>| {
            pending.borrow_mut().extend(rows.iter().cloned());
        }));
        subscriptions.register(dialog.on_cancel().subscribe(|_: &()| {
            tracing::debug!("No tabs added");
        }));

        let mut app = Self {
            title: shell.title.clone(),
            context: shell.context.clone(),
            tabs: Vec::new(),
            active: 0,
            visibility,
            bounds: Rect::default(),
            dialog,
            pending_tabs,
            available_tabs: shell.available_tabs.clone(),
            service,
            change_detector,
            properties_guid,
            last_click: None,
            subscriptions,
            should_quit: false,
            config,
        };

        app.push_tab(Tab::with_child("Home", crate::constants::HOME_TAB_ID, Box::new(home) as Box<dyn DashboardTab>));
        for tab in &shell.tabs {
            let container = app.mount_container(tab.clone());
            app.push_closable(&tab.title, &tab.id, container);
        }
        if let Some(form) = &shell.form {
            let form_tab = Self::build_form_tab(form);
            app.push_closable(&form.title, &form.id, Box::new(form_tab));
        }

        app.switch_tab(0);
        app
    }

    /// Create a widget container and run its framework init signals
    fn mount_container(&self, mut tab: TabConfig) -> Box<dyn DashboardTab> {
        if tab.context.is_empty() {
            tab.context = self.context.clone();
        }
        let mut container = WidgetContainer::new(tab, self.change_detector.clone())
            .with_min_widget_height(self.config.layout.widget_min_height);
        container.on_init();
        container.after_content_init();
        Box::new(container)
    }

    fn build_form_tab(form: &FormTabConfig) -> FormTab {
        let registry = Rc::new(ComponentRegistry::new());
        for item in &form.items {
            let label = LabelComponent::new(item.id.clone(), item.text.clone()).with_type(item.component_type.clone());
            registry.register(Rc::new(RefCell::new(label)));
        }

        let mut container = FormContainer::new(ComponentDescriptor::new(form.id.clone(), FormContainer::TYPE), registry)
            .with_alignment(form.layout.clone());
        for item in &form.items {
            container.add_to_container(
                ComponentDescriptor::new(item.id.clone(), item.component_type.clone()),
                item.layout.clone(),
            );
        }

        // The tab owns the form; the registry only holds the form's items
        FormTab::new(form.id.clone(), Rc::new(RefCell::new(container)))
    }

    fn push_tab(&mut self, tab: Tab<dyn DashboardTab>) {
        self.tabs.push(tab.with_visibility(self.visibility));
    }

    fn push_closable(&mut self, title: &str, id: &str, child: Box<dyn DashboardTab>) {
        let tab = Tab::with_child(title, id, child)
            .closable(true)
            .with_actions(vec![Box::new(TabAction::new("close", "Close"))]);
        self.push_tab(tab);
    }

    // === Tabs ===

    pub fn tabs(&self) -> &[Tab<dyn DashboardTab>] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab<dyn DashboardTab>> {
        self.tabs.get(self.active)
    }

    pub fn tab_titles(&self) -> Vec<String> {
        self.tabs.iter().map(|tab| tab.title.clone()).collect()
    }

    /// Deactivate the current tab and activate `index`
    pub fn switch_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        if index != self.active {
            if let Some(previous) = self.tabs.get_mut(self.active) {
                previous.set_active(false);
            }
        }
        self.active = index;

        let bounds = self.bounds;
        let tab = &mut self.tabs[index];
        if let Some(child) = tab.child_mut() {
            child.set_bounds(bounds);
        }
        tracing::info!(tab = %tab.identifier, "Activating tab");
        tab.set_active(true);
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.switch_tab((self.active + 1) % self.tabs.len());
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.switch_tab((self.active + self.tabs.len() - 1) % self.tabs.len());
        }
    }

    /// Close the active tab if it can be closed
    pub fn close_active_tab(&mut self) {
        let Some(tab) = self.tabs.get(self.active) else {
            return;
        };
        if !tab.can_close {
            return;
        }

        let mut tab = self.tabs.remove(self.active);
        tracing::info!(tab = %tab.identifier, "Closing tab");
        dispose_tab(&mut tab);

        let next = self.active.min(self.tabs.len().saturating_sub(1));
        // The removed tab was active; force activation of its neighbour
        self.active = usize::MAX;
        self.switch_tab(next);
    }

    /// Assign the content area, laying out the active tab when it changed
    pub fn set_bounds(&mut self, area: Rect) {
        if self.bounds == area {
            return;
        }
        self.bounds = area;
        if let Some(tab) = self.tabs.get_mut(self.active) {
            if let Some(child) = tab.child_mut() {
                child.set_bounds(area);
            }
            tab.layout();
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Lay out the active tab again if a container requested a redraw
    pub fn apply_pending_changes(&mut self) -> bool {
        if !self.change_detector.take_pending() {
            return false;
        }
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.layout();
        }
        true
    }

    pub fn refresh(&mut self) {
        if let Some(child) = self.tabs.get_mut(self.active).and_then(|tab| tab.child_mut()) {
            child.refresh();
        }
    }

    pub fn enable_edit(&mut self) {
        if let Some(child) = self.tabs.get_mut(self.active).and_then(|tab| tab.child_mut()) {
            if child.editable() {
                child.enable_edit();
            }
        }
    }

    /// Ask the home properties widget to collapse or expand
    pub fn toggle_properties(&mut self) {
        let Some(guid) = self.properties_guid.clone() else {
            return;
        };
        self.service
            .event_bus()
            .publish(self.service.underlying_uri(), BusEvent::collapse_widget(guid));
        self.apply_pending_changes();
    }

    // === Dialog ===

    pub fn dialog(&self) -> &NewTabSelectionDialog {
        &self.dialog
    }

    pub fn is_modal(&self) -> bool {
        self.dialog.is_visible()
    }

    /// Offer the available tabs, marking those already open
    pub fn open_tab_dialog(&mut self) {
        let opened: Vec<DashboardTabInfo> = self
            .tabs
            .iter()
            .map(|tab| DashboardTabInfo {
                id: tab.identifier.clone(),
                title: tab.title.clone(),
                ..DashboardTabInfo::default()
            })
            .collect();
        self.dialog.open(&self.available_tabs, &opened);
    }

    pub fn handle_dialog_key(&mut self, key: crossterm::event::KeyEvent) {
        self.dialog.handle_key(key);
        self.add_pending_tabs();
    }

    /// Route a left click to the dialog
    pub fn handle_dialog_click(&mut self, layout: &DialogLayout, column: u16, row: u16) {
        let inside = |area: Rect| {
            column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
        };

        if inside(layout.ok_button) {
            self.dialog.confirm();
        } else if inside(layout.cancel_button) {
            self.dialog.cancel();
        } else if let Some(index) = self.dialog.row_at(layout.list, column, row) {
            let now = Instant::now();
            let double = matches!(self.last_click, Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK_WINDOW);
            if double {
                self.last_click = None;
                self.dialog.double_click(index);
            } else {
                self.last_click = Some((index, now));
                self.dialog.toggle_selection(index);
            }
        }
        self.add_pending_tabs();
    }

    /// Open tabs confirmed in the dialog. Rows already open are switched to.
    pub fn add_pending_tabs(&mut self) {
        let rows: Vec<UiTab> = self.pending_tabs.borrow_mut().drain(..).collect();
        let mut last = None;

        for row in rows {
            let info = &row.tab_config;
            if let Some(index) = self.tabs.iter().position(|tab| tab.identifier == info.id) {
                last = Some(index);
                continue;
            }
            tracing::info!(tab = %info.id, publisher = %info.publisher, "Opening tab");
            let container = self.mount_container(info.to_tab_config(&self.context));
            self.push_closable(&info.title, &info.id, container);
            last = Some(self.tabs.len() - 1);
        }

        if let Some(index) = last {
            self.switch_tab(index);
        }
    }

    // === Lifecycle ===

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Release every tab, the dialog and the shell's subscriptions
    pub fn dispose_all(&mut self) {
        for tab in self.tabs.iter_mut() {
            dispose_tab(tab);
        }
        self.dialog.dispose();
        self.subscriptions.dispose();
    }
}

fn dispose_tab(tab: &mut Tab<dyn DashboardTab>) {
    if let Some(child) = tab.child_mut() {
        child.dispose();
    }
    tab.dispose();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{ConfigValue, MemorySettings};
    use crate::panel::TabChild;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    const CONFIG: &str = r#"
title: Test Dashboard
context: server
uri: "mssql://localhost/master"
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
available_tabs:
  - id: performance
    title: Performance
  - id: security
    title: Security
    container:
      widgets-container:
        - name: Logins
        - name: Roles
"#;

    fn app_with(settings: Rc<MemorySettings>) -> App {
        let shell = ShellConfig::parse(CONFIG).unwrap();
        let mut app = App::new(AppConfig::default(), &shell, settings);
        app.set_bounds(Rect::new(0, 0, 80, 40));
        app
    }

    fn app() -> App {
        app_with(Rc::new(MemorySettings::new()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_closed_form_tab_releases_its_form() {
        let form: FormTabConfig = serde_yaml::from_str(
            r#"
id: settings
title: Settings
items:
  - id: name
    text: Server
    layout:
      title: Name
      actions: [reconnect]
      isFormComponent: true
  - id: reconnect
    type: button
    text: Reconnect
"#,
        )
        .unwrap();

        let mut tab = App::build_form_tab(&form);
        tab.layout();
        let form = Rc::downgrade(tab.form());
        assert_eq!(form.upgrade().map(|f| f.borrow().rows().len()), Some(1));

        tab.dispose();
        drop(tab);
        assert!(form.upgrade().is_none());
    }

    #[test]
    fn test_home_tab_active_on_start() {
        let app = app();
        assert_eq!(app.tab_titles(), vec!["Home", "Performance"]);
        assert_eq!(app.active_index(), 0);
        assert!(app.active_tab().unwrap().is_active());
        assert!(!app.tabs()[1].is_active());
        assert!(!app.tabs()[0].can_close);
    }

    #[test]
    fn test_switching_tabs_deactivates_previous() {
        let mut app = app();
        app.next_tab();
        assert_eq!(app.active_index(), 1);
        assert!(!app.tabs()[0].is_active());
        assert!(app.tabs()[1].is_active());

        app.next_tab();
        assert_eq!(app.active_index(), 0);
        app.previous_tab();
        assert_eq!(app.active_index(), 1);
    }

    #[test]
    fn test_dialog_adds_new_tab_and_switches_to_it() {
        let mut app = app();
        app.open_tab_dialog();
        assert!(app.is_modal());

        let rows = app.dialog().rows();
        assert!(rows[0].is_opened);
        assert!(!rows[1].is_opened);

        app.handle_dialog_key(key(KeyCode::Down));
        app.handle_dialog_key(key(KeyCode::Enter));

        assert!(!app.is_modal());
        assert_eq!(app.tab_titles(), vec!["Home", "Performance", "Security"]);
        assert_eq!(app.active_index(), 2);
        assert!(app.tabs()[2].can_close);
    }

    #[test]
    fn test_confirming_open_tab_switches_without_duplicating() {
        let mut app = app();
        app.open_tab_dialog();
        app.handle_dialog_key(key(KeyCode::Enter));

        assert_eq!(app.tabs().len(), 2);
        assert_eq!(app.active_index(), 1);
    }

    #[test]
    fn test_cancel_adds_nothing() {
        let mut app = app();
        app.open_tab_dialog();
        app.handle_dialog_key(key(KeyCode::Esc));

        assert!(!app.is_modal());
        assert_eq!(app.tabs().len(), 2);
        assert_eq!(app.active_index(), 0);
    }

    #[test]
    fn test_toggle_properties_persists_and_relayouts() {
        let settings = Rc::new(MemorySettings::new());
        let mut app = app_with(settings.clone());

        app.toggle_properties();
        assert_eq!(
            settings.user_value("dashboard.server.properties"),
            Some(ConfigValue::Text("collapsed".into()))
        );
        assert!(!app.apply_pending_changes());

        app.toggle_properties();
        assert_eq!(
            settings.user_value("dashboard.server.properties"),
            Some(ConfigValue::Flag(true))
        );
    }

    #[test]
    fn test_close_tab_keeps_home() {
        let mut app = app();
        app.close_active_tab();
        assert_eq!(app.tabs().len(), 2);

        app.next_tab();
        app.close_active_tab();
        assert_eq!(app.tab_titles(), vec!["Home"]);
        assert_eq!(app.active_index(), 0);
        assert!(app.tabs()[0].is_active());
    }

    #[test]
    fn test_dispose_all_releases_bus_listeners() {
        let mut app = app();
        let uri = app.service.underlying_uri().to_string();
        assert_eq!(app.service.event_bus().listener_count(&uri), 1);

        app.dispose_all();
        assert_eq!(app.service.event_bus().listener_count(&uri), 0);
        assert!(app.tabs().iter().all(|tab| tab.is_disposed()));
    }
}
