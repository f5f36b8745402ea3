// Lifecycle integration tests
// Drive tabs, containers and the dialog through the public API

use ratatui::layout::Rect;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dashboard_panels::core::{
    BusEvent, ChangeDetector, Disposable, EventBus, LayoutSettings, SettingsStore, Subscription,
    YamlSettingsStore,
};
use dashboard_panels::dashboard::{
    ContainerState, DashboardService, DashboardTab, HomeContainer, TabConfig, WidgetConfig, WidgetContainer,
};
use dashboard_panels::dialog::{DashboardTabInfo, NewTabSelectionDialog, UiTab};
use dashboard_panels::panel::{Tab, VisibilityType};

const URI: &str = "mssql://localhost/master";

fn widget(name: &str) -> WidgetConfig {
    WidgetConfig {
        name: Some(name.to_string()),
        ..WidgetConfig::default()
    }
}

fn heights() -> LayoutSettings {
    LayoutSettings {
        collapsed_height: 3,
        expanded_height: 9,
        dialog_row_height: 3,
        widget_min_height: 1,
    }
}

#[test]
fn tab_activation_materializes_container_once() {
    let detector = ChangeDetector::new();
    let mut container = WidgetContainer::new(
        TabConfig::with_widgets("perf", "Performance", vec![widget("a"), widget("b")]),
        detector,
    );
    container.on_init();
    container.after_content_init();
    container.set_bounds(Rect::new(0, 0, 40, 20));
    assert_eq!(container.state(), ContainerState::AwaitingConfig);

    let mut tab: Tab<dyn DashboardTab> =
        Tab::with_child("Performance", "perf", Box::new(container) as Box<dyn DashboardTab>);
    let child = tab.child().unwrap();
    assert_eq!(child.id(), "perf");

    let resized = Rc::new(Cell::new(0));
    let counter = resized.clone();
    let mut sub = child.on_resize().subscribe(move |_: &()| counter.set(counter.get() + 1));

    tab.set_active(true);
    assert_eq!(resized.get(), 1);

    // Same bounds: layout runs again without a resize
    tab.set_active(true);
    assert_eq!(resized.get(), 1);

    tab.child_mut().unwrap().set_bounds(Rect::new(0, 0, 40, 30));
    tab.layout();
    assert_eq!(resized.get(), 2);

    sub.dispose();
    if let Some(child) = tab.child_mut() {
        child.dispose();
    }
    tab.dispose();
    assert!(tab.is_disposed());
}

fn mounted_tab(visibility: VisibilityType) -> (Tab<dyn DashboardTab>, Rc<Cell<usize>>, Subscription) {
    let mut container = WidgetContainer::new(
        TabConfig::with_widgets("perf", "Performance", vec![widget("a")]),
        ChangeDetector::new(),
    );
    container.on_init();
    container.after_content_init();

    let mut tab: Tab<dyn DashboardTab> =
        Tab::with_child("Performance", "perf", Box::new(container) as Box<dyn DashboardTab>)
            .with_visibility(visibility);
    let resized = Rc::new(Cell::new(0));
    let counter = resized.clone();
    let sub = tab
        .child()
        .unwrap()
        .on_resize()
        .subscribe(move |_: &()| counter.set(counter.get() + 1));

    tab.child_mut().unwrap().set_bounds(Rect::new(0, 0, 40, 20));
    tab.set_active(true);
    (tab, resized, sub)
}

fn reactivate(tab: &mut Tab<dyn DashboardTab>) {
    tab.set_active(false);
    tab.child_mut().unwrap().set_bounds(Rect::new(0, 0, 40, 20));
    tab.set_active(true);
}

#[test]
fn if_tab_remeasures_after_reactivation() {
    let (mut tab, resized, _sub) = mounted_tab(VisibilityType::If);
    assert_eq!(resized.get(), 1);

    // Same bounds as before, but the unmounted widgets lost their areas
    reactivate(&mut tab);
    assert!(tab.is_mounted());
    assert_eq!(resized.get(), 2);
}

#[test]
fn visibility_tab_keeps_measurements_while_hidden() {
    let (mut tab, resized, _sub) = mounted_tab(VisibilityType::Visibility);
    assert_eq!(resized.get(), 1);

    tab.set_active(false);
    assert!(tab.is_hidden());

    reactivate(&mut tab);
    assert!(!tab.is_hidden());
    assert_eq!(resized.get(), 1);
}

#[test]
fn home_collapse_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    let properties = WidgetConfig {
        name: Some("Properties".into()),
        context: "database".into(),
        ..WidgetConfig::default()
    };

    let open_home = || {
        let settings: Rc<dyn SettingsStore> = Rc::new(YamlSettingsStore::open(&path).unwrap());
        let bus = Rc::new(EventBus::new());
        let service = DashboardService::new(settings, bus.clone(), URI);
        let mut home = HomeContainer::new(
            TabConfig::with_widgets("homeTab", "Home", vec![widget("databases")]),
            Some(properties.clone()),
            service,
            ChangeDetector::new(),
            heights(),
        );
        home.on_init();
        home.after_content_init();
        (home, bus)
    };

    let (mut home, bus) = open_home();
    assert_eq!(home.is_properties_collapsed(), Some(false));
    bus.publish(URI, BusEvent::collapse_widget(home.properties_guid().unwrap()));
    assert_eq!(home.is_properties_collapsed(), Some(true));
    home.dispose();

    let persisted = std::fs::read_to_string(&path).unwrap();
    assert!(persisted.contains("dashboard.database.properties: collapsed"));

    let (mut reopened, bus) = open_home();
    assert_eq!(reopened.is_properties_collapsed(), Some(true));
    assert_eq!(reopened.properties_height(), 3);

    bus.publish(URI, BusEvent::collapse_widget(reopened.properties_guid().unwrap()));
    let persisted = std::fs::read_to_string(&path).unwrap();
    assert!(persisted.contains("dashboard.database.properties: true"));
    reopened.dispose();
}

#[test]
fn dialog_negotiation_emits_exactly_one_outcome() {
    let candidates: Vec<DashboardTabInfo> = ["a", "b", "c"]
        .iter()
        .map(|id| DashboardTabInfo {
            id: id.to_string(),
            title: id.to_uppercase(),
            ..DashboardTabInfo::default()
        })
        .collect();

    let mut dialog = NewTabSelectionDialog::new(3);
    let added: Rc<RefCell<Vec<Vec<UiTab>>>> = Rc::new(RefCell::new(Vec::new()));
    let cancels = Rc::new(Cell::new(0));

    let sink = added.clone();
    let mut add_sub = dialog
        .on_add_tabs()
        .subscribe(move |rows: &Vec<UiTab>| sink.borrow_mut().push(rows.clone()));
    let counter = cancels.clone();
    let mut cancel_sub = dialog
        .on_cancel()
        .subscribe(move |_: &()| counter.set(counter.get() + 1));

    dialog.open(&candidates, &[]);
    assert!(dialog.is_add_enabled());
    assert_eq!(dialog.selected_indices(), vec![0]);
    dialog.cancel();
    assert_eq!(cancels.get(), 1);
    assert!(added.borrow().is_empty());

    dialog.open(&candidates, &candidates[2..]);
    dialog.double_click(2);
    assert_eq!(cancels.get(), 1);
    let added = added.borrow();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].len(), 1);
    assert!(added[0][0].is_opened);

    add_sub.dispose();
    cancel_sub.dispose();
    dialog.dispose();
}
