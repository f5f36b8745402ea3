// Home Container
// Widget container with an additional collapsible properties widget on top

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::widget_container::WidgetContainer;
use crate::constants::{properties_config_key, properties_setting_key, COLLAPSED_MARKER};
use crate::core::app_config::LayoutSettings;
use crate::core::change_detection::ChangeDetector;
use crate::core::emitter::Event;
use crate::core::eventing::EventType;
use crate::core::lifecycle::{Disposable, DisposableStore};
use crate::core::settings::{ConfigEdit, ConfigValue, ConfigurationTarget};
use crate::dashboard::config::{TabConfig, WidgetConfig};
use crate::dashboard::interfaces::DashboardTab;
use crate::dashboard::service::DashboardService;
use crate::dashboard::widget_wrapper::WidgetWrapper;
use crate::panel::TabChild;
use crate::render::render_home;

/// The home tab of a dashboard
#[derive(Debug)]
pub struct HomeContainer {
    inner: WidgetContainer,
    properties: Option<Rc<RefCell<WidgetWrapper>>>,
    service: DashboardService,
    heights: LayoutSettings,
    bounds: Rect,
    content_ready: bool,
    subscriptions: DisposableStore,
}

impl HomeContainer {
    pub fn new(
        tab: TabConfig,
        properties: Option<WidgetConfig>,
        service: DashboardService,
        change_detector: ChangeDetector,
        heights: LayoutSettings,
    ) -> Self {
        let inner = WidgetContainer::new(tab, change_detector)
            .with_min_widget_height(heights.widget_min_height);
        Self {
            inner,
            properties: properties
                .map(|config| Rc::new(RefCell::new(WidgetWrapper::new(config).collapsable(true)))),
            service,
            heights,
            bounds: Rect::default(),
            content_ready: false,
            subscriptions: DisposableStore::new(),
        }
    }

    pub fn on_init(&mut self) {
        self.inner.on_init();
    }

    pub fn set_tab(&mut self, tab: TabConfig) {
        self.inner.set_tab(tab);
    }

    /// Restore the persisted collapsed state and start listening for collapse toggles
    pub fn after_content_init(&mut self) {
        self.inner.after_content_init();
        if self.content_ready {
            return;
        }
        self.content_ready = true;

        let Some(properties) = self.properties.clone() else {
            return;
        };
        let context = properties.borrow().config().context.clone();

        let persisted = self.service.get_settings(&properties_setting_key(&context));
        if persisted.as_deref() == Some(COLLAPSED_MARKER) {
            properties.borrow_mut().set_collapsed(true);
        }

        let weak = Rc::downgrade(&properties);
        let detector = self.inner.change_detector().clone();
        let settings = self.service.settings();
        let key = properties_config_key(&context);
        let subscription = self
            .service
            .event_bus()
            .on_event(self.service.underlying_uri(), move |event| {
                if event.event != EventType::CollapseWidget {
                    return;
                }
                let Some(properties) = weak.upgrade() else {
                    return;
                };
                if event.payload != properties.borrow().guid() {
                    return;
                }

                let collapsed = {
                    let mut wrapper = properties.borrow_mut();
                    let collapsed = !wrapper.is_collapsed();
                    wrapper.set_collapsed(collapsed);
                    collapsed
                };
                detector.detect_changes();

                let value = if collapsed {
                    ConfigValue::Text(COLLAPSED_MARKER.to_string())
                } else {
                    ConfigValue::Flag(true)
                };
                tracing::info!(key = %key, collapsed, "Toggled properties widget");
                if let Err(err) = settings
                    .write_configuration(ConfigurationTarget::User, ConfigEdit::new(key.clone(), value))
                {
                    tracing::warn!(key = %key, error = %err, "Failed to persist properties state");
                }
            });
        self.subscriptions.register(subscription);
    }

    /// Guid of the properties widget, the payload that toggles it
    pub fn properties_guid(&self) -> Option<String> {
        self.properties
            .as_ref()
            .map(|properties| properties.borrow().guid().to_string())
    }

    pub fn is_properties_collapsed(&self) -> Option<bool> {
        self.properties
            .as_ref()
            .map(|properties| properties.borrow().is_collapsed())
    }

    /// Two-state height of the properties widget
    pub fn properties_height(&self) -> u16 {
        match self.is_properties_collapsed() {
            Some(true) => self.heights.collapsed_height,
            Some(false) => self.heights.expanded_height,
            None => 0,
        }
    }

    pub fn properties(&self) -> Option<WidgetWrapper> {
        self.properties
            .as_ref()
            .map(|properties| properties.borrow().clone())
    }

    pub fn container(&self) -> &WidgetContainer {
        &self.inner
    }

    fn split_bounds(&self) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.properties_height()),
                Constraint::Min(0),
            ])
            .split(self.bounds);
        (chunks[0], chunks[1])
    }
}

impl TabChild for HomeContainer {
    fn init(&mut self) {
        self.inner.init();
    }

    fn layout(&mut self) {
        let (properties_area, content_area) = self.split_bounds();
        if let Some(properties) = self.properties.as_ref() {
            properties.borrow_mut().layout(properties_area);
        }
        self.inner.set_bounds(content_area);
        self.inner.layout();
    }

    fn unmount(&mut self) {
        self.bounds = Rect::default();
        if let Some(properties) = self.properties.as_ref() {
            properties.borrow_mut().reset_area();
        }
        self.inner.unmount();
    }
}

impl Disposable for HomeContainer {
    fn dispose(&mut self) {
        self.subscriptions.dispose();
        self.inner.dispose();
    }
}

impl DashboardTab for HomeContainer {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn editable(&self) -> bool {
        self.inner.editable()
    }

    fn refresh(&mut self) {
        if let Some(properties) = self.properties.as_ref() {
            properties.borrow_mut().refresh();
        }
        self.inner.refresh();
    }

    fn on_resize(&self) -> Event<()> {
        self.inner.on_resize()
    }

    fn enable_edit(&mut self) {
        self.inner.enable_edit();
    }

    fn set_bounds(&mut self, area: Rect) {
        self.bounds = area;
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let properties = self.properties();
        render_home(frame, area, properties.as_ref(), self.properties_height(), self.inner.content());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::eventing::{BusEvent, EventBus};
    use crate::core::settings::MemorySettings;

    const URI: &str = "mssql://localhost/master";

    struct Fixture {
        settings: Rc<MemorySettings>,
        bus: Rc<EventBus>,
        detector: ChangeDetector,
        home: HomeContainer,
    }

    fn fixture(settings: MemorySettings) -> Fixture {
        let settings = Rc::new(settings);
        let bus = Rc::new(EventBus::new());
        let detector = ChangeDetector::new();
        let service = DashboardService::new(settings.clone(), bus.clone(), URI);
        let properties = WidgetConfig {
            name: Some("Properties".into()),
            context: "server".into(),
            ..WidgetConfig::default()
        };
        let mut home = HomeContainer::new(
            TabConfig::with_widgets("homeTab", "Home", vec![WidgetConfig::default()]),
            Some(properties),
            service,
            detector.clone(),
            LayoutSettings {
                collapsed_height: 3,
                expanded_height: 9,
                dialog_row_height: 3,
                widget_min_height: 1,
            },
        );
        home.on_init();
        home.after_content_init();
        home.init();
        Fixture { settings, bus, detector, home }
    }

    fn toggle(fx: &Fixture) {
        let guid = fx.home.properties_guid().unwrap();
        fx.bus.publish(URI, BusEvent::collapse_widget(guid));
    }

    #[test]
    fn test_starts_collapsed_from_persisted_marker() {
        let fx = fixture(MemorySettings::new().with_user_value(
            "dashboard.server.properties",
            ConfigValue::Text("collapsed".into()),
        ));
        assert_eq!(fx.home.is_properties_collapsed(), Some(true));
        assert_eq!(fx.home.properties_height(), 3);
    }

    #[test]
    fn test_expanded_sentinel_does_not_collapse() {
        let fx = fixture(MemorySettings::new().with_user_value("dashboard.server.properties", ConfigValue::Flag(true)));
        assert_eq!(fx.home.is_properties_collapsed(), Some(false));
        assert_eq!(fx.home.properties_height(), 9);
    }

    #[test]
    fn test_toggle_round_trip_persists_asymmetric_values() {
        let fx = fixture(MemorySettings::new());
        assert_eq!(fx.home.is_properties_collapsed(), Some(false));

        toggle(&fx);
        assert_eq!(fx.home.is_properties_collapsed(), Some(true));
        assert_eq!(
            fx.settings.user_value("dashboard.server.properties"),
            Some(ConfigValue::Text("collapsed".into()))
        );

        toggle(&fx);
        assert_eq!(fx.home.is_properties_collapsed(), Some(false));
        assert_eq!(
            fx.settings.user_value("dashboard.server.properties"),
            Some(ConfigValue::Flag(true))
        );

        toggle(&fx);
        let writes = fx.settings.writes();
        assert_eq!(writes.len(), 3);
        assert!(writes.iter().all(|(target, _)| *target == ConfigurationTarget::User));
        assert_eq!(writes[2].1.value, ConfigValue::Text("collapsed".into()));
        assert_eq!(fx.detector.request_count(), 3);
    }

    #[test]
    fn test_ignores_other_payloads_and_event_types() {
        let fx = fixture(MemorySettings::new());
        fx.bus.publish(URI, BusEvent::collapse_widget("someone-else"));
        let guid = fx.home.properties_guid().unwrap();
        fx.bus.publish(URI, BusEvent::new(EventType::CloseTab, guid.clone()));
        fx.bus.publish("mssql://elsewhere", BusEvent::collapse_widget(guid));

        assert_eq!(fx.home.is_properties_collapsed(), Some(false));
        assert!(fx.settings.writes().is_empty());
        assert_eq!(fx.detector.request_count(), 0);
    }

    #[test]
    fn test_collapse_shrinks_properties_and_resizes_content() {
        let mut fx = fixture(MemorySettings::new());
        fx.home.set_bounds(Rect::new(0, 0, 40, 30));
        fx.home.layout();
        assert_eq!(fx.home.properties().unwrap().area().height, 9);

        let resized = Rc::new(std::cell::Cell::new(0));
        let counter = resized.clone();
        let _sub = fx.home.on_resize().subscribe(move |_: &()| counter.set(counter.get() + 1));

        toggle(&fx);
        fx.home.layout();

        assert_eq!(fx.home.properties().unwrap().area().height, 3);
        assert_eq!(resized.get(), 1);
    }

    #[test]
    fn test_unmount_keeps_collapse_state_but_drops_areas() {
        let mut fx = fixture(MemorySettings::new());
        fx.home.set_bounds(Rect::new(0, 0, 40, 30));
        fx.home.layout();
        toggle(&fx);

        fx.home.unmount();

        assert_eq!(fx.home.properties().unwrap().area(), Rect::default());
        assert_eq!(fx.home.container().bounds(), Rect::default());
        assert_eq!(fx.home.is_properties_collapsed(), Some(true));

        fx.home.set_bounds(Rect::new(0, 0, 40, 30));
        fx.home.layout();
        assert_eq!(fx.home.properties().unwrap().area().height, 3);
    }

    #[test]
    fn test_dispose_stops_listening() {
        let mut fx = fixture(MemorySettings::new());
        assert_eq!(fx.bus.listener_count(URI), 1);
        fx.home.dispose();
        assert_eq!(fx.bus.listener_count(URI), 0);

        toggle(&fx);
        assert_eq!(fx.home.is_properties_collapsed(), Some(false));
    }
}
