// Cross-Component Eventing
// A bus of URI-scoped channels shared by every component of a dashboard

use std::cell::RefCell;
use std::collections::HashMap;

use super::emitter::{Emitter, Subscription};

/// Kinds of events carried on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Navigate to a database dashboard
    NavDatabase,
    /// Navigate to a server dashboard
    NavServer,
    /// Open new tabs
    NewTabs,
    /// Close a tab
    CloseTab,
    /// Toggle the collapsed state of the widget whose guid is the payload
    CollapseWidget,
}

/// An event on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusEvent {
    pub event: EventType,
    pub payload: String,
}

impl BusEvent {
    pub fn new(event: EventType, payload: impl Into<String>) -> Self {
        Self {
            event,
            payload: payload.into(),
        }
    }

    pub fn collapse_widget(guid: impl Into<String>) -> Self {
        Self::new(EventType::CollapseWidget, guid)
    }
}

/// URI-scoped publish/subscribe bus.
///
/// Several dashboards may listen on the same bus; payloads identify which
/// component instance an event is meant for.
#[derive(Debug, Default)]
pub struct EventBus {
    channels: RefCell<HashMap<String, Emitter<BusEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to every event published for `uri`
    pub fn on_event(&self, uri: &str, listener: impl Fn(&BusEvent) + 'static) -> Subscription {
        let event = self
            .channels
            .borrow_mut()
            .entry(uri.to_string())
            .or_default()
            .event();
        event.subscribe(listener)
    }

    /// Deliver `event` synchronously to the listeners of `uri`
    pub fn publish(&self, uri: &str, event: BusEvent) {
        // Release the channel map before delivery so listeners may subscribe or publish
        let emitter = self.channels.borrow().get(uri).cloned();
        match emitter {
            Some(emitter) => emitter.fire(&event),
            None => tracing::debug!(uri, event = ?event.event, "No listeners for bus event"),
        }
    }

    /// Number of listeners registered for `uri`
    pub fn listener_count(&self, uri: &str) -> usize {
        self.channels
            .borrow()
            .get(uri)
            .map(|emitter| emitter.listener_count())
            .unwrap_or(0)
    }
}
