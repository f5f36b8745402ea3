// Model Components
// Descriptor-addressed components and the store that owns them

use ratatui::layout::Rect;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a live component
pub type ComponentRef = Rc<RefCell<dyn ModelComponent>>;

/// Identifies a component instance by id and names its type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ComponentDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
}

impl ComponentDescriptor {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
        }
    }
}

/// A component that can be hosted by a container
pub trait ModelComponent {
    fn descriptor(&self) -> &ComponentDescriptor;

    fn layout(&mut self);

    /// Text shown when the component is rendered inline
    fn title(&self) -> String {
        self.descriptor().id.clone()
    }

    /// Area assigned by the hosting container
    fn set_area(&mut self, _area: Rect) {}
}

/// Resolves descriptor ids to live components
pub trait ModelStore {
    fn get_component(&self, id: &str) -> Option<ComponentRef>;
}

/// In-memory store; one instance per id for its whole lifetime
#[derive(Default)]
pub struct ComponentRegistry {
    components: RefCell<HashMap<String, ComponentRef>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under its descriptor id.
    /// An id already registered keeps its existing instance, which is returned.
    pub fn register(&self, component: ComponentRef) -> ComponentRef {
        let id = component.borrow().descriptor().id.clone();
        let mut components = self.components.borrow_mut();
        Rc::clone(components.entry(id).or_insert(component))
    }

    pub fn len(&self) -> usize {
        self.components.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.borrow().is_empty()
    }
}

impl ModelStore for ComponentRegistry {
    fn get_component(&self, id: &str) -> Option<ComponentRef> {
        self.components.borrow().get(id).cloned()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let components = self.components.borrow();
        let mut ids: Vec<&String> = components.keys().collect();
        ids.sort();
        f.debug_struct("ComponentRegistry").field("ids", &ids).finish()
    }
}

/// Static text component
#[derive(Debug, Clone)]
pub struct LabelComponent {
    descriptor: ComponentDescriptor,
    text: String,
    area: Rect,
    layout_count: usize,
}

impl LabelComponent {
    pub const TYPE: &'static str = "label";

    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            descriptor: ComponentDescriptor::new(id, Self::TYPE),
            text: text.into(),
            area: Rect::default(),
            layout_count: 0,
        }
    }

    /// Render under another component type, e.g. a button
    pub fn with_type(mut self, component_type: impl Into<String>) -> Self {
        self.descriptor.component_type = component_type.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn layout_count(&self) -> usize {
        self.layout_count
    }
}

impl ModelComponent for LabelComponent {
    fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    fn layout(&mut self) {
        self.layout_count += 1;
    }

    fn title(&self) -> String {
        self.text.clone()
    }

    fn set_area(&mut self, area: Rect) {
        self.area = area;
    }
}

/// Mount point for a component addressed by descriptor.
/// The component is looked up when layout runs, not when the wrapper is created.
pub struct ModelComponentWrapper {
    descriptor: ComponentDescriptor,
    store: Rc<dyn ModelStore>,
    component: Option<ComponentRef>,
}

impl ModelComponentWrapper {
    pub fn new(descriptor: ComponentDescriptor, store: Rc<dyn ModelStore>) -> Self {
        Self {
            descriptor,
            store,
            component: None,
        }
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    fn resolve(&mut self) -> Option<ComponentRef> {
        if self.component.is_none() {
            self.component = self.store.get_component(&self.descriptor.id);
        }
        self.component.clone()
    }

    /// Lay out the wrapped component; no-op while the id is unknown to the store
    pub fn layout(&mut self) {
        let Some(component) = self.resolve() else {
            tracing::debug!(id = %self.descriptor.id, "Component not in store; skipping layout");
            return;
        };
        // A container listed among its own items is already borrowed here
        match component.try_borrow_mut() {
            Ok(mut component) => component.layout(),
            Err(_) => tracing::warn!(id = %self.descriptor.id, "Component is already laying out"),
        };
    }

    /// Title of the resolved component, if any
    pub fn title(&mut self) -> Option<String> {
        let component = self.resolve()?;
        let title = component.try_borrow().ok()?.title();
        Some(title)
    }

    pub fn is_resolved(&self) -> bool {
        self.component.is_some()
    }
}

impl std::fmt::Debug for ModelComponentWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelComponentWrapper")
            .field("descriptor", &self.descriptor)
            .field("resolved", &self.component.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(id: &str) -> Rc<RefCell<LabelComponent>> {
        Rc::new(RefCell::new(LabelComponent::new(id, id.to_uppercase())))
    }

    #[test]
    fn test_registry_keeps_first_instance_per_id() {
        let registry = ComponentRegistry::new();
        let first = label("name");
        registry.register(first.clone());
        let kept = registry.register(label("name"));

        assert_eq!(registry.len(), 1);
        kept.borrow_mut().layout();
        assert_eq!(first.borrow().layout_count(), 1);
    }

    #[test]
    fn test_wrapper_resolves_lazily_at_layout() {
        let registry = Rc::new(ComponentRegistry::new());
        let mut wrapper =
            ModelComponentWrapper::new(ComponentDescriptor::new("late", "label"), registry.clone());

        wrapper.layout();
        assert!(!wrapper.is_resolved());

        let component = label("late");
        registry.register(component.clone());
        wrapper.layout();

        assert!(wrapper.is_resolved());
        assert_eq!(component.borrow().layout_count(), 1);
        assert_eq!(wrapper.title().as_deref(), Some("LATE"));
    }

    #[test]
    fn test_descriptor_deserializes_type_field() {
        let descriptor: ComponentDescriptor =
            serde_yaml::from_str("id: ok-button\ntype: button\n").unwrap();
        assert_eq!(descriptor, ComponentDescriptor::new("ok-button", "button"));
    }
}
