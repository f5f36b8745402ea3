// Form Container
// Lays out a flat list of components as titled rows with optional inline actions

use serde::Deserialize;
use std::rc::Rc;

use super::component::{ComponentDescriptor, ModelComponent, ModelComponentWrapper, ModelStore};

/// Per-item form configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitledFormItemLayout {
    pub title: String,
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub is_form_component: bool,
}

/// A component placed in the form together with its layout config
#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    pub descriptor: ComponentDescriptor,
    pub config: Option<TitledFormItemLayout>,
}

impl FormItem {
    pub fn new(descriptor: ComponentDescriptor, config: Option<TitledFormItemLayout>) -> Self {
        Self { descriptor, config }
    }
}

/// Container-level layout parameters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    #[serde(default)]
    pub align_items: Option<String>,
    #[serde(default)]
    pub align_content: Option<String>,
}

/// One rendered row: the item's title, the item itself and its resolved actions
#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub title: String,
    pub descriptor: ComponentDescriptor,
    pub actions: Vec<ComponentDescriptor>,
}

/// Container that renders form components as rows
pub struct FormContainer {
    descriptor: ComponentDescriptor,
    store: Rc<dyn ModelStore>,
    items: Vec<FormItem>,
    wrappers: Vec<ModelComponentWrapper>,
    layout: FormLayout,
}

impl FormContainer {
    pub const TYPE: &'static str = "form";

    pub fn new(descriptor: ComponentDescriptor, store: Rc<dyn ModelStore>) -> Self {
        Self {
            descriptor,
            store,
            items: Vec::new(),
            wrappers: Vec::new(),
            layout: FormLayout::default(),
        }
    }

    pub fn with_alignment(mut self, layout: FormLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn add_to_container(&mut self, descriptor: ComponentDescriptor, config: Option<TitledFormItemLayout>) {
        self.items.push(FormItem::new(descriptor, config));
        self.mount();
    }

    pub fn clear_container(&mut self) {
        self.items.clear();
        self.mount();
    }

    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    /// Rebuild the mounted wrappers from the current rows
    fn mount(&mut self) {
        self.wrappers = self
            .rows()
            .into_iter()
            .flat_map(|row| std::iter::once(row.descriptor).chain(row.actions))
            .map(|descriptor| ModelComponentWrapper::new(descriptor, Rc::clone(&self.store)))
            .collect();
        tracing::debug!(
            form = %self.descriptor.id,
            items = self.items.len(),
            mounted = self.wrappers.len(),
            "Mounted form components"
        );
    }

    /// Only items flagged as form components are rendered as rows
    pub fn is_form_component(&self, item: &FormItem) -> bool {
        item.config.as_ref().is_some_and(|config| config.is_form_component)
    }

    pub fn item_title(&self, item: &FormItem) -> String {
        item.config
            .as_ref()
            .map(|config| config.title.clone())
            .unwrap_or_default()
    }

    pub fn item_has_actions(&self, item: &FormItem) -> bool {
        item.config
            .as_ref()
            .and_then(|config| config.actions.as_ref())
            .is_some_and(|actions| !actions.is_empty())
    }

    /// Items referenced by `item`'s action ids, in action order.
    /// Ids that match no item in this container are dropped.
    pub fn action_components(&self, item: &FormItem) -> Vec<&FormItem> {
        let Some(actions) = item.config.as_ref().and_then(|config| config.actions.as_ref()) else {
            return Vec::new();
        };
        actions
            .iter()
            .filter_map(|id| self.items.iter().find(|candidate| candidate.descriptor.id == *id))
            .collect()
    }

    pub fn rows(&self) -> Vec<FormRow> {
        self.items
            .iter()
            .filter(|item| self.is_form_component(item))
            .map(|item| FormRow {
                title: self.item_title(item),
                descriptor: item.descriptor.clone(),
                actions: if self.item_has_actions(item) {
                    self.action_components(item)
                        .into_iter()
                        .map(|action| action.descriptor.clone())
                        .collect()
                } else {
                    Vec::new()
                },
            })
            .collect()
    }

    /// Display text of a component, as resolved by the store
    pub fn component_title(&self, descriptor: &ComponentDescriptor) -> Option<String> {
        let component = self.store.get_component(&descriptor.id)?;
        let title = component.try_borrow().ok()?.title();
        Some(title)
    }

    pub fn mounted_count(&self) -> usize {
        self.wrappers.len()
    }

    /// Layout parameters are not applied by this container
    pub fn set_layout(&mut self, _layout: FormLayout) {
        self.layout_wrappers();
    }

    pub fn align_items(&self) -> Option<&str> {
        self.layout.align_items.as_deref()
    }

    pub fn align_content(&self) -> Option<&str> {
        self.layout.align_content.as_deref()
    }

    fn layout_wrappers(&mut self) {
        for wrapper in &mut self.wrappers {
            wrapper.layout();
        }
    }
}

impl ModelComponent for FormContainer {
    fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    fn layout(&mut self) {
        self.layout_wrappers();
    }
}

impl std::fmt::Debug for FormContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContainer")
            .field("descriptor", &self.descriptor)
            .field("items", &self.items)
            .field("mounted", &self.wrappers.len())
            .field("layout", &self.layout)
            .finish()
    }
}
