// Model module
// Descriptor-addressed components and the form container that arranges them

pub mod component;
pub mod form_container;
pub mod form_tab;

pub use component::{
    ComponentDescriptor, ComponentRef, ComponentRegistry, LabelComponent, ModelComponent,
    ModelComponentWrapper, ModelStore,
};
pub use form_container::{FormContainer, FormItem, FormLayout, FormRow, TitledFormItemLayout};
pub use form_tab::FormTab;
