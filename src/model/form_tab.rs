// Form Tab
// Hosts a FormContainer as a dashboard tab

use ratatui::{layout::Rect, Frame};
use std::cell::RefCell;
use std::rc::Rc;

use super::component::ModelComponent;
use super::form_container::FormContainer;
use crate::core::emitter::{Emitter, Event};
use crate::core::lifecycle::Disposable;
use crate::dashboard::interfaces::DashboardTab;
use crate::panel::TabChild;
use crate::render::render_form;

/// Dashboard tab whose content is a form
#[derive(Debug)]
pub struct FormTab {
    id: String,
    form: Rc<RefCell<FormContainer>>,
    bounds: Rect,
    on_resize: Emitter<()>,
    disposed: bool,
}

impl FormTab {
    pub fn new(id: impl Into<String>, form: Rc<RefCell<FormContainer>>) -> Self {
        Self {
            id: id.into(),
            form,
            bounds: Rect::default(),
            on_resize: Emitter::new(),
            disposed: false,
        }
    }

    pub fn form(&self) -> &Rc<RefCell<FormContainer>> {
        &self.form
    }
}

impl TabChild for FormTab {
    fn layout(&mut self) {
        if self.disposed {
            return;
        }
        // Shared with the component registry; skip if the form is mid-layout
        if let Ok(mut form) = self.form.try_borrow_mut() {
            form.layout();
        }
    }

    fn unmount(&mut self) {
        self.bounds = Rect::default();
    }
}

impl Disposable for FormTab {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Ok(mut form) = self.form.try_borrow_mut() {
            form.clear_container();
        }
    }
}

impl DashboardTab for FormTab {
    fn id(&self) -> &str {
        &self.id
    }

    fn editable(&self) -> bool {
        false
    }

    fn refresh(&mut self) {
        self.layout();
    }

    fn on_resize(&self) -> Event<()> {
        self.on_resize.event()
    }

    fn set_bounds(&mut self, area: Rect) {
        if self.bounds != area {
            self.bounds = area;
            self.on_resize.fire(&());
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Ok(form) = self.form.try_borrow() {
            render_form(frame, area, &form);
        }
    }
}
