// Widget Content
// Lays out a list of widget wrappers and reports size changes

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::config::WidgetConfig;
use super::widget_wrapper::WidgetWrapper;
use crate::core::emitter::{Emitter, Event};

/// The widget area of a dashboard container
#[derive(Debug)]
pub struct WidgetContent {
    wrappers: Vec<WidgetWrapper>,
    bounds: Rect,
    min_widget_height: u16,
    edit_mode: bool,
    on_resize: Emitter<()>,
}

impl WidgetContent {
    pub fn new(min_widget_height: u16) -> Self {
        Self {
            wrappers: Vec::new(),
            bounds: Rect::default(),
            min_widget_height,
            edit_mode: false,
            on_resize: Emitter::new(),
        }
    }

    /// Replace the widget list.
    /// Wrappers whose config is unchanged at the same position are kept, so their guid survives.
    pub fn set_widgets(&mut self, widgets: &[WidgetConfig]) {
        let mut previous = std::mem::take(&mut self.wrappers).into_iter();
        self.wrappers = widgets
            .iter()
            .map(|config| match previous.next() {
                Some(wrapper) if wrapper.config() == config => wrapper,
                _ => {
                    let mut wrapper = WidgetWrapper::new(config.clone());
                    if self.edit_mode {
                        wrapper.enable_edit();
                    }
                    wrapper
                }
            })
            .collect();
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Split the bounds between widgets and lay each one out.
    /// Fires `on_resize` once if any widget's area changed.
    pub fn layout(&mut self) {
        if self.wrappers.is_empty() {
            return;
        }

        let count = self.wrappers.len() as u32;
        let constraints: Vec<Constraint> = self
            .wrappers
            .iter()
            .map(|_| Constraint::Ratio(1, count))
            .collect();
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(self.bounds);

        let mut resized = false;
        for (wrapper, area) in self.wrappers.iter_mut().zip(areas.iter()) {
            let area = if area.height < self.min_widget_height {
                Rect { height: 0, ..*area }
            } else {
                *area
            };
            resized |= wrapper.layout(area);
        }

        if resized {
            tracing::trace!(widgets = self.wrappers.len(), "Widget content resized");
            self.on_resize.fire(&());
        }
    }

    /// Drop the bounds and every widget area; the next layout measures from scratch
    pub fn reset_layout(&mut self) {
        self.bounds = Rect::default();
        for wrapper in self.wrappers.iter_mut() {
            wrapper.reset_area();
        }
    }

    pub fn refresh(&mut self) {
        for wrapper in self.wrappers.iter_mut() {
            wrapper.refresh();
        }
    }

    pub fn enable_edit(&mut self) {
        self.edit_mode = true;
        for wrapper in self.wrappers.iter_mut() {
            wrapper.enable_edit();
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn on_resize(&self) -> Event<()> {
        self.on_resize.event()
    }

    pub fn wrappers(&self) -> &[WidgetWrapper] {
        &self.wrappers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn widget(name: &str) -> WidgetConfig {
        WidgetConfig {
            name: Some(name.to_string()),
            ..WidgetConfig::default()
        }
    }

    #[test]
    fn test_layout_fires_resize_only_on_change() {
        let mut content = WidgetContent::new(1);
        content.set_widgets(&[widget("a"), widget("b")]);
        content.set_bounds(Rect::new(0, 0, 40, 20));

        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let _sub = content.on_resize().subscribe(move |_| counter.set(counter.get() + 1));

        content.layout();
        content.layout();
        assert_eq!(fired.get(), 1);

        content.set_bounds(Rect::new(0, 0, 40, 30));
        content.layout();
        assert_eq!(fired.get(), 2);
        assert_eq!(content.wrappers()[1].area().y, 15);
    }

    #[test]
    fn test_reset_layout_makes_next_layout_a_resize() {
        let mut content = WidgetContent::new(1);
        content.set_widgets(&[widget("a")]);
        content.set_bounds(Rect::new(0, 0, 40, 20));
        content.layout();

        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let _sub = content.on_resize().subscribe(move |_| counter.set(counter.get() + 1));

        content.reset_layout();
        assert_eq!(content.bounds(), Rect::default());
        assert_eq!(content.wrappers()[0].area(), Rect::default());

        content.set_bounds(Rect::new(0, 0, 40, 20));
        content.layout();
        assert_eq!(fired.get(), 1);
        assert_eq!(content.wrappers()[0].area(), Rect::new(0, 0, 40, 20));
    }

    #[test]
    fn test_unchanged_widgets_keep_their_guid() {
        let mut content = WidgetContent::new(1);
        content.set_widgets(&[widget("a"), widget("b")]);
        let first = content.wrappers()[0].guid().to_string();
        let second = content.wrappers()[1].guid().to_string();

        content.set_widgets(&[widget("a"), widget("c")]);

        assert_eq!(content.wrappers()[0].guid(), first);
        assert_ne!(content.wrappers()[1].guid(), second);
    }

    #[test]
    fn test_refresh_and_edit_reach_every_wrapper() {
        let mut content = WidgetContent::new(1);
        content.set_widgets(&[widget("a"), widget("b")]);

        content.refresh();
        content.enable_edit();
        content.set_widgets(&[widget("a"), widget("b"), widget("c")]);

        assert!(content.wrappers().iter().all(|w| w.is_editing()));
        assert_eq!(content.wrappers()[0].refresh_count(), 1);
        assert_eq!(content.wrappers()[2].refresh_count(), 0);
    }
}
