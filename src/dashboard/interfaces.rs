// Dashboard Tab Contract
// Capabilities every dashboard tab type provides on top of TabChild

use ratatui::{layout::Rect, Frame};

use crate::core::emitter::Event;
use crate::core::lifecycle::Disposable;
use crate::panel::TabChild;

/// A tab hosted by the dashboard shell
pub trait DashboardTab: TabChild + Disposable {
    fn id(&self) -> &str;

    fn editable(&self) -> bool;

    /// Ask every widget to reload its data
    fn refresh(&mut self);

    /// Fires (without payload) whenever the tab's content changed size
    fn on_resize(&self) -> Event<()>;

    /// Enter edit mode; unsupported by most tabs
    fn enable_edit(&mut self) {}

    /// Area the shell assigns to the tab; picked up by the next layout
    fn set_bounds(&mut self, _area: Rect) {}

    fn render(&self, frame: &mut Frame, area: Rect);
}
