// Content rendering

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::ui::Styles;

/// Render main content box border.
/// Dimmed while a modal is open.
pub fn render_content(f: &mut Frame, area: Rect, dimmed: bool) {
    let border_style = if dimmed {
        Styles::border_dimmed()
    } else {
        Styles::border_focused()
    };
    let content_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    f.render_widget(content_block, area);
}

/// Area inside the content box border
pub fn content_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
