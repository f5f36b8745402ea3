// Application View
// Main application layout and rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Styles;
use crate::core::App;
use crate::render::{content_inner, render_content, render_new_tab_dialog, render_tab_bar};

/// Screen regions of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub tab_bar: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    /// Area handed to the active tab (inside the content border)
    pub fn tab_area(&self) -> Rect {
        content_inner(self.content)
    }
}

/// Split the terminal area into the shell's regions
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        tab_bar: chunks[1],
        content: chunks[2],
        footer: chunks[3],
    }
}

/// Render the entire application
pub fn render_app(f: &mut Frame, app: &App) {
    let area = f.area();
    let layout = screen_layout(area);
    let dimmed = app.is_modal();

    render_header(f, app, layout.header);
    render_tab_bar(f, layout.tab_bar, &app.tab_titles(), app.active_index(), dimmed);
    render_content(f, layout.content, dimmed);

    if let Some(tab) = app.active_tab() {
        if let Some(child) = tab.child() {
            child.render(f, layout.tab_area());
        }
    }

    render_footer(f, app, layout.footer);

    // Render modal last so it sits on top
    render_new_tab_dialog(f, area, app.dialog());
}

/// Render the header bar
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(app.title.as_str())
        .style(Styles::header())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Render the footer bar
fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.is_modal() {
        "Enter: OK | Esc: Cancel | ↑/↓: Move | Shift+↑/↓: Extend | Space: Toggle | Tab: Focus | Double-click: Open".to_string()
    } else {
        let mut text = "q: Quit | ←/→: Switch Tab | n: New Tab | c: Collapse Properties | r: Refresh".to_string();
        if let Some(tab) = app.active_tab() {
            if tab.child().is_some_and(|child| child.editable()) {
                text.push_str(" | e: Edit");
            }
            for action in tab.actions().iter().filter(|action| action.is_enabled()) {
                if action.id() == "close" {
                    text.push_str(&format!(" | x: {}", action.label()));
                }
            }
        }
        text
    };

    let footer = Paragraph::new(help_text)
        .style(Styles::footer())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout_reserves_chrome() {
        let layout = screen_layout(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.tab_bar.height, 2);
        assert_eq!(layout.footer.height, 3);
        assert_eq!(layout.content.height, 22);
        assert_eq!(layout.tab_area(), Rect::new(1, 6, 78, 20));
    }
}
