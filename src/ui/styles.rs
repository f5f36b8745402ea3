// UI Styles
// Color schemes and styling for the dashboard shell

use ratatui::style::{Color, Modifier, Style};

/// Application color scheme and styles
pub struct Styles;

impl Styles {
    // === Header / Footer ===

    pub fn header() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer() -> Style {
        Style::default().fg(Color::Yellow)
    }

    // === Tab Bar ===

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    // === List Items ===

    pub fn list_selected_focused() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn list_selected_unfocused() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn list_cursor() -> Style {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }

    pub fn list_normal() -> Style {
        Style::default()
    }

    pub fn list_secondary() -> Style {
        Style::default().fg(Color::Rgb(128, 128, 128))
    }

    /// Marker for tabs that are already open.
    /// Color is compiled from config.yaml.
    pub fn opened_tab() -> Style {
        let (r, g, b) = crate::core::app_config::compiled::OPENED_TAB_FG;
        Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }

    // === Widgets ===

    pub fn widget_title() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn widget_collapsed() -> Style {
        Style::default()
            .fg(Color::Rgb(150, 150, 150))
            .add_modifier(Modifier::ITALIC)
    }

    pub fn widget_editing() -> Style {
        Style::default().fg(Color::Magenta)
    }

    // === Buttons ===

    pub fn button_focused() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_normal() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // === Border Styles ===

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn border_unfocused() -> Style {
        Style::default().fg(Color::Rgb(102, 102, 102))
    }

    /// Borders behind a modal
    pub fn border_dimmed() -> Style {
        Style::default().fg(Color::Rgb(51, 51, 51))
    }

    pub fn title_focused() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused() -> Style {
        Style::default().fg(Color::Gray)
    }
}
