// Event Handling
// Application event types and handler infrastructure

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Activate the tab on the left
    PreviousTab,

    /// Activate the tab on the right
    NextTab,

    /// Open the new tab selection dialog
    OpenTabDialog,

    /// Close the active tab
    CloseTab,

    /// Collapse or expand the home properties widget
    ToggleProperties,

    /// Refresh the active tab's widgets
    Refresh,

    /// Put the active tab into edit mode
    EnableEdit,

    /// Key routed to the open dialog
    DialogKey(KeyEvent),

    /// Left click at a terminal position
    Click { column: u16, row: u16 },

    /// Terminal resized
    Resize(u16, u16),

    /// No operation
    None,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event.
    /// While a modal is open every key goes to the modal.
    pub fn handle(event: Event, modal: bool) -> AppEvent {
        match event {
            Event::Key(key) => Self::handle_key(key, modal),
            Event::Mouse(mouse) => Self::handle_mouse(mouse),
            Event::Resize(width, height) => AppEvent::Resize(width, height),
            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events
    fn handle_key(key: KeyEvent, modal: bool) -> AppEvent {
        // Only handle key press events
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        if modal {
            return AppEvent::DialogKey(key);
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,

            // Tab navigation
            KeyCode::Left | KeyCode::Char('h') => AppEvent::PreviousTab,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => AppEvent::NextTab,
            KeyCode::BackTab => AppEvent::PreviousTab,

            // Tabs
            KeyCode::Char('n') => AppEvent::OpenTabDialog,
            KeyCode::Char('x') => AppEvent::CloseTab,

            // Widgets
            KeyCode::Char('c') => AppEvent::ToggleProperties,
            KeyCode::Char('r') => AppEvent::Refresh,
            KeyCode::Char('e') => AppEvent::EnableEdit,

            _ => AppEvent::None,
        }
    }

    /// Handle mouse events
    fn handle_mouse(mouse: MouseEvent) -> AppEvent {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => AppEvent::Click {
                column: mouse.column,
                row: mouse.row,
            },
            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_shell_keys() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('n')), false), AppEvent::OpenTabDialog);
        assert_eq!(EventHandler::handle(press(KeyCode::Right), false), AppEvent::NextTab);
        assert_eq!(EventHandler::handle(press(KeyCode::Char('c')), false), AppEvent::ToggleProperties);
        assert_eq!(
            EventHandler::handle(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), false),
            AppEvent::Quit
        );
    }

    #[test]
    fn test_modal_captures_keys() {
        let event = EventHandler::handle(press(KeyCode::Char('q')), true);
        assert!(matches!(event, AppEvent::DialogKey(key) if key.code == KeyCode::Char('q')));
    }

    #[test]
    fn test_resize_passes_dimensions() {
        assert_eq!(EventHandler::handle(Event::Resize(80, 24), false), AppEvent::Resize(80, 24));
    }
}
