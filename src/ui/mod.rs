// UI module
// Terminal event loop and views for the dashboard shell

pub mod app_view;
pub mod styles;

use anyhow::Result;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::Stdout;
use std::time::Duration;

use crate::core::{App, AppEvent, EventHandler};
use crate::render::dialog_layout;

pub use app_view::{render_app, screen_layout, ScreenLayout};
pub use styles::Styles;

/// Run the main application event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let poll_interval = Duration::from_millis(app.config.shell.poll_interval_ms);

    loop {
        // Keep the active tab laid out for the current terminal size
        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        app.set_bounds(screen_layout(screen).tab_area());
        app.apply_pending_changes();

        // Render the UI
        terminal.draw(|f| render_app(f, app))?;

        // Handle events
        if event::poll(poll_interval)? {
            let event = event::read()?;
            let app_event = EventHandler::handle(event, app.is_modal());

            handle_event(app, app_event, screen);
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}

/// Handle an application event
fn handle_event(app: &mut App, event: AppEvent, screen: Rect) {
    match event {
        AppEvent::Quit => app.quit(),
        AppEvent::PreviousTab => app.previous_tab(),
        AppEvent::NextTab => app.next_tab(),
        AppEvent::OpenTabDialog => app.open_tab_dialog(),
        AppEvent::CloseTab => app.close_active_tab(),
        AppEvent::ToggleProperties => app.toggle_properties(),
        AppEvent::Refresh => app.refresh(),
        AppEvent::EnableEdit => app.enable_edit(),
        AppEvent::DialogKey(key) => app.handle_dialog_key(key),
        AppEvent::Click { column, row } => {
            if app.is_modal() {
                app.handle_dialog_click(&dialog_layout(screen), column, row);
            }
        }
        AppEvent::Resize(width, height) => {
            let screen = Rect::new(0, 0, width, height);
            app.set_bounds(screen_layout(screen).tab_area());
        }
        AppEvent::None => {}
    }
}
