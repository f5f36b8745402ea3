// Dashboard Panels
// Terminal dashboard with tabbed widget containers

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

use dashboard_panels::core::{AppConfig, YamlSettingsStore};
use dashboard_panels::shell_config::load_and_validate_config;
use dashboard_panels::ui::run_app;
use dashboard_panels::{App, LOG_FILE_NAME};

//--------------------------------------------------------<<

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    let log_path = init_logging()?;

    // Load configuration: compiled defaults, dashboard layout, user settings
    let config = AppConfig::default();
    let shell = load_and_validate_config(std::env::args().nth(1).map(PathBuf::from))?;
    let settings_path = PathBuf::from(&config.shell.settings_file);
    let settings = YamlSettingsStore::open(&settings_path)
        .with_context(|| format!("Failed to open settings: {}", settings_path.display()))?;

    let mouse_enabled = config.shell.mouse_enabled;
    let mut app = App::new(config, &shell, Rc::new(settings));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                           MAIN LOOP                                            │
    // └────────────────────────────────────────────────────────────────────────────────────────────────┘

    let result = run_app(&mut terminal, &mut app);
    app.dispose_all();

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "Dashboard exited with an error");
        eprintln!("Log written to {}", log_path.display());
    }
    result
}

/// Send tracing output to a log file; the terminal belongs to the UI
fn init_logging() -> Result<PathBuf> {
    let log_path = std::env::temp_dir().join(LOG_FILE_NAME);
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dashboard_panels=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(log_path)
}
