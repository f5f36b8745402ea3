// Build script - reads config.yaml at compile time and generates defaults
// This allows changing layout defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    // Generate Rust code with the compiled-in values
    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const COLLAPSED_HEIGHT: u16 = {collapsed_height};
pub const EXPANDED_HEIGHT: u16 = {expanded_height};
pub const DIALOG_ROW_HEIGHT: u16 = {dialog_row_height};
pub const WIDGET_MIN_HEIGHT: u16 = {widget_min_height};

pub const DEFAULT_VISIBILITY: &str = "{default_visibility}";
pub const POLL_INTERVAL_MS: u64 = {poll_interval_ms};
pub const MOUSE_ENABLED: bool = {mouse_enabled};
pub const SETTINGS_FILE: &str = "{settings_file}";

// Accent color for opened tabs in the selection dialog (RGB tuple)
pub const OPENED_TAB_FG: (u8, u8, u8) = {opened_tab_fg};
"#,
        collapsed_height = config.collapsed_height,
        expanded_height = config.expanded_height,
        dialog_row_height = config.dialog_row_height,
        widget_min_height = config.widget_min_height,
        default_visibility = config.default_visibility,
        poll_interval_ms = config.poll_interval_ms,
        mouse_enabled = config.mouse_enabled,
        settings_file = config.settings_file,
        opened_tab_fg = format!("({}, {}, {})", config.opened_tab_fg.0, config.opened_tab_fg.1, config.opened_tab_fg.2),
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    collapsed_height: u16,
    expanded_height: u16,
    dialog_row_height: u16,
    widget_min_height: u16,
    default_visibility: String,
    poll_interval_ms: u64,
    mouse_enabled: bool,
    settings_file: String,
    opened_tab_fg: (u8, u8, u8),
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            collapsed_height: 3,
            expanded_height: 9,
            dialog_row_height: 3,
            widget_min_height: 4,
            default_visibility: "if".to_string(),
            poll_interval_ms: 50,
            mouse_enabled: true,
            settings_file: "settings.yaml".to_string(),
            opened_tab_fg: (80, 200, 120),  // #50c878
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_layout = false;
    let mut in_shell = false;
    let mut in_colors = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // Track which section we're in
        if trimmed.starts_with("layout:") {
            in_layout = true;
            in_shell = false;
            in_colors = false;
            continue;
        } else if trimmed.starts_with("shell:") {
            in_layout = false;
            in_shell = true;
            in_colors = false;
            continue;
        } else if trimmed.starts_with("colors:") {
            in_layout = false;
            in_shell = false;
            in_colors = true;
            continue;
        }

        if let Some((key, value)) = parse_kv(trimmed) {
            if in_layout {
                match key {
                    "collapsed_height" => config.collapsed_height = value.parse().unwrap_or(3),
                    "expanded_height" => config.expanded_height = value.parse().unwrap_or(9),
                    "dialog_row_height" => config.dialog_row_height = value.parse().unwrap_or(3),
                    "widget_min_height" => config.widget_min_height = value.parse().unwrap_or(4),
                    _ => {}
                }
            } else if in_shell {
                match key {
                    "default_visibility" => config.default_visibility = unquote(value).to_string(),
                    "poll_interval_ms" => config.poll_interval_ms = value.parse().unwrap_or(50),
                    "mouse_enabled" => config.mouse_enabled = parse_bool(value),
                    "settings_file" => config.settings_file = unquote(value).to_string(),
                    _ => {}
                }
            } else if in_colors {
                if key == "opened_tab_fg" {
                    config.opened_tab_fg = parse_hex_color(value);
                }
            }
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    // Skip comments and empty lines
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Remove inline comments (a # preceded by a space)
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    // Skip if value is empty (section header)
    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"').trim_matches('\'')
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}

fn parse_hex_color(s: &str) -> (u8, u8, u8) {
    let s = unquote(s);
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ) {
            return (r, g, b);
        }
    }

    CompiledConfig::default().opened_tab_fg
}
