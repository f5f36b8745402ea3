// Dashboard panel rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::dashboard::{WidgetContent, WidgetWrapper};
use crate::model::FormContainer;
use crate::ui::Styles;

/// Render the tab bar
pub fn render_tab_bar(f: &mut Frame, area: Rect, titles: &[String], active: usize, dimmed: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let border_style = if dimmed {
        Styles::border_dimmed()
    } else {
        Styles::border_unfocused()
    };
    let tabs = Tabs::new(titles.iter().map(|title| Line::from(format!(" {} ", title))))
        .select(active)
        .style(Styles::tab_inactive())
        .highlight_style(Styles::tab_active())
        .divider("│")
        .block(Block::default().borders(Borders::BOTTOM).border_style(border_style));

    f.render_widget(tabs, area);
}

/// Render every widget of a container in the area it was laid out in
pub fn render_widget_content(f: &mut Frame, area: Rect, content: Option<&WidgetContent>) {
    let Some(content) = content else {
        render_placeholder(f, area, "Loading widgets...");
        return;
    };

    if content.wrappers().is_empty() {
        render_placeholder(f, area, "No widgets configured.");
        return;
    }

    for wrapper in content.wrappers() {
        let widget_area = wrapper.area().intersection(area);
        if widget_area.height == 0 || widget_area.width == 0 {
            continue;
        }
        render_widget(f, widget_area, wrapper);
    }
}

/// Render the home tab: the properties widget on top, widgets below
pub fn render_home(
    f: &mut Frame,
    area: Rect,
    properties: Option<&WidgetWrapper>,
    properties_height: u16,
    content: Option<&WidgetContent>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(properties_height), // Properties (collapsed or expanded)
            Constraint::Min(0),                    // Widgets (remaining space)
        ])
        .split(area);

    if let Some(properties) = properties {
        render_widget(f, chunks[0], properties);
    }
    render_widget_content(f, chunks[1], content);
}

/// Render a form as titled rows
pub fn render_form(f: &mut Frame, area: Rect, form: &FormContainer) {
    let rows = form.rows();
    if rows.is_empty() {
        render_placeholder(f, area, "Form has no components.");
        return;
    }

    let title_width = rows.iter().map(|row| row.title.len()).max().unwrap_or(0);
    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            let value = form
                .component_title(&row.descriptor)
                .unwrap_or_else(|| format!("<{}>", row.descriptor.id));
            let mut spans = vec![
                Span::styled(format!("{:<width$}  ", row.title, width = title_width), Styles::title_unfocused()),
                Span::styled(value, Styles::list_normal()),
            ];
            for action in &row.actions {
                let label = form.component_title(action).unwrap_or_else(|| action.id.clone());
                spans.push(Span::raw("  "));
                spans.push(Span::styled(format!("[{}]", label), Styles::button_normal()));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_unfocused())
        .padding(ratatui::widgets::Padding::new(1, 1, 0, 0));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_widget(f: &mut Frame, area: Rect, wrapper: &WidgetWrapper) {
    let config = wrapper.config();
    let mut title = vec![Span::styled(format!(" {} ", config.display_name()), Styles::widget_title())];
    if wrapper.is_collapsable() {
        let marker = if wrapper.is_collapsed() { "▸" } else { "▾" };
        title.insert(0, Span::styled(format!(" {}", marker), Styles::title_unfocused()));
    }
    if wrapper.is_editing() {
        title.push(Span::styled("(editing) ", Styles::widget_editing()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(Styles::border_unfocused())
        .padding(ratatui::widgets::Padding::new(1, 1, 0, 0));

    let lines: Vec<Line> = if wrapper.is_collapsed() {
        vec![Line::from(Span::styled("collapsed", Styles::widget_collapsed()))]
    } else {
        widget_body(wrapper)
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn widget_body(wrapper: &WidgetWrapper) -> Vec<Line<'static>> {
    let config = wrapper.config();
    let mut lines = Vec::new();

    if let Some(widget_type) = config.widget_type() {
        lines.push(Line::from(Span::styled(widget_type.to_string(), Styles::list_secondary())));
    }

    // Widget arguments, one line per YAML line
    if let serde_yaml::Value::Mapping(map) = &config.widget {
        for args in map.values().filter(|value| !value.is_null()) {
            if let Ok(text) = serde_yaml::to_string(args) {
                lines.extend(
                    text.lines()
                        .filter(|line| !line.trim().is_empty() && line.trim() != "{}")
                        .map(|line| Line::from(line.to_string())),
                );
            }
        }
    }

    lines.push(Line::from(Span::styled(
        format!("refreshed {} time(s)", wrapper.refresh_count()),
        Styles::list_secondary(),
    )));
    lines
}

fn render_placeholder(f: &mut Frame, area: Rect, text: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let paragraph = Paragraph::new(Line::from(Span::styled(text.to_string(), Styles::list_secondary())));
    f.render_widget(paragraph, area);
}
