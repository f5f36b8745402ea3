// New tab dialog rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::dialog::{
    new_tab_dialog::{CANCEL_LABEL, DIALOG_TITLE, LIST_LABEL, NO_EXTENSION_LABEL, OK_LABEL},
    DialogFocus, NewTabSelectionDialog,
};
use crate::ui::Styles;

const DIALOG_WIDTH_PERCENT: u16 = 60;
const DIALOG_HEIGHT_PERCENT: u16 = 70;

/// Areas of the dialog, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub popup: Rect,
    pub list: Rect,
    pub ok_button: Rect,
    pub cancel_button: Rect,
}

/// Compute the dialog areas for a screen area
pub fn dialog_layout(area: Rect) -> DialogLayout {
    let [popup] = Layout::horizontal([Constraint::Percentage(DIALOG_WIDTH_PERCENT)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Percentage(DIALOG_HEIGHT_PERCENT)])
        .flex(Flex::Center)
        .areas(popup);

    let inner = Block::default().borders(Borders::ALL).inner(popup);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // List label
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let [ok_button, cancel_button] = Layout::horizontal([
        Constraint::Length(OK_LABEL.len() as u16 + 4),
        Constraint::Length(CANCEL_LABEL.len() as u16 + 4),
    ])
    .flex(Flex::End)
    .spacing(1)
    .areas(chunks[2]);

    DialogLayout {
        popup,
        list: chunks[1],
        ok_button,
        cancel_button,
    }
}

/// Render the dialog on top of whatever was drawn before
pub fn render_new_tab_dialog(f: &mut Frame, area: Rect, dialog: &NewTabSelectionDialog) {
    if !dialog.is_visible() {
        return;
    }

    let layout = dialog_layout(area);
    f.render_widget(Clear, layout.popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", DIALOG_TITLE), Styles::title_focused()))
        .border_style(Styles::border_focused());
    f.render_widget(block, layout.popup);

    let label_area = Rect { height: 1, y: layout.list.y.saturating_sub(1), ..layout.list };
    f.render_widget(Paragraph::new(Span::styled(LIST_LABEL, Styles::title_unfocused())), label_area);

    if dialog.is_list_hidden() {
        let empty = Paragraph::new(NO_EXTENSION_LABEL)
            .style(Styles::list_secondary())
            .wrap(Wrap { trim: true });
        f.render_widget(empty, layout.list);
    } else {
        render_rows(f, layout.list, dialog);
    }

    let ok_style = if !dialog.is_add_enabled() {
        Styles::button_disabled()
    } else if dialog.focus() == DialogFocus::AddButton {
        Styles::button_focused()
    } else {
        Styles::button_normal()
    };
    let cancel_style = if dialog.focus() == DialogFocus::CancelButton {
        Styles::button_focused()
    } else {
        Styles::button_normal()
    };
    f.render_widget(
        Paragraph::new(format!("[ {} ]", OK_LABEL)).style(ok_style),
        layout.ok_button,
    );
    f.render_widget(
        Paragraph::new(format!("[ {} ]", CANCEL_LABEL)).style(cancel_style),
        layout.cancel_button,
    );
}

fn render_rows(f: &mut Frame, area: Rect, dialog: &NewTabSelectionDialog) {
    let row_height = dialog.row_height();
    let visible_rows = (area.height / row_height.max(1)) as usize;
    let selected = dialog.selected_indices();
    let list_focused = dialog.focus() == DialogFocus::List;

    // Keep the cursor row on screen
    let first = dialog.cursor().saturating_sub(visible_rows.saturating_sub(1));

    for (slot, (index, row)) in dialog
        .rows()
        .into_iter()
        .enumerate()
        .skip(first)
        .take(visible_rows)
        .enumerate()
    {
        let row_area = Rect {
            y: area.y + slot as u16 * row_height,
            height: row_height,
            ..area
        };

        let mut style = match (selected.contains(&index), list_focused) {
            (true, true) => Styles::list_selected_focused(),
            (true, false) => Styles::list_selected_unfocused(),
            _ => Styles::list_normal(),
        };
        if index == dialog.cursor() && list_focused {
            style = style.patch(Styles::list_cursor());
        }

        let icon = if row.is_opened {
            Span::styled("● ", Styles::opened_tab())
        } else {
            Span::styled("○ ", Styles::list_secondary())
        };
        let info = &row.tab_config;
        let lines = vec![
            Line::from(vec![icon, Span::styled(info.title.clone(), style)]),
            Line::from(Span::styled(format!("  {}", info.description), Styles::list_secondary())),
            Line::from(Span::styled(format!("  {}", info.publisher), Styles::list_secondary())),
        ];
        f.render_widget(Paragraph::new(lines), row_area);
    }
}
