// New Tab Selection Dialog
// Modal list of candidate dashboard tabs; emits the chosen subset or a cancellation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::view_model::{DashboardTabInfo, NewTabViewModel, UiTab};
use crate::core::emitter::{Emitter, Event};
use crate::core::lifecycle::{Disposable, DisposableStore};

pub const DIALOG_TITLE: &str = "Open dashboard extensions";
pub const LIST_LABEL: &str = "All features";
pub const NO_EXTENSION_LABEL: &str = "No dashboard extensions are installed at this time. \
Go to Extension Manager to explore recommended extensions.";
pub const OK_LABEL: &str = "OK";
pub const CANCEL_LABEL: &str = "Cancel";

const ICON_CLASS: &str = "extension-status-icon icon";
const OPENED_TAB_CLASS: &str = "success";

/// Which control of the dialog has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogFocus {
    #[default]
    List,
    AddButton,
    CancelButton,
}

/// Icon classes for a row; opened tabs carry the extra success class
pub fn icon_class(tab: &UiTab) -> String {
    if tab.is_opened {
        format!("{} {}", ICON_CLASS, OPENED_TAB_CLASS)
    } else {
        ICON_CLASS.to_string()
    }
}

#[derive(Debug, Default)]
struct DialogState {
    visible: bool,
    rows: Vec<UiTab>,
    selection: BTreeSet<usize>,
    cursor: usize,
    add_enabled: bool,
    focus: DialogFocus,
    list_hidden: bool,
    empty_panel_hidden: bool,
}

impl DialogState {
    fn on_update_tab_list(&mut self, tabs: &[UiTab]) {
        self.rows = tabs.to_vec();
        self.selection.clear();
        self.cursor = 0;

        if !self.rows.is_empty() {
            self.list_hidden = false;
            self.empty_panel_hidden = true;
            self.selection.insert(0);
            self.focus = DialogFocus::List;
            self.add_enabled = true;
        } else {
            self.list_hidden = true;
            self.empty_panel_hidden = false;
            self.add_enabled = false;
            self.focus = DialogFocus::CancelButton;
        }
    }

    /// OK stays enabled only while at least one row is selected
    fn sync_add_enabled(&mut self) {
        self.add_enabled = !self.rows.is_empty() && !self.selection.is_empty();
        if !self.add_enabled && self.focus == DialogFocus::AddButton {
            self.focus = DialogFocus::List;
        }
    }

    fn selected_rows(&self) -> Vec<UiTab> {
        self.selection
            .iter()
            .filter_map(|&index| self.rows.get(index).cloned())
            .collect()
    }

    fn focus_order(&self) -> Vec<DialogFocus> {
        let mut order = Vec::with_capacity(3);
        if !self.list_hidden {
            order.push(DialogFocus::List);
        }
        if self.add_enabled {
            order.push(DialogFocus::AddButton);
        }
        order.push(DialogFocus::CancelButton);
        order
    }
}

/// Modal dialog negotiating which dashboard tabs to open
pub struct NewTabSelectionDialog {
    state: Rc<RefCell<DialogState>>,
    view_model: NewTabViewModel,
    row_height: u16,
    on_add_tabs: Emitter<Vec<UiTab>>,
    on_cancel: Emitter<()>,
    disposables: DisposableStore,
}

impl NewTabSelectionDialog {
    pub fn new(row_height: u16) -> Self {
        let state = Rc::new(RefCell::new(DialogState::default()));
        let view_model = NewTabViewModel::new();
        let mut disposables = DisposableStore::new();

        let weak = Rc::downgrade(&state);
        disposables.register(view_model.on_tab_list_updated().subscribe(move |tabs: &Vec<UiTab>| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_update_tab_list(tabs);
            }
        }));

        Self {
            state,
            view_model,
            row_height: row_height.max(1),
            on_add_tabs: Emitter::new(),
            on_cancel: Emitter::new(),
            disposables,
        }
    }

    /// Emits the rows accepted by the user
    pub fn on_add_tabs(&self) -> Event<Vec<UiTab>> {
        self.on_add_tabs.event()
    }

    /// Emits once per cancellation
    pub fn on_cancel(&self) -> Event<()> {
        self.on_cancel.event()
    }

    /// Show the dialog and recompute its rows
    pub fn open(&mut self, candidates: &[DashboardTabInfo], opened: &[DashboardTabInfo]) {
        tracing::info!(candidates = candidates.len(), opened = opened.len(), "Opening new tab dialog");
        self.state.borrow_mut().visible = true;
        self.view_model.update_dashboard_tabs(candidates, opened);
    }

    /// Hide without emitting anything
    pub fn close(&mut self) {
        self.state.borrow_mut().visible = false;
    }

    /// Emit the selected rows and hide. Does nothing while the OK action is disabled.
    pub fn confirm(&mut self) {
        let selected = {
            let state = self.state.borrow();
            if !state.visible || !state.add_enabled {
                return;
            }
            state.selected_rows()
        };

        tracing::info!(tabs = selected.len(), "Adding dashboard tabs");
        self.on_add_tabs.fire(&selected);
        self.close();
    }

    /// Emit a cancellation and hide
    pub fn cancel(&mut self) {
        if !self.state.borrow().visible {
            return;
        }
        tracing::debug!("New tab dialog cancelled");
        self.on_cancel.fire(&());
        self.close();
    }

    /// Double-clicking a row selects it alone and confirms
    pub fn double_click(&mut self, row: usize) {
        {
            let mut state = self.state.borrow_mut();
            if row >= state.rows.len() {
                return;
            }
            state.cursor = row;
            state.selection.clear();
            state.selection.insert(row);
            state.sync_add_enabled();
        }
        self.confirm();
    }

    /// Handle a key press. Returns whether the dialog consumed it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press || !self.is_visible() {
            return false;
        }

        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Enter => {
                if self.focus() == DialogFocus::CancelButton {
                    self.cancel();
                } else {
                    self.confirm();
                }
            }
            KeyCode::Esc => self.cancel(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, extend),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, extend),
            KeyCode::Char(' ') => {
                let cursor = self.cursor();
                self.toggle_selection(cursor);
            }
            KeyCode::Tab => self.cycle_focus(),
            _ => return false,
        }
        true
    }

    /// Move the list cursor. Without `extend` the selection follows the cursor;
    /// with it the new row is added to the selection.
    pub fn move_cursor(&mut self, delta: isize, extend: bool) {
        let mut state = self.state.borrow_mut();
        if state.rows.is_empty() {
            return;
        }
        let last = state.rows.len() - 1;
        let cursor = state.cursor.saturating_add_signed(delta).min(last);
        state.cursor = cursor;
        if !extend {
            state.selection.clear();
        }
        state.selection.insert(cursor);
        state.focus = DialogFocus::List;
        state.sync_add_enabled();
    }

    /// Add or remove a row from the multi-selection
    pub fn toggle_selection(&mut self, row: usize) {
        let mut state = self.state.borrow_mut();
        if row >= state.rows.len() {
            return;
        }
        if !state.selection.remove(&row) {
            state.selection.insert(row);
        }
        state.sync_add_enabled();
    }

    /// Move focus to the next available control
    pub fn cycle_focus(&mut self) {
        let mut state = self.state.borrow_mut();
        let order = state.focus_order();
        let next = order
            .iter()
            .position(|&focus| focus == state.focus)
            .map(|index| order[(index + 1) % order.len()])
            .unwrap_or(order[0]);
        state.focus = next;
    }

    /// Row under a terminal position, given the area the list was rendered in
    pub fn row_at(&self, list_area: Rect, column: u16, row: u16) -> Option<usize> {
        let inside = column >= list_area.x
            && column < list_area.x + list_area.width
            && row >= list_area.y
            && row < list_area.y + list_area.height;
        if !inside {
            return None;
        }
        let index = ((row - list_area.y) / self.row_height) as usize;
        (index < self.state.borrow().rows.len()).then_some(index)
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn rows(&self) -> Vec<UiTab> {
        self.state.borrow().rows.clone()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.state.borrow().selection.iter().copied().collect()
    }

    pub fn cursor(&self) -> usize {
        self.state.borrow().cursor
    }

    pub fn is_add_enabled(&self) -> bool {
        self.state.borrow().add_enabled
    }

    pub fn focus(&self) -> DialogFocus {
        self.state.borrow().focus
    }

    pub fn is_list_hidden(&self) -> bool {
        self.state.borrow().list_hidden
    }

    pub fn is_empty_panel_hidden(&self) -> bool {
        self.state.borrow().empty_panel_hidden
    }

    pub fn row_height(&self) -> u16 {
        self.row_height
    }
}

impl Disposable for NewTabSelectionDialog {
    fn dispose(&mut self) {
        self.disposables.dispose();
        self.close();
    }
}
