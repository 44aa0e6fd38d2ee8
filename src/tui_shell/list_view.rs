use ratatui::widgets::ListState;

use crate::controller::ListView;

/// Row storage plus ratatui list state; the tree pane renders from this.
#[derive(Debug, Default)]
pub(super) struct TuiListView {
    items: Vec<String>,
    state: ListState,
}

impl TuiListView {
    pub(super) fn items(&self) -> &[String] {
        &self.items
    }

    pub(super) fn state_mut(&mut self) -> &mut ListState {
        &mut self.state
    }
}

impl ListView for TuiListView {
    fn set_rows(&mut self, rows: Vec<String>) {
        self.items = rows;
        if self.items.is_empty() {
            self.state.select(None);
        } else if let Some(sel) = self.state.selected() {
            self.state.select(Some(sel.min(self.items.len() - 1)));
        }
    }

    fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            self.state.select(None);
            return;
        }
        self.state.select(Some(index.min(self.items.len() - 1)));
    }

    fn selected_index(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }
}
