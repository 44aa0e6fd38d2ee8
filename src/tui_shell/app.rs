use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::controller::{ChildOrder, TreeController};
use crate::debounce::Debounce;
use crate::model::ExpandPhase;
use crate::sink::LogSink;
use crate::tree::Tree;
use crate::tui::TuiRunOptions;

use super::keymap::Action;
use super::list_view::TuiListView;
use super::log_pane::LogPane;

/// Snapshot of the selected node shown in the details pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Details {
    pub(super) identity: String,
    pub(super) label: String,
    pub(super) path: String,
    pub(super) depth: usize,
    pub(super) phase: ExpandPhase,
    pub(super) children: Option<usize>,
}

pub(super) struct App {
    pub(super) controller: TreeController<TuiListView, LogPane>,
    pub(super) title: String,
    pub(super) details: Option<Details>,
    pub(super) quit: bool,

    details_refresh: Debounce,
    selection_moved: Rc<Cell<bool>>,
}

impl App {
    pub(super) fn new(tree: Tree, opts: &TuiRunOptions) -> Self {
        let order = if opts.config.sort_children {
            ChildOrder::ByLabel
        } else {
            ChildOrder::AsLoaded
        };
        let mut controller =
            TreeController::new(TuiListView::default(), LogPane::new(opts.config.log_lines))
                .with_child_order(order);

        let selection_moved = Rc::new(Cell::new(false));
        let flag = Rc::clone(&selection_moved);
        controller.on_selection_changed(move |_, _| flag.set(true));

        let root = tree.root();
        let root_label = tree[root].label().to_string();
        controller.set_root(tree);
        controller.request_expand(root);
        controller
            .sink_mut()
            .info(&format!("browsing {root_label}"));

        Self {
            controller,
            title: opts.title.clone(),
            details: None,
            quit: false,
            details_refresh: Debounce::new(opts.config.debounce()),
            selection_moved,
        }
    }

    /// Applies finished fetches and refreshes the details pane once the
    /// selection has settled.
    pub(super) fn tick(&mut self, now: Instant) {
        if self.controller.drain_completions() > 0 && self.details.is_some() {
            self.details = self.describe_selection();
        }
        if self.selection_moved.replace(false) {
            self.details_refresh.trigger(now);
        }
        if self.details_refresh.poll(now) {
            self.details = self.describe_selection();
        }
    }

    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Tree(key) => self.controller.handle_key(key),
            Action::Refresh => {
                self.controller.refresh();
                self.details = self.describe_selection();
            }
            Action::BrowsePath => {
                let Some(path) = self.selected_path() else {
                    return;
                };
                self.controller
                    .sink_mut()
                    .info(&format!("selected node browse path: {path}"));
            }
            Action::ClearLog => self.controller.sink_mut().clear(),
            Action::Quit => self.quit = true,
        }
    }

    fn selected_path(&self) -> Option<String> {
        let id = self.controller.selected_node()?;
        Some(self.controller.tree()?.browse_path(id))
    }

    fn describe_selection(&self) -> Option<Details> {
        let id = self.controller.selected_node()?;
        let tree = self.controller.tree()?;
        let node = tree.get(id)?;
        Some(Details {
            identity: node.identity().to_string(),
            label: node.label().to_string(),
            path: tree.browse_path(id),
            depth: node.depth(),
            phase: node.phase(),
            children: node
                .children()
                .is_resolved()
                .then(|| node.children().ids().len()),
        })
    }
}
