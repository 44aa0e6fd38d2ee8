use anyhow::Result;
use tokio::sync::mpsc;

use crate::loader::LoadFuture;
use crate::model::{ChildDescriptor, Children, ExpandPhase, NodeId, NodeKey, TreeNode};
use crate::sink::LogSink;
use crate::tree::{Row, SelectionTracker, Tree, flatten};

/// The part of the hosting list widget the controller drives.
pub trait ListView {
    fn set_rows(&mut self, rows: Vec<String>);
    fn select(&mut self, index: usize);
    fn selected_index(&self) -> usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKey {
    Expand,
    Collapse,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Order applied to a fetched child list before it is installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChildOrder {
    #[default]
    AsLoaded,
    ByLabel,
}

/// What an expand or collapse request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Children were already cached; the node is now expanded.
    Expanded,
    /// The loader was invoked; the node is `Expanding` until it completes.
    FetchStarted,
    Collapsed,
    /// Nothing to do in the node's current phase.
    Ignored,
}

struct FetchOutcome {
    generation: u64,
    node: NodeId,
    result: Result<Vec<ChildDescriptor>>,
}

type SelectionListener = Box<dyn FnMut(NodeId, &TreeNode)>;

const DEFAULT_PAGE_ROWS: usize = 10;

/// Expand/collapse state machine around a lazily fetched tree.
///
/// Owns the tree, re-walks it after every structural change and pushes the
/// rows to the list view with the cursor pinned to the same node. Fetches
/// run on the tokio runtime; their results come back through a channel and
/// are applied by `drain_completions` or `next_completion` on the caller's
/// thread.
pub struct TreeController<V, S> {
    view: V,
    sink: S,
    tree: Option<Tree>,
    rows: Vec<Row>,
    selection: SelectionTracker,
    order: ChildOrder,
    page_rows: usize,
    generation: u64,
    in_flight: usize,
    completions_tx: mpsc::UnboundedSender<FetchOutcome>,
    completions_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    listener: Option<SelectionListener>,
}

impl<V: ListView, S: LogSink> TreeController<V, S> {
    pub fn new(view: V, sink: S) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            view,
            sink,
            tree: None,
            rows: Vec::new(),
            selection: SelectionTracker::default(),
            order: ChildOrder::default(),
            page_rows: DEFAULT_PAGE_ROWS,
            generation: 0,
            in_flight: 0,
            completions_tx,
            completions_rx,
            listener: None,
        }
    }

    pub fn with_child_order(mut self, order: ChildOrder) -> Self {
        self.order = order;
        self
    }

    /// Called whenever the node under the cursor changes identity.
    pub fn on_selection_changed(&mut self, listener: impl FnMut(NodeId, &TreeNode) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Fetches started and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.rows.get(self.view.selected_index()).map(|r| r.node)
    }

    pub fn selected_tree_node(&self) -> Option<&TreeNode> {
        let id = self.selected_node()?;
        self.tree.as_ref()?.get(id)
    }

    /// Installs a new tree and performs the initial walk. Fetches still
    /// running against the previous tree are ignored when they finish.
    pub fn set_root(&mut self, tree: Tree) {
        self.generation += 1;
        self.in_flight = 0;
        self.tree = Some(tree);
        self.rows.clear();
        self.selection.reset();
        self.view.select(0);
        self.rerender();
    }

    /// Re-walks without touching any node state.
    pub fn refresh(&mut self) {
        self.rerender();
    }

    pub fn update_label(&mut self, node: NodeId, label: impl Into<String>) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        if !tree.contains(node) {
            return;
        }
        tree.set_label(node, label);
        self.rerender();
    }

    pub fn handle_key(&mut self, key: TreeKey) {
        let current = self.view.selected_index();
        let last = self.rows.len().saturating_sub(1);
        match key {
            TreeKey::Expand => {
                self.expand_selected();
            }
            TreeKey::Collapse => {
                self.collapse_selected();
            }
            TreeKey::Up => self.move_to(current.saturating_sub(1)),
            TreeKey::Down => self.move_to(current + 1),
            TreeKey::PageUp => self.move_to(current.saturating_sub(self.page_rows)),
            TreeKey::PageDown => self.move_to(current + self.page_rows),
            TreeKey::Home => self.move_to(0),
            TreeKey::End => self.move_to(last),
        }
    }

    pub fn expand_selected(&mut self) -> Transition {
        match self.selected_node() {
            Some(node) => self.request_expand(node),
            None => Transition::Ignored,
        }
    }

    pub fn collapse_selected(&mut self) -> Transition {
        match self.selected_node() {
            Some(node) => self.request_collapse(node),
            None => Transition::Ignored,
        }
    }

    pub fn request_expand(&mut self, id: NodeId) -> Transition {
        let Some(node) = self.tree.as_ref().and_then(|t| t.get(id)) else {
            return Transition::Ignored;
        };
        if node.phase() != ExpandPhase::Collapsed {
            tracing::debug!(node = %node.identity, phase = ?node.phase(), "expand ignored");
            return Transition::Ignored;
        }
        let identity = node.identity.clone();
        let loader = match &node.children {
            Children::Unresolved(loader) => Some(loader.clone()),
            Children::Resolved(_) => None,
        };
        let Some(loader) = loader else {
            self.set_expanded(id, true);
            return Transition::Expanded;
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                self.sink
                    .error(&format!("cannot expand {identity}: no async runtime ({err})"));
                return Transition::Ignored;
            }
        };
        let fetch = loader.load_children(&identity);
        self.start_fetch(id, identity, handle, fetch)
    }

    pub fn request_collapse(&mut self, id: NodeId) -> Transition {
        let Some(node) = self.tree.as_ref().and_then(|t| t.get(id)) else {
            return Transition::Ignored;
        };
        if node.phase() != ExpandPhase::Expanded {
            tracing::debug!(node = %node.identity, phase = ?node.phase(), "collapse ignored");
            return Transition::Ignored;
        }
        self.set_expanded(id, false);
        Transition::Collapsed
    }

    /// Applies every fetch result that has already arrived. Returns how many
    /// were applied.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.completions_rx.try_recv() {
            self.apply_completion(outcome);
            applied += 1;
        }
        applied
    }

    /// Waits for the next fetch result and applies it.
    pub async fn next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(outcome) => {
                self.apply_completion(outcome);
                true
            }
            None => false,
        }
    }

    /// Waits until no fetch for the current tree is outstanding.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            if !self.next_completion().await {
                break;
            }
        }
    }

    fn start_fetch(
        &mut self,
        id: NodeId,
        identity: NodeKey,
        handle: tokio::runtime::Handle,
        fetch: LoadFuture,
    ) -> Transition {
        if let Some(tree) = self.tree.as_mut() {
            tree.node_mut(id).fetch_pending = true;
        }
        self.in_flight += 1;
        let tx = self.completions_tx.clone();
        let generation = self.generation;
        tracing::debug!(node = %identity, "fetching children");
        handle.spawn(async move {
            let result = match tokio::spawn(fetch).await {
                Ok(result) => result,
                Err(err) => Err(anyhow::anyhow!("loader failed: {err}")),
            };
            let _ = tx.send(FetchOutcome {
                generation,
                node: id,
                result,
            });
        });
        Transition::FetchStarted
    }

    fn apply_completion(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            tracing::debug!(node = outcome.node.index(), "dropping result for a replaced tree");
            return;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        assert!(
            tree.get(outcome.node).is_some_and(|n| n.fetch_pending),
            "fetch result for node {:?} that is not expanding",
            outcome.node
        );
        tree.node_mut(outcome.node).fetch_pending = false;

        match outcome.result {
            Ok(mut children) => {
                if self.order == ChildOrder::ByLabel {
                    children.sort_by(|a, b| a.label.cmp(&b.label));
                }
                let count = children.len();
                tree.install_children(outcome.node, children);
                tree.node_mut(outcome.node).expanded = true;
                tracing::debug!(node = %tree[outcome.node].identity, children = count, "children resolved");
                self.rerender();
            }
            Err(err) => {
                let node = &tree[outcome.node];
                tracing::warn!(node = %node.identity, error = %format!("{err:#}"), "child fetch failed");
                let message = format!("cannot expand {}: {err:#}", node.label);
                self.sink.error(&message);
            }
        }
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(tree) = self.tree.as_mut() {
            tree.node_mut(id).expanded = expanded;
        }
        self.rerender();
    }

    fn rerender(&mut self) {
        let Some(tree) = self.tree.as_ref() else {
            return;
        };
        self.selection.pin(&self.rows, self.view.selected_index());
        self.rows = flatten(tree);
        let index = self.selection.relocate(&self.rows);
        self.view
            .set_rows(self.rows.iter().map(|r| r.label.clone()).collect());
        self.view.select(index);
        self.notify_selection();
    }

    fn move_to(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.view.select(index.min(self.rows.len() - 1));
        self.notify_selection();
    }

    fn notify_selection(&mut self) {
        let current = self.selected_node();
        let Some(id) = self.selection.observe(current) else {
            return;
        };
        if let (Some(listener), Some(tree)) = (self.listener.as_mut(), self.tree.as_ref()) {
            listener(id, &tree[id]);
        }
    }
}
