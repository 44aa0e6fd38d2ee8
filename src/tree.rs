use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{ChildDescriptor, Children, NodeId, NodeKey, TreeNode};

mod connector;
mod selection;
mod walk;

pub use self::connector::{
    BLANK, COLLAPSED, EXPANDED, EXPANDED_EMPTY, LAST_BRANCH, MID_BRANCH, VERTICAL, render_row,
};
pub use self::selection::SelectionTracker;
pub use self::walk::{MAX_DEPTH, Row, flatten};

/// Arena holding every node ever materialized for one browse session.
///
/// Nodes are appended when a fetch resolves and are only released together
/// with the whole tree.
#[derive(Debug)]
pub struct Tree {
    id: u64,
    nodes: Vec<TreeNode>,
}

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

impl Tree {
    /// Creates a tree whose root starts expanded with the given children state.
    pub fn new(identity: impl Into<NodeKey>, label: impl Into<String>, children: Children) -> Self {
        let root = TreeNode {
            identity: identity.into(),
            label: label.into(),
            children,
            expanded: true,
            fetch_pending: false,
            depth: 0,
            is_last_child: true,
            parent: None,
        };
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![root],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(self.id, 0)
    }

    /// Whether `id` was issued by this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.tree == self.id && id.slot < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        if id.tree != self.id {
            return None;
        }
        self.nodes.get(id.slot)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        assert_eq!(id.tree, self.id, "node {id:?} belongs to another tree");
        &mut self.nodes[id.slot]
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self[id].children.ids()
    }

    /// Appends a child under a resolved parent and fixes up the last-child
    /// flags of the siblings.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        identity: impl Into<NodeKey>,
        label: impl Into<String>,
        children: Children,
    ) -> NodeId {
        let id = NodeId::new(self.id, self.nodes.len());
        let depth = self[parent].depth + 1;
        let prev_last = match &mut self.node_mut(parent).children {
            Children::Resolved(ids) => {
                let prev = ids.last().copied();
                ids.push(id);
                prev
            }
            Children::Unresolved(_) => panic!("push_child on unresolved node {parent:?}"),
        };
        if let Some(prev) = prev_last {
            self.node_mut(prev).is_last_child = false;
        }
        self.nodes.push(TreeNode {
            identity: identity.into(),
            label: label.into(),
            children,
            expanded: false,
            fetch_pending: false,
            depth,
            is_last_child: true,
            parent: Some(parent),
        });
        id
    }

    /// Resolves an unresolved node with a fetched child list. Children that
    /// advertise a loader share the parent's loader.
    pub(crate) fn install_children(
        &mut self,
        parent: NodeId,
        descriptors: Vec<ChildDescriptor>,
    ) -> &[NodeId] {
        let loader = match &self[parent].children {
            Children::Unresolved(loader) => loader.clone(),
            Children::Resolved(_) => panic!("children of {parent:?} resolved twice"),
        };
        self.node_mut(parent).children = Children::Resolved(Vec::with_capacity(descriptors.len()));
        for child in descriptors {
            let children = if child.has_loader {
                Children::Unresolved(loader.clone())
            } else {
                Children::Resolved(Vec::new())
            };
            self.push_child(parent, child.identity, child.label, children);
        }
        self.children_of(parent)
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        self.node_mut(id).label = label.into();
    }

    /// Ancestors of `id`, root first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self[id].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self[p].parent;
        }
        out.reverse();
        out
    }

    /// Slash-joined labels from the root down to `id`.
    pub fn browse_path(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|a| self[a].label.as_str())
            .collect();
        parts.push(self[id].label.as_str());
        format!("/{}", parts.join("/"))
    }
}

impl Index<NodeId> for Tree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        assert_eq!(id.tree, self.id, "node {id:?} belongs to another tree");
        &self.nodes[id.slot]
    }
}

#[cfg(test)]
#[path = "tests/tree/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "tests/tree/walk_tests.rs"]
mod walk_tests;
