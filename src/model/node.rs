use std::fmt;

use super::{NodeId, NodeKey};
use crate::loader::SharedLoader;

/// What a child source returns for each child of an expanded node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildDescriptor {
    pub identity: NodeKey,
    pub label: String,
    /// Whether the child can itself be expanded through the loader.
    /// `false` installs the child as a resolved leaf.
    pub has_loader: bool,
}

impl ChildDescriptor {
    pub fn branch(identity: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identity: NodeKey::new(identity),
            label: label.into(),
            has_loader: true,
        }
    }

    pub fn leaf(identity: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identity: NodeKey::new(identity),
            label: label.into(),
            has_loader: false,
        }
    }
}

/// Child list of a node: either still behind a loader, or fetched and cached
/// for the lifetime of the node.
#[derive(Clone)]
pub enum Children {
    Unresolved(SharedLoader),
    Resolved(Vec<NodeId>),
}

impl Children {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Children::Resolved(_))
    }

    /// Resolved child ids; empty while unresolved.
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Children::Resolved(ids) => ids,
            Children::Unresolved(_) => &[],
        }
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::Unresolved(_) => f.write_str("Unresolved(..)"),
            Children::Resolved(ids) => f.debug_tuple("Resolved").field(ids).finish(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandPhase {
    Collapsed,
    Expanding,
    Expanded,
}

#[derive(Debug)]
pub struct TreeNode {
    pub(crate) identity: NodeKey,
    pub(crate) label: String,
    pub(crate) children: Children,
    pub(crate) expanded: bool,
    pub(crate) fetch_pending: bool,
    pub(crate) depth: usize,
    pub(crate) is_last_child: bool,
    pub(crate) parent: Option<NodeId>,
}

impl TreeNode {
    pub fn identity(&self) -> &NodeKey {
        &self.identity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_last_child(&self) -> bool {
        self.is_last_child
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// A node only shows its children once they are resolved; an expanded
    /// flag on an unresolved node (the root before its first fetch) is inert.
    pub fn is_open(&self) -> bool {
        self.expanded && self.children.is_resolved()
    }

    pub fn phase(&self) -> ExpandPhase {
        if self.fetch_pending {
            ExpandPhase::Expanding
        } else if self.is_open() {
            ExpandPhase::Expanded
        } else {
            ExpandPhase::Collapsed
        }
    }
}
