use std::fmt;

use serde::{Deserialize, Serialize};

/// Slot of a node in the tree arena, stamped with the tree that issued it.
///
/// Slots are never reused while a tree is alive, so a `NodeId` keeps pointing
/// at the same logical node across every re-walk. Two nodes that represent the
/// same remote entity (same [`NodeKey`]) still get distinct ids. An id held
/// past `set_root` no longer resolves in the replacement tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) tree: u64,
    pub(crate) slot: usize,
}

impl NodeId {
    pub(crate) fn new(tree: u64, slot: usize) -> Self {
        Self { tree, slot }
    }

    pub fn index(self) -> usize {
        self.slot
    }
}

/// Opaque identity of the entity a node stands for, as handed out by the
/// child source. Stable across re-fetches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(pub String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
