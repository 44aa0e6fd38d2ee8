use super::{Tree, render_row};
use crate::model::{NodeId, TreeNode};

/// Depth at which a walk gives up: anything this deep is a runaway or
/// cyclic structure, never a real namespace.
pub const MAX_DEPTH: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub node: NodeId,
}

/// Pre-order walk of the visible part of the tree.
///
/// The root is always row 0. A node's children are visited only when it is
/// expanded and its children are resolved; the order is the installed order.
pub fn flatten(tree: &Tree) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut ancestors = Vec::new();
    visit(tree, tree.root(), 0, &mut ancestors, &mut rows);
    rows
}

fn visit<'a>(
    tree: &'a Tree,
    id: NodeId,
    depth: usize,
    ancestors: &mut Vec<&'a TreeNode>,
    rows: &mut Vec<Row>,
) {
    assert!(
        depth < MAX_DEPTH,
        "tree depth limit of {MAX_DEPTH} reached at node {:?}",
        tree[id].identity
    );
    let node = &tree[id];
    debug_assert_eq!(node.depth, depth);
    rows.push(Row {
        label: render_row(node, ancestors),
        node: id,
    });
    if !node.is_open() {
        return;
    }
    ancestors.push(node);
    for &child in node.children.ids() {
        visit(tree, child, depth + 1, ancestors, rows);
    }
    ancestors.pop();
}
