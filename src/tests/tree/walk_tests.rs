use super::*;
use crate::loader::{SharedLoader, loader_fn};

fn never_loader() -> SharedLoader {
    loader_fn(|_| async { Ok(Vec::new()) })
}

fn labels(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|r| r.label.as_str()).collect()
}

/// R -> [A, B, C], C unresolved.
fn fixture() -> (Tree, [NodeId; 4]) {
    let mut tree = Tree::new("R", "R", Children::Resolved(Vec::new()));
    let r = tree.root();
    let a = tree.push_child(r, "A", "A", Children::Resolved(Vec::new()));
    let b = tree.push_child(r, "B", "B", Children::Resolved(Vec::new()));
    let c = tree.push_child(r, "C", "C", Children::Unresolved(never_loader()));
    (tree, [r, a, b, c])
}

fn chain(len: usize) -> Tree {
    let mut tree = Tree::new("n0", "n0", Children::Resolved(Vec::new()));
    let mut cur = tree.root();
    for i in 1..len {
        cur = tree.push_child(cur, format!("n{i}"), format!("n{i}"), Children::Resolved(Vec::new()));
        tree.node_mut(cur).expanded = true;
    }
    tree
}

#[test]
fn expanded_root_lists_children_in_order() {
    let (tree, [r, a, b, c]) = fixture();
    let rows = flatten(&tree);
    let nodes: Vec<NodeId> = rows.iter().map(|r| r.node).collect();
    assert_eq!(nodes, vec![r, a, b, c]);
    assert_eq!(labels(&rows), vec!["└▼R", " ├►A", " ├►B", " └►C"]);
}

#[test]
fn collapsed_root_is_still_emitted() {
    let (mut tree, [r, ..]) = fixture();
    tree.node_mut(r).expanded = false;
    let rows = flatten(&tree);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].node, r);
    assert_eq!(rows[0].label, "└►R");
}

#[test]
fn unresolved_node_renders_as_collapsed_leaf_even_when_flagged() {
    let (mut tree, [.., c]) = fixture();
    tree.node_mut(c).expanded = true;
    let rows = flatten(&tree);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].label, " └►C");
}

#[test]
fn nested_rows_carry_vertical_connectors() {
    let (mut tree, [_, a, ..]) = fixture();
    tree.push_child(a, "A1", "A1", Children::Resolved(Vec::new()));
    tree.push_child(a, "A2", "A2", Children::Resolved(Vec::new()));
    tree.node_mut(a).expanded = true;
    let rows = flatten(&tree);
    assert_eq!(
        labels(&rows),
        vec!["└▼R", " ├▼A", " │├►A1", " │└►A2", " ├►B", " └►C"]
    );
}

#[test]
fn collapsed_subtree_keeps_children_out_of_rows() {
    let (mut tree, [_, a, ..]) = fixture();
    tree.push_child(a, "A1", "A1", Children::Resolved(Vec::new()));
    let rows = flatten(&tree);
    assert_eq!(rows.len(), 4);
}

#[test]
fn chain_below_depth_limit_flattens() {
    let tree = chain(99);
    assert_eq!(flatten(&tree).len(), 99);
}

#[test]
#[should_panic(expected = "tree depth limit")]
fn chain_past_depth_limit_is_fatal() {
    let tree = chain(101);
    flatten(&tree);
}
