use super::*;

#[test]
fn push_child_moves_last_child_flag() {
    let mut tree = Tree::new("root", "Root", Children::Resolved(Vec::new()));
    let root = tree.root();
    let a = tree.push_child(root, "a", "A", Children::Resolved(Vec::new()));
    assert!(tree[a].is_last_child());
    let b = tree.push_child(root, "b", "B", Children::Resolved(Vec::new()));
    assert!(!tree[a].is_last_child());
    assert!(tree[b].is_last_child());
    assert_eq!(tree[b].depth(), 1);
    assert_eq!(tree[b].parent(), Some(root));
    assert_eq!(tree.children_of(root), &[a, b]);
}

#[test]
fn install_children_shares_parent_loader() {
    let loader = crate::loader::loader_fn(|_| async { Ok(Vec::new()) });
    let mut tree = Tree::new("root", "Root", Children::Unresolved(loader));
    let root = tree.root();
    let ids = tree
        .install_children(
            root,
            vec![
                ChildDescriptor::branch("x", "X"),
                ChildDescriptor::leaf("y", "Y"),
            ],
        )
        .to_vec();
    assert_eq!(ids.len(), 2);
    assert!(!tree[ids[0]].children().is_resolved());
    assert!(tree[ids[1]].children().is_resolved());
    assert!(tree[ids[1]].is_last_child());
    assert_eq!(tree[ids[0]].identity().as_str(), "x");
}

#[test]
fn browse_path_joins_labels_from_root() {
    let mut tree = Tree::new("root", "Root", Children::Resolved(Vec::new()));
    let objects = tree.push_child(tree.root(), "o", "Objects", Children::Resolved(Vec::new()));
    let server = tree.push_child(objects, "s", "Server", Children::Resolved(Vec::new()));
    assert_eq!(tree.browse_path(server), "/Root/Objects/Server");
    assert_eq!(tree.ancestors(server), vec![tree.root(), objects]);
}

#[test]
fn ids_do_not_resolve_in_another_tree() {
    let mut first = Tree::new("root", "Root", Children::Resolved(Vec::new()));
    let child = first.push_child(first.root(), "a", "A", Children::Resolved(Vec::new()));
    let mut second = Tree::new("root", "Root", Children::Resolved(Vec::new()));
    second.push_child(second.root(), "b", "B", Children::Resolved(Vec::new()));

    assert!(first.contains(child));
    assert!(!second.contains(child));
    assert!(second.get(child).is_none());
    assert!(second.get(second.root()).is_some());
}
