use crate::model::{Children, TreeNode};

pub const BLANK: char = ' ';
pub const VERTICAL: char = '│';
pub const MID_BRANCH: char = '├';
pub const LAST_BRANCH: char = '└';
pub const EXPANDED: char = '▼';
pub const EXPANDED_EMPTY: char = '─';
pub const COLLAPSED: char = '►';

/// Renders one row label: one connector glyph per ancestor (root first),
/// then the branch glyph, the expand-state glyph and the node label.
pub fn render_row(node: &TreeNode, ancestors: &[&TreeNode]) -> String {
    let mut out = String::with_capacity(ancestors.len() * 3 + node.label.len() + 8);
    for ancestor in ancestors {
        out.push(if ancestor.is_last_child { BLANK } else { VERTICAL });
    }
    out.push(if node.is_last_child {
        LAST_BRANCH
    } else {
        MID_BRANCH
    });
    out.push(state_glyph(node));
    out.push_str(&node.label);
    out
}

fn state_glyph(node: &TreeNode) -> char {
    match (&node.children, node.expanded) {
        (Children::Resolved(ids), true) if !ids.is_empty() => EXPANDED,
        (Children::Resolved(_), true) => EXPANDED_EMPTY,
        _ => COLLAPSED,
    }
}
