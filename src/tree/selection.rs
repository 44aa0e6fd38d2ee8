use super::Row;
use crate::model::NodeId;

/// Keeps the cursor on the same logical node while the row list is rebuilt.
///
/// `pin` runs before a walk, `relocate` after it. A pinned node that is no
/// longer visible sends the cursor back to row 0.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    pinned: Option<NodeId>,
    reported: Option<NodeId>,
}

impl SelectionTracker {
    pub fn pin(&mut self, rows: &[Row], selected_index: usize) -> Option<NodeId> {
        self.pinned = rows.get(selected_index).map(|r| r.node);
        self.pinned
    }

    pub fn pinned(&self) -> Option<NodeId> {
        self.pinned
    }

    pub fn relocate(&mut self, rows: &[Row]) -> usize {
        self.pinned
            .and_then(|pinned| rows.iter().position(|r| r.node == pinned))
            .unwrap_or(0)
    }

    /// Records the node now under the cursor. Returns it when it differs from
    /// the last one recorded.
    pub fn observe(&mut self, current: Option<NodeId>) -> Option<NodeId> {
        if current == self.reported {
            return None;
        }
        self.reported = current;
        current
    }

    pub fn reset(&mut self) {
        self.pinned = None;
        self.reported = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[usize]) -> Vec<Row> {
        ids.iter()
            .map(|&i| Row {
                label: format!("n{i}"),
                node: NodeId::new(0, i),
            })
            .collect()
    }

    #[test]
    fn follows_node_to_its_new_index() {
        let mut sel = SelectionTracker::default();
        assert_eq!(sel.pin(&rows(&[0, 1, 2, 3]), 2), Some(NodeId::new(0, 2)));
        assert_eq!(sel.relocate(&rows(&[0, 1, 7, 8, 2, 3])), 4);
    }

    #[test]
    fn falls_back_to_first_row_when_hidden() {
        let mut sel = SelectionTracker::default();
        sel.pin(&rows(&[0, 1, 2]), 1);
        assert_eq!(sel.relocate(&rows(&[0])), 0);
    }

    #[test]
    fn empty_previous_rows_pin_nothing() {
        let mut sel = SelectionTracker::default();
        assert_eq!(sel.pin(&[], 0), None);
        assert_eq!(sel.relocate(&rows(&[0, 1])), 0);
    }

    #[test]
    fn observe_reports_only_changes() {
        let mut sel = SelectionTracker::default();
        assert_eq!(sel.observe(Some(NodeId::new(0, 1))), Some(NodeId::new(0, 1)));
        assert_eq!(sel.observe(Some(NodeId::new(0, 1))), None);
        assert_eq!(sel.observe(Some(NodeId::new(0, 2))), Some(NodeId::new(0, 2)));
    }
}
