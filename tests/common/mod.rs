#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use lazytree::controller::{ListView, TreeController};
use lazytree::loader::{ChildLoader, LoadFuture};
use lazytree::model::{ChildDescriptor, Children, NodeId, NodeKey};
use lazytree::sink::{LogLevel, LogSink};
use lazytree::tree::Tree;

#[derive(Debug, Default)]
pub struct MemoryListView {
    pub rows: Vec<String>,
    pub selected: usize,
}

impl ListView for MemoryListView {
    fn set_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.rows.len().saturating_sub(1));
    }

    fn selected_index(&self) -> usize {
        self.selected
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<(LogLevel, String)>,
}

impl RecordingSink {
    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(level, _)| *level == LogLevel::Error)
            .map(|(_, line)| line.as_str())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&mut self, level: LogLevel, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}

/// Loader answering from a fixed table and counting invocations per key.
#[derive(Default)]
pub struct ScriptedLoader {
    children: HashMap<String, Vec<ChildDescriptor>>,
    failures: Mutex<HashMap<String, usize>>,
    calls: Mutex<HashMap<String, usize>>,
    gates: HashMap<String, Arc<Notify>>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, key: &str, children: Vec<ChildDescriptor>) -> Self {
        self.children.insert(key.to_string(), children);
        self
    }

    /// The first `times` loads of `key` fail.
    pub fn fail_times(self, key: &str, times: usize) -> Self {
        self.failures
            .lock()
            .expect("failures lock")
            .insert(key.to_string(), times);
        self
    }

    /// Loads of `key` block until [`ScriptedLoader::release`] is called.
    pub fn gate(mut self, key: &str) -> Self {
        self.gates.insert(key.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.get(key) {
            gate.notify_one();
        }
    }

    pub fn calls(&self, key: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .get(key)
            .copied()
            .unwrap_or(0)
    }
}

impl ChildLoader for ScriptedLoader {
    fn load_children(&self, identity: &NodeKey) -> LoadFuture {
        let key = identity.as_str().to_string();
        *self
            .calls
            .lock()
            .expect("calls lock")
            .entry(key.clone())
            .or_default() += 1;

        let fail = {
            let mut failures = self.failures.lock().expect("failures lock");
            match failures.get_mut(&key) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            }
        };
        let result = if fail {
            Err(anyhow::anyhow!("browse of {key} timed out"))
        } else {
            Ok(self.children.get(&key).cloned().unwrap_or_default())
        };
        let gate = self.gates.get(&key).cloned();
        Box::pin(async move {
            match gate {
                Some(gate) => gate.notified().await,
                None => tokio::task::yield_now().await,
            }
            result
        })
    }
}

pub type TestController = TreeController<MemoryListView, RecordingSink>;

pub fn controller() -> TestController {
    TreeController::new(MemoryListView::default(), RecordingSink::default())
}

pub fn root_tree(loader: &Arc<ScriptedLoader>) -> Tree {
    let shared: Arc<ScriptedLoader> = Arc::clone(loader);
    Tree::new("R", "R", Children::Unresolved(shared))
}

pub fn node_at(ctl: &TestController, label: &str) -> NodeId {
    let tree = ctl.tree().expect("tree installed");
    ctl.rows()
        .iter()
        .find(|row| tree[row.node].label() == label)
        .map(|row| row.node)
        .unwrap_or_else(|| panic!("no visible row labelled {label}"))
}

pub fn selected_label(ctl: &TestController) -> String {
    ctl.selected_tree_node()
        .map(|n| n.label().to_string())
        .unwrap_or_default()
}

pub fn visible_labels(ctl: &TestController) -> Vec<String> {
    let tree = ctl.tree().expect("tree installed");
    ctl.rows()
        .iter()
        .map(|row| tree[row.node].label().to_string())
        .collect()
}
