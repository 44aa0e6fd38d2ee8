use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::loader::{ChildLoader, LoadFuture};
use crate::model::{ChildDescriptor, Children, NodeKey};
use crate::tree::Tree;

/// Browses a JSON document. Identity is the JSON pointer of the value.
#[derive(Clone, Debug)]
pub struct JsonLoader {
    doc: Arc<Value>,
    latency: Duration,
}

impl JsonLoader {
    pub fn new(doc: Value, latency: Duration) -> Self {
        Self {
            doc: Arc::new(doc),
            latency,
        }
    }

    pub fn from_path(path: &Path, latency: Duration) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let doc = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Self::new(doc, latency))
    }
}

impl ChildLoader for JsonLoader {
    fn load_children(&self, identity: &NodeKey) -> LoadFuture {
        let doc = Arc::clone(&self.doc);
        let pointer = identity.as_str().to_string();
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let value = doc
                .pointer(&pointer)
                .ok_or_else(|| anyhow::anyhow!("no value at {pointer:?}"))?;
            Ok(children_of(&pointer, value))
        })
    }
}

fn children_of(pointer: &str, value: &Value) -> Vec<ChildDescriptor> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| describe(format!("{pointer}/{}", escape(key)), key, v))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| describe(format!("{pointer}/{i}"), &format!("[{i}]"), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn describe(pointer: String, name: &str, value: &Value) -> ChildDescriptor {
    match value {
        Value::Object(map) => ChildDescriptor::branch(pointer, format!("{name} {{{}}}", map.len())),
        Value::Array(items) => ChildDescriptor::branch(pointer, format!("{name} [{}]", items.len())),
        scalar => ChildDescriptor::leaf(pointer, format!("{name} = {scalar}")),
    }
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Root of a JSON browse session; the root stands for the whole document.
pub fn json_tree(label: impl Into<String>, loader: Arc<JsonLoader>) -> Tree {
    Tree::new("", label, Children::Unresolved(loader))
}
