use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::loader::{ChildLoader, LoadFuture};
use crate::model::{ChildDescriptor, Children, NodeKey};
use crate::tree::Tree;

/// Lists directory entries. Identity is the entry path; only directories
/// can be expanded further.
#[derive(Clone, Debug, Default)]
pub struct FsLoader {
    show_hidden: bool,
    latency: Duration,
}

impl FsLoader {
    pub fn new(show_hidden: bool, latency: Duration) -> Self {
        Self {
            show_hidden,
            latency,
        }
    }
}

impl ChildLoader for FsLoader {
    fn load_children(&self, identity: &NodeKey) -> LoadFuture {
        let dir = PathBuf::from(identity.as_str());
        let show_hidden = self.show_hidden;
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            list_dir(&dir, show_hidden).await
        })
    }
}

async fn list_dir(dir: &Path, show_hidden: bool) -> Result<Vec<ChildDescriptor>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("read dir {}", dir.display()))?;
    let mut out = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("read dir {}", dir.display()))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("stat {}", path.display()))?;
        let child = if file_type.is_dir() {
            ChildDescriptor::branch(path.to_string_lossy(), format!("{name}/"))
        } else if file_type.is_symlink() {
            ChildDescriptor::leaf(path.to_string_lossy(), format!("{name}@"))
        } else {
            let size = entry.metadata().await.ok().map(|m| m.len());
            ChildDescriptor::leaf(
                path.to_string_lossy(),
                format!("{name} ({})", size_label(size)),
            )
        };
        out.push(child);
    }
    Ok(out)
}

/// Root of a filesystem browse session at `path`.
pub fn fs_tree(path: &Path, loader: Arc<FsLoader>) -> Result<Tree> {
    let root = path
        .canonicalize()
        .with_context(|| format!("resolve {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    let label = root.display().to_string();
    Ok(Tree::new(
        root.to_string_lossy().to_string(),
        label,
        Children::Unresolved(loader),
    ))
}

fn size_label(size: Option<u64>) -> String {
    match size {
        Some(bytes) => fmt_size(bytes),
        None => "size unknown".to_string(),
    }
}

fn fmt_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
