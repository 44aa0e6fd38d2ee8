use anyhow::Result;

use crate::config::BrowserConfig;
use crate::tree::Tree;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub config: BrowserConfig,
    pub title: String,
}

pub fn run(tree: Tree, opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(tree, opts)
}
