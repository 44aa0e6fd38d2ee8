use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lazytree::config::BrowserConfig;
use lazytree::source::{FsLoader, JsonLoader, fs_tree, json_tree};
use lazytree::tree::Tree;
use lazytree::tui::TuiRunOptions;

#[derive(Parser)]
#[command(name = "lazytree")]
#[command(about = "Browse a lazily loaded hierarchy in the terminal", long_about = None)]
struct Cli {
    /// JSON config file (defaults apply when it does not exist)
    #[arg(long, default_value = "lazytree.json")]
    config: PathBuf,

    /// Where tracing output goes while the UI owns the terminal
    #[arg(long, default_value = "lazytree.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    source: Source,
}

#[derive(Subcommand)]
enum Source {
    /// Browse a directory tree
    Fs {
        /// Directory to start from (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Browse a JSON document
    Json {
        /// JSON file to open
        file: PathBuf,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = BrowserConfig::load(&cli.config)?;
    lazytree::logging::init_tracing(&cli.log_file)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let _guard = runtime.enter();

    let (tree, title) = build_tree(cli.source, &config)?;
    tracing::info!(root = %tree[tree.root()].identity(), "starting browser");
    lazytree::tui::run(tree, TuiRunOptions { config, title })
}

fn build_tree(source: Source, config: &BrowserConfig) -> Result<(Tree, String)> {
    match source {
        Source::Fs { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir().context("get current dir")?,
            };
            let loader = Arc::new(FsLoader::new(config.show_hidden, config.latency()));
            let tree = fs_tree(&path, loader)?;
            Ok((tree, format!("fs {}", path.display())))
        }
        Source::Json { file } => {
            let loader = Arc::new(JsonLoader::from_path(&file, config.latency())?);
            let label = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string());
            Ok((json_tree(label, loader), format!("json {}", file.display())))
        }
    }
}
