pub mod config;
pub mod controller;
pub mod debounce;
pub mod loader;
pub mod logging;
pub mod model;
pub mod sink;
pub mod source;
pub mod tree;
pub mod tui;

mod tui_shell;
