//! Child sources the binary can browse.

mod fs;
mod json;

pub use self::fs::{FsLoader, fs_tree};
pub use self::json::{JsonLoader, json_tree};
