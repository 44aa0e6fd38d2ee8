use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_DEBOUNCE_MS: u64 = 100;
const DEFAULT_LOG_LINES: usize = 500;
const DEFAULT_POLL_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_true")]
    pub sort_children: bool,
    #[serde(default = "default_log_lines")]
    pub log_lines: usize,
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub show_hidden: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            sort_children: true,
            log_lines: DEFAULT_LOG_LINES,
            poll_ms: DEFAULT_POLL_MS,
            latency_ms: 0,
            show_hidden: false,
        }
    }
}

impl BrowserConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms.max(1))
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_log_lines() -> usize {
    DEFAULT_LOG_LINES
}

fn default_poll_ms() -> u64 {
    DEFAULT_POLL_MS
}

fn default_true() -> bool {
    true
}
