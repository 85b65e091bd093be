// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optional `prism.ron` settings.
//!
//! Every field has a default, so a partial file is valid. Command-line flags
//! override whatever the file sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "prism.ron";

/// Settings for the `prism` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Quiet period before recompiling a changed graph (milliseconds)
    pub debounce_ms: u64,
    /// Debounce applied to raw file system events (milliseconds)
    pub watch_debounce_ms: u64,
    /// Where to write the shader instead of stdout
    pub output: Option<PathBuf>,
    /// Extra tracing directives, comma separated (e.g. `"prism_graph=debug"`)
    pub log_filter: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            watch_debounce_ms: 250,
            output: None,
            log_filter: None,
        }
    }
}

impl CliConfig {
    /// Load settings from a RON file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from RON text
    pub fn parse(content: &str) -> std::io::Result<Self> {
        ron::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Load an explicit config file, or `prism.ron` from the working directory
    /// if present, or fall back to defaults
    pub fn discover(explicit: Option<&Path>) -> std::io::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Tracing directives contributed by this config
    pub fn log_directives(&self) -> impl Iterator<Item = &str> {
        self.log_filter
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}
