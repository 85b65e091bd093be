// SPDX-License-Identifier: MIT OR Apache-2.0
//! CLI command implementations.

pub mod compile;
pub mod nodes;
pub mod watch;

use crate::error::CliError;
use prism_graph::GraphSnapshot;
use std::io::Write;
use std::path::Path;

/// Read a `{ "nodes": [...], "edges": [...] }` snapshot file
pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Write text to a file, or to stdout when no file is given
pub fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))?;
            }
            std::fs::write(path, text).map_err(|e| CliError::io(path, e))?;
            tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
