// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors surfaced by the `prism` binary.

use prism_graph::NodeId;
use std::path::PathBuf;

/// Failure of a CLI command
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading or writing a file failed
    #[error("{}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Writing to stdout failed
    #[error("Failed to write output: {0}")]
    Stdout(#[from] std::io::Error),

    /// A snapshot file is not valid JSON
    #[error("Invalid graph snapshot {}: {source}", .path.display())]
    Snapshot {
        /// Snapshot file
        path: PathBuf,
        /// Parse error
        source: serde_json::Error,
    },

    /// Serializing a result failed
    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),

    /// The file watcher could not be set up
    #[error("File watcher error: {0}")]
    Watch(#[from] notify_debouncer_full::notify::Error),

    /// The graph did not compile
    #[error("Compile failed: {message}{}", node_suffix(.node))]
    Compile {
        /// Compiler message
        message: String,
        /// Node the error is attached to
        node: Option<NodeId>,
    },

    /// `--category` named no known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

fn node_suffix(node: &Option<NodeId>) -> String {
    node.as_ref().map(|n| format!(" (node {n})")).unwrap_or_default()
}

impl CliError {
    /// Wrap an I/O error with the file it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_mentions_node() {
        let err = CliError::Compile {
            message: "Unknown node type: warp".to_string(),
            node: Some(NodeId::from("n4")),
        };
        assert_eq!(err.to_string(), "Compile failed: Unknown node type: warp (node n4)");

        let err = CliError::Compile {
            message: "No output node found".to_string(),
            node: None,
        };
        assert_eq!(err.to_string(), "Compile failed: No output node found");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::io(
            "graph.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "graph.json: missing");
    }
}
