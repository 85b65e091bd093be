// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new random edge ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A directed connection from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Producing node
    pub source: NodeId,
    /// Output port name on the producing node
    pub source_handle: String,
    /// Consuming node
    pub target: NodeId,
    /// Input port name on the consuming node
    pub target_handle: String,
}

impl Edge {
    /// Create an edge with a fresh id
    pub fn new(
        source: impl Into<NodeId>,
        source_handle: impl Into<String>,
        target: impl Into<NodeId>,
        target_handle: impl Into<String>,
    ) -> Self {
        Self {
            id: EdgeId::generate(),
            source: source.into(),
            source_handle: source_handle.into(),
            target: target.into(),
            target_handle: target_handle.into(),
        }
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = id.into();
        self
    }

    /// Check if this edge touches a specific node
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }

    /// Check if this edge feeds a specific input port
    pub fn feeds(&self, node_id: &NodeId, handle: &str) -> bool {
        self.target == *node_id && self.target_handle == handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_json_uses_handle_names() {
        let json = r#"{"id":"e1","source":"a","sourceHandle":"result","target":"b","targetHandle":"x"}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.id, EdgeId::from("e1"));
        assert_eq!(edge.source_handle, "result");
        assert!(edge.feeds(&NodeId::from("b"), "x"));
        assert!(!edge.feeds(&NodeId::from("b"), "y"));

        let back = serde_json::to_string(&edge).unwrap();
        assert!(back.contains("\"targetHandle\":\"x\""));
    }

    #[test]
    fn test_involves_node() {
        let edge = Edge::new("a", "result", "b", "x");
        assert!(edge.involves_node(&NodeId::from("a")));
        assert!(edge.involves_node(&NodeId::from("b")));
        assert!(!edge.involves_node(&NodeId::from("c")));
    }
}
