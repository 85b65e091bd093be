// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and edges.

use crate::codegen::{CodeGenerator, CompiledResult};
use crate::connection::{Edge, EdgeId};
use crate::node::{NodeId, NodeInstance, NodeRegistry};
use crate::port::{PortType, Value};
use crate::types::can_connect;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The two flat lists the compiler consumes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Node instances
    #[serde(default)]
    pub nodes: Vec<NodeInstance>,
    /// Edges between node ports
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Create a snapshot from its parts
    pub fn new(nodes: Vec<NodeInstance>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Whether the snapshot has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Compile this snapshot
    pub fn compile(&self, registry: &NodeRegistry) -> CompiledResult {
        CodeGenerator::new(registry).compile(&self.nodes, &self.edges)
    }
}

/// An editable node graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, NodeInstance>,
    /// Edges in insertion order
    edges: IndexMap<EdgeId, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a snapshot.
    ///
    /// The first node per id is kept, matching compiler lookup. Edges sharing
    /// an id keep the last one in the position of the first.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        let mut graph = Self::new();
        for node in snapshot.nodes {
            graph.nodes.entry(node.id.clone()).or_insert(node);
        }
        for edge in snapshot.edges {
            if let Some(replaced) = graph.edges.insert(edge.id.clone(), edge) {
                tracing::warn!(
                    "Snapshot repeats edge id {}; dropping {}.{} -> {}.{}",
                    replaced.id,
                    replaced.source,
                    replaced.source_handle,
                    replaced.target,
                    replaced.target_handle
                );
            }
        }
        graph
    }

    /// Add a node to the graph, replacing any node with the same id
    pub fn add_node(&mut self, node: NodeInstance) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Remove a node and its edges
    pub fn remove_node(&mut self, node_id: &NodeId) -> Option<NodeInstance> {
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.nodes.shift_remove(node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &NodeId) -> Option<&NodeInstance> {
        self.nodes.get(node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInstance> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Set a parameter override on a node. Returns false if the node is missing.
    pub fn set_param(
        &mut self,
        node_id: &NodeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.params.insert(name.into(), value.into());
                true
            }
            None => false,
        }
    }

    /// Add an edge from an output port to an input port
    pub fn connect(
        &mut self,
        registry: &NodeRegistry,
        source: &NodeId,
        source_handle: &str,
        target: &NodeId,
        target_handle: &str,
    ) -> Result<EdgeId, ConnectionError> {
        let source_kind = self.port_kind(registry, source, source_handle, PortSide::Output)?;
        let target_kind = self.port_kind(registry, target, target_handle, PortSide::Input)?;

        if source == target {
            return Err(ConnectionError::SelfLoop);
        }

        if !can_connect(source_kind, target_kind) {
            return Err(ConnectionError::IncompatiblePorts {
                from: source_kind,
                to: target_kind,
            });
        }

        if self.is_input_connected(target, target_handle) {
            return Err(ConnectionError::PortAlreadyConnected {
                node: target.clone(),
                port: target_handle.to_string(),
            });
        }

        let edge = Edge::new(source.clone(), source_handle, target.clone(), target_handle);
        let id = edge.id.clone();
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    fn port_kind(
        &self,
        registry: &NodeRegistry,
        node_id: &NodeId,
        handle: &str,
        side: PortSide,
    ) -> Result<PortType, ConnectionError> {
        let node = self
            .nodes
            .get(node_id)
            .ok_or_else(|| ConnectionError::NodeNotFound(node_id.clone()))?;
        let def = registry
            .get(&node.node_type)
            .ok_or_else(|| ConnectionError::UnknownNodeType(node.node_type.clone()))?;
        let port = match side {
            PortSide::Input => def.input(handle),
            PortSide::Output => def.output(handle),
        };
        port.map(|p| p.kind).ok_or_else(|| ConnectionError::PortNotFound {
            node: node_id.clone(),
            port: handle.to_string(),
        })
    }

    /// Remove an edge
    pub fn disconnect(&mut self, edge_id: &EdgeId) -> Option<Edge> {
        self.edges.shift_remove(edge_id)
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    /// Get all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get edges touching a node
    pub fn edges_for_node<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Whether an input port already has an edge
    pub fn is_input_connected(&self, node_id: &NodeId, handle: &str) -> bool {
        self.edges.values().any(|e| e.feeds(node_id, handle))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Copy the graph into the flat lists the compiler reads
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
        }
    }

    /// Compile the current graph
    pub fn compile(&self, registry: &NodeRegistry) -> CompiledResult {
        self.snapshot().compile(registry)
    }
}

#[derive(Debug, Clone, Copy)]
enum PortSide {
    Input,
    Output,
}

/// Error when creating a connection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Node type not in the registry
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Port not found on the node
    #[error("Port not found: {node}.{port}")]
    PortNotFound {
        /// Node that was searched
        node: NodeId,
        /// Missing port name
        port: String,
    },

    /// Incompatible port types
    #[error("Cannot connect {from} to {to}")]
    IncompatiblePorts {
        /// Source kind
        from: PortType,
        /// Target kind
        to: PortType,
    },

    /// Input already has an edge
    #[error("Port already connected: {node}.{port}")]
    PortAlreadyConnected {
        /// Target node
        node: NodeId,
        /// Target input
        port: String,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (NodeRegistry, Graph, NodeId, NodeId, NodeId) {
        let registry = NodeRegistry::builtin();
        let mut graph = Graph::new();
        let uv = graph.add_node(NodeInstance::with_id("uv", "input_uv"));
        let noise = graph.add_node(NodeInstance::with_id("noise", "pattern_noise"));
        let out = graph.add_node(NodeInstance::with_id("out", "output"));
        (registry, graph, uv, noise, out)
    }

    #[test]
    fn test_connect_and_compile() {
        let (registry, mut graph, uv, noise, out) = setup();
        graph.connect(&registry, &uv, "uv", &noise, "uv").unwrap();
        graph.connect(&registry, &noise, "value", &out, "color").unwrap();
        assert_eq!(graph.edge_count(), 2);

        let result = graph.compile(&registry);
        assert!(result.success);
        let code = result.code.unwrap();
        assert!(code.contains("float snoise(vec2 v)"));
        assert!(code.contains("fragColor = vec4(vec3(v3), 1.0);"));
    }

    #[test]
    fn test_connect_rejects_bad_ports() {
        let (registry, mut graph, uv, noise, out) = setup();
        assert!(matches!(
            graph.connect(&registry, &uv, "nope", &noise, "uv"),
            Err(ConnectionError::PortNotFound { .. })
        ));
        assert!(matches!(
            graph.connect(&registry, &uv, "uv", &out, "color"),
            Err(ConnectionError::IncompatiblePorts {
                from: PortType::Vec2,
                to: PortType::Vec3
            })
        ));
        assert!(matches!(
            graph.connect(&registry, &NodeId::from("ghost"), "uv", &noise, "uv"),
            Err(ConnectionError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_connect_rejects_duplicate_wiring() {
        let (registry, mut graph, uv, noise, out) = setup();
        graph.connect(&registry, &uv, "x", &out, "alpha").unwrap();
        let err = graph.connect(&registry, &noise, "value", &out, "alpha");
        assert!(matches!(err, Err(ConnectionError::PortAlreadyConnected { .. })));
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let registry = NodeRegistry::builtin();
        let mut graph = Graph::new();
        let add = graph.add_node(NodeInstance::with_id("add", "math_add"));
        assert_eq!(
            graph.connect(&registry, &add, "result", &add, "a"),
            Err(ConnectionError::SelfLoop)
        );
    }

    #[test]
    fn test_remove_node_drops_edges() {
        let (registry, mut graph, uv, noise, out) = setup();
        graph.connect(&registry, &uv, "uv", &noise, "uv").unwrap();
        graph.connect(&registry, &noise, "value", &out, "color").unwrap();

        graph.remove_node(&noise).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edges_for_node(&uv).count(), 0);
    }

    #[test]
    fn test_set_param() {
        let (_, mut graph, _, noise, _) = setup();
        assert!(graph.set_param(&noise, "scale", 3.0));
        assert_eq!(
            graph.node(&noise).and_then(|n| n.params.get("scale")),
            Some(&Value::Number(3.0))
        );
        assert!(!graph.set_param(&NodeId::from("ghost"), "scale", 3.0));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (registry, mut graph, uv, noise, _) = setup();
        let edge = graph.connect(&registry, &uv, "uv", &noise, "uv").unwrap();
        let snapshot = graph.snapshot();
        assert_eq!(snapshot.nodes.len(), 3);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GraphSnapshot = serde_json::from_str(&json).unwrap();
        let rebuilt = Graph::from_snapshot(back);
        assert_eq!(rebuilt.node_count(), 3);
        assert!(rebuilt.edge(&edge).is_some());
    }

    #[test]
    fn test_from_snapshot_repeated_edge_id_keeps_last() {
        let snapshot = GraphSnapshot::new(
            vec![
                NodeInstance::with_id("a", "math_add"),
                NodeInstance::with_id("b", "math_add"),
                NodeInstance::with_id("out", "output"),
            ],
            vec![
                Edge::new("a", "result", "out", "alpha").with_id("e1"),
                Edge::new("b", "result", "out", "alpha").with_id("e1"),
            ],
        );
        let graph = Graph::from_snapshot(snapshot);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge(&EdgeId::from("e1")).unwrap();
        assert_eq!(edge.source, NodeId::from("b"));
    }
}
