// SPDX-License-Identifier: MIT OR Apache-2.0
//! Borrowed, per-compile view over a node list and an edge list.

use crate::connection::Edge;
use crate::node::NodeInstance;
use std::collections::HashMap;

/// Lookup tables over a graph snapshot, valid for one compile call
#[derive(Debug)]
pub struct GraphView<'a> {
    nodes: &'a [NodeInstance],
    edges: &'a [Edge],
    /// Node id -> position in `nodes` (first occurrence)
    index: HashMap<&'a str, usize>,
    /// (target id, target handle) -> edge wired into that input
    wiring: HashMap<(&'a str, &'a str), &'a Edge>,
}

impl<'a> GraphView<'a> {
    /// Index a snapshot.
    ///
    /// Edges whose source or target is not in `nodes` are ignored. When more
    /// than one edge feeds the same input, the last one in `edges` wins.
    pub fn new(nodes: &'a [NodeInstance], edges: &'a [Edge]) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let mut view = Self {
            nodes,
            edges,
            index,
            wiring: HashMap::new(),
        };

        let mut wiring = HashMap::new();
        for edge in view.usable_edges() {
            let key = (edge.target.as_str(), edge.target_handle.as_str());
            if let Some(shadowed) = wiring.insert(key, edge) {
                tracing::warn!(
                    "Input {}.{} is wired more than once; edge {} shadows edge {}",
                    edge.target,
                    edge.target_handle,
                    edge.id,
                    shadowed.id
                );
            }
        }
        view.wiring = wiring;
        view
    }

    /// All nodes in input order
    pub fn nodes(&self) -> &'a [NodeInstance] {
        self.nodes
    }

    /// Position of a node in the input list
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Get a node by id
    pub fn node(&self, id: &str) -> Option<&'a NodeInstance> {
        self.position(id).map(|i| &self.nodes[i])
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether either end of an edge is missing from the node list
    pub fn is_dangling(&self, edge: &Edge) -> bool {
        !self.contains(edge.source.as_str()) || !self.contains(edge.target.as_str())
    }

    /// Edges whose both ends exist, in input order
    pub fn usable_edges(&self) -> impl Iterator<Item = &'a Edge> + '_ {
        self.edges.iter().filter(move |e| !self.is_dangling(e))
    }

    /// The edge feeding an input port, if any
    pub fn incoming(&self, target: &str, handle: &str) -> Option<&'a Edge> {
        self.wiring.get(&(target, handle)).copied()
    }
}
