// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dependency ordering of graph nodes.

use crate::connection::Edge;
use crate::node::NodeInstance;
use crate::view::GraphView;
use std::collections::VecDeque;

/// Error when the graph contains a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cycle detected in graph")]
pub struct CycleError;

/// Order nodes so that every producer precedes its consumers.
///
/// Kahn's algorithm. Ready nodes are taken in input order and successors are
/// released in edge order, so the result is deterministic. Dangling edges are
/// ignored.
pub fn topological_sort<'a>(
    nodes: &'a [NodeInstance],
    edges: &'a [Edge],
) -> Result<Vec<&'a NodeInstance>, CycleError> {
    sort_view(&GraphView::new(nodes, edges))
}

/// [`topological_sort`] over an already built view
pub fn sort_view<'a>(view: &GraphView<'a>) -> Result<Vec<&'a NodeInstance>, CycleError> {
    let nodes = view.nodes();
    let mut in_degree = vec![0usize; nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

    for edge in view.usable_edges() {
        let (Some(from), Some(to)) = (
            view.position(edge.source.as_str()),
            view.position(edge.target.as_str()),
        ) else {
            continue;
        };
        successors[from].push(to);
        in_degree[to] += 1;
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(nodes.len());

    while let Some(i) = queue.pop_front() {
        sorted.push(&nodes[i]);
        for &next in &successors[i] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if sorted.len() != nodes.len() {
        tracing::debug!(
            "Dependency sort stopped after {} of {} nodes",
            sorted.len(),
            nodes.len()
        );
        return Err(CycleError);
    }

    Ok(sorted)
}
