// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value-kind resolution between connected ports.
//!
//! Output kinds are static per node type, so inference is a table lookup over
//! declared outputs. Compatibility is a fixed table, not unification:
//!
//! | from \ to | float | vec2 | vec3 | vec4 |
//! |-----------|-------|------|------|------|
//! | float     | yes   | yes  | yes  | yes  |
//! | vec2      |       | yes  |      |      |
//! | vec3      |       |      | yes  | yes  |
//! | vec4      |       |      | yes  | yes  |

use crate::node::{NodeId, NodeInstance, NodeRegistry};
use crate::port::PortType;
use std::collections::HashMap;

/// Output kinds keyed by `"nodeId.portName"`
pub type TypeMap = HashMap<String, PortType>;

/// Key of a node port in a [`TypeMap`] or binding table
pub fn port_key(node_id: &NodeId, port: &str) -> String {
    format!("{node_id}.{port}")
}

/// Kind produced by every output of every node with a registered type
pub fn infer_output_types(nodes: &[NodeInstance], registry: &NodeRegistry) -> TypeMap {
    let mut types = TypeMap::new();
    for node in nodes {
        let Some(def) = registry.get(&node.node_type) else {
            continue;
        };
        for output in &def.outputs {
            types.insert(port_key(&node.id, &output.name), output.kind);
        }
    }
    types
}

/// Whether a value of kind `source` may feed a port of kind `target`
pub fn can_connect(source: PortType, target: PortType) -> bool {
    use crate::port::PortType::{Float, Vec3, Vec4};
    source == target || matches!((source, target), (Float, _) | (Vec3, Vec4) | (Vec4, Vec3))
}

/// Rewrite `expr` of kind `source` into an expression of kind `target`.
///
/// Scalars broadcast (with an opaque 1.0 alpha for `vec4`), `vec3` gains a
/// 1.0 alpha and `vec4` drops its alpha. Identical and incompatible pairs
/// return the expression unchanged.
pub fn convert(source: PortType, target: PortType, expr: &str) -> String {
    use crate::port::PortType::{Float, Vec2, Vec3, Vec4};
    match (source, target) {
        (Float, Vec2) => format!("vec2({expr})"),
        (Float, Vec3) => format!("vec3({expr})"),
        (Float, Vec4) => format!("vec4(vec3({expr}), 1.0)"),
        (Vec3, Vec4) => format!("vec4({expr}, 1.0)"),
        (Vec4, Vec3) => format!("{expr}.rgb"),
        _ => expr.to_string(),
    }
}
