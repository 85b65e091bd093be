// SPDX-License-Identifier: MIT OR Apache-2.0
//! GLSL fragment shader generation from a node graph.
//!
//! [`CodeGenerator::generate`] walks the dependency-sorted graph, resolves
//! each node's inputs (wired expression or default literal, converted when the
//! kinds differ), calls the node's emitter, binds every returned output to a
//! fresh local and finally assembles the shader text:
//!
//! ```text
//! #version 300 es
//! precision highp float;
//!
//! uniform float u_time;
//! uniform vec2 u_resolution;
//! uniform vec2 u_mouse;
//!
//! out vec4 fragColor;
//!
//! <helper blocks>
//!
//! void main() {
//!   <declarations>
//!   fragColor = ...;
//! }
//! ```

use crate::connection::Edge;
use crate::helpers;
use crate::node::{NodeDef, NodeId, NodeInstance, NodeRegistry};
use crate::nodes::{Expressions, FRAG_COLOR_KEY};
use crate::port::PortDef;
use crate::sort::{sort_view, CycleError};
use crate::types::{can_connect, convert, infer_output_types, port_key, TypeMap};
use crate::view::GraphView;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Name of the fragment color output
pub const FRAG_COLOR: &str = "fragColor";

/// Prefix of generated local variable names
pub const VAR_PREFIX: &str = "v";

/// Fixed shader preamble: profile, precision, uniforms and output binding
pub const HEADER: &str = "#version 300 es
precision highp float;

uniform float u_time;
uniform vec2 u_resolution;
uniform vec2 u_mouse;

out vec4 fragColor;
";

/// Error during shader generation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The graph has no terminal node
    #[error("No output node found")]
    NoOutputNode,

    /// The dependency graph is not a DAG
    #[error("Cycle detected in node graph")]
    Cycle(#[from] CycleError),

    /// A node's type is not in the registry
    #[error("Unknown node type: {node_type}")]
    UnknownNodeType {
        /// Offending node
        node_id: NodeId,
        /// Type it asked for
        node_type: String,
    },
}

impl CompileError {
    /// Node to highlight in the editor, if the error is tied to one
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::UnknownNodeType { node_id, .. } => Some(node_id),
            Self::NoOutputNode | Self::Cycle(_) => None,
        }
    }
}

/// Successfully generated shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    /// Complete fragment shader source
    pub code: String,
    /// Helper names in first-seen order
    pub helpers: Vec<String>,
    /// Nodes in the order their code was emitted
    pub order: Vec<NodeId>,
}

/// Outcome of one compile call, as handed to the editor surface.
///
/// On failure no code is ever present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledResult {
    /// Whether compilation succeeded
    pub success: bool,
    /// Shader source on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Node the error is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_node_id: Option<NodeId>,
    /// Helper names used by the shader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<Vec<String>>,
}

impl From<Result<CompiledShader, CompileError>> for CompiledResult {
    fn from(result: Result<CompiledShader, CompileError>) -> Self {
        match result {
            Ok(shader) => Self {
                success: true,
                code: Some(shader.code),
                error: None,
                error_node_id: None,
                helpers: Some(shader.helpers),
            },
            Err(err) => Self {
                success: false,
                code: None,
                error: Some(err.to_string()),
                error_node_id: err.node_id().cloned(),
                helpers: None,
            },
        }
    }
}

/// Compile with the built-in node catalog
pub fn compile(nodes: &[NodeInstance], edges: &[Edge]) -> CompiledResult {
    static BUILTIN: OnceLock<NodeRegistry> = OnceLock::new();
    let registry = BUILTIN.get_or_init(NodeRegistry::builtin);
    CodeGenerator::new(registry).compile(nodes, edges)
}

/// Per-call emission state
#[derive(Debug, Default)]
struct Emission {
    /// Next generated variable number
    counter: usize,
    /// `"nodeId.port"` -> variable holding that output
    bindings: HashMap<String, String>,
    /// Local declarations in emission order
    statements: Vec<String>,
    /// Terminal writes, appended after all declarations
    writes: Vec<String>,
    /// Needed helper names in first-seen order
    helpers: IndexSet<String>,
    /// Emitted node order
    order: Vec<NodeId>,
}

impl Emission {
    fn allocate(&mut self) -> String {
        let name = format!("{VAR_PREFIX}{}", self.counter);
        self.counter += 1;
        name
    }
}

/// Shader code generator over a node registry
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator<'r> {
    registry: &'r NodeRegistry,
}

impl<'r> CodeGenerator<'r> {
    /// Create a generator that resolves node types through `registry`
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Self { registry }
    }

    /// Compile a snapshot into the editor-facing result
    pub fn compile(&self, nodes: &[NodeInstance], edges: &[Edge]) -> CompiledResult {
        let result = self.generate(nodes, edges);
        match &result {
            Ok(shader) => tracing::debug!(
                "Compiled {} nodes into {} bytes of GLSL",
                shader.order.len(),
                shader.code.len()
            ),
            Err(err) => tracing::debug!("Shader compile failed: {err}"),
        }
        result.into()
    }

    /// Generate the fragment shader for a snapshot
    pub fn generate(
        &self,
        nodes: &[NodeInstance],
        edges: &[Edge],
    ) -> Result<CompiledShader, CompileError> {
        let has_terminal = nodes.iter().any(|n| {
            self.registry
                .get(&n.node_type)
                .is_some_and(NodeDef::is_terminal)
        });
        if !has_terminal {
            return Err(CompileError::NoOutputNode);
        }

        let view = GraphView::new(nodes, edges);
        let sorted = sort_view(&view)?;
        let types = infer_output_types(nodes, self.registry);

        let mut emission = Emission::default();
        for node in sorted {
            let def = self.registry.get(&node.node_type).ok_or_else(|| {
                CompileError::UnknownNodeType {
                    node_id: node.id.clone(),
                    node_type: node.node_type.clone(),
                }
            })?;
            emit_node(&view, &types, node, def, &mut emission);
        }

        Ok(assemble(emission))
    }
}

/// Emit one node's declarations (or terminal write) into `emission`
fn emit_node(
    view: &GraphView<'_>,
    types: &TypeMap,
    node: &NodeInstance,
    def: &NodeDef,
    emission: &mut Emission,
) {
    emission.helpers.extend(def.helpers.iter().cloned());

    let inputs: Expressions = def
        .inputs
        .iter()
        .map(|port| {
            let expr = resolve_input(view, types, &emission.bindings, node, port);
            (port.name.clone(), expr)
        })
        .collect();
    let params = def.resolve_params(&node.params);
    let outputs = def.emit(&inputs, &params);

    if def.is_terminal() {
        if let Some(expr) = outputs.get(FRAG_COLOR_KEY) {
            emission.writes.push(format!("{FRAG_COLOR} = {expr};"));
        }
    } else {
        for port in &def.outputs {
            let Some(expr) = outputs.get(&port.name) else {
                continue;
            };
            let var = emission.allocate();
            emission
                .statements
                .push(format!("{} {var} = {expr};", port.kind.glsl_name()));
            emission.bindings.insert(port_key(&node.id, &port.name), var);
        }
    }

    emission.order.push(node.id.clone());
}

/// Expression feeding one input port: the wired upstream variable (converted
/// to the port's kind) or the port's default literal.
fn resolve_input(
    view: &GraphView<'_>,
    types: &TypeMap,
    bindings: &HashMap<String, String>,
    node: &NodeInstance,
    port: &PortDef,
) -> String {
    let Some(edge) = view.incoming(node.id.as_str(), &port.name) else {
        return port.default_literal();
    };
    let key = port_key(&edge.source, &edge.source_handle);
    let Some(var) = bindings.get(&key) else {
        return port.default_literal();
    };
    match types.get(&key) {
        Some(&source) => {
            if !can_connect(source, port.kind) {
                tracing::warn!(
                    "Edge {} feeds {source} into {} input {}.{} without a conversion",
                    edge.id,
                    port.kind,
                    node.id,
                    port.name
                );
            }
            convert(source, port.kind, var)
        }
        None => var.clone(),
    }
}

/// Concatenate header, helper blocks and the entry routine
fn assemble(emission: Emission) -> CompiledShader {
    let mut code = String::from(HEADER);

    for name in &emission.helpers {
        match helpers::source(name) {
            Some(block) => {
                code.push('\n');
                code.push_str(block.trim_end());
                code.push('\n');
            }
            None => tracing::warn!("No source registered for shader helper '{name}'"),
        }
    }

    code.push_str("\nvoid main() {\n");
    for statement in emission.statements.iter().chain(&emission.writes) {
        code.push_str("  ");
        code.push_str(statement);
        code.push('\n');
    }
    code.push_str("}\n");

    CompiledShader {
        code,
        helpers: emission.helpers.into_iter().collect(),
        order: emission.order,
    }
}
