// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph to GLSL fragment shader compiler for Prism.
//!
//! A shader is authored as a directed graph of typed nodes. This crate turns a
//! snapshot of that graph into a complete GLSL ES 3.00 fragment shader.
//!
//! ## Architecture
//!
//! Compilation is a pure pipeline over the node and edge lists:
//! - Dependency ordering ([`sort`])
//! - Value-kind resolution and conversion ([`types`])
//! - Per-node code emission through the node catalog ([`node`], [`nodes`])
//! - Shader assembly with shared helper routines ([`codegen`], [`helpers`])
//!
//! [`Graph`] is an editable model that validates connections against the
//! catalog, and [`CompileSession`] recompiles a changing graph after a quiet
//! period.
//!
//! ```
//! use prism_graph::{compile, Edge, NodeInstance};
//!
//! let nodes = vec![
//!     NodeInstance::with_id("time", "input_time"),
//!     NodeInstance::with_id("out", "output"),
//! ];
//! let edges = vec![Edge::new("time", "sin", "out", "color")];
//!
//! let result = compile(&nodes, &edges);
//! assert!(result.success);
//! assert!(result.code.unwrap().contains("fragColor = "));
//! ```

pub mod codegen;
pub mod connection;
pub mod graph;
pub mod helpers;
pub mod node;
pub mod nodes;
pub mod param;
pub mod port;
pub mod session;
pub mod sort;
pub mod types;
pub mod view;

pub use codegen::{compile, CodeGenerator, CompileError, CompiledResult, CompiledShader};
pub use connection::{Edge, EdgeId};
pub use graph::{ConnectionError, Graph, GraphSnapshot};
pub use node::{NodeCategory, NodeDef, NodeId, NodeInstance, NodeRegistry, Position};
pub use nodes::NodeKind;
pub use param::{ParamDef, ParamKind, ResolvedParams};
pub use port::{PortDef, PortType, Value};
pub use session::CompileSession;
pub use sort::{topological_sort, CycleError};
pub use types::{can_connect, convert, infer_output_types};
