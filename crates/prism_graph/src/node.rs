// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions, instances and the capability registry.

use crate::nodes::{Expressions, NodeKind};
use crate::param::{ParamDef, ResolvedParams};
use crate::port::{PortDef, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node within one graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new random node ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Position of a node on the editor canvas (not read by the compiler)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type ID (catalog key)
    #[serde(rename = "type")]
    pub node_type: String,
    /// Position in the graph UI
    #[serde(default)]
    pub position: Position,
    /// Parameter overrides
    #[serde(default)]
    pub params: IndexMap<String, Value>,
}

impl NodeInstance {
    /// Create a node of the given type with a fresh id
    pub fn new(node_type: impl Into<String>) -> Self {
        Self::with_id(NodeId::generate(), node_type)
    }

    /// Create a node with a caller-chosen id
    pub fn with_id(id: impl Into<NodeId>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Position::default(),
            params: IndexMap::new(),
        }
    }

    /// Set a parameter override
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Shader inputs (coordinates, time, pointer, resolution)
    Input,
    /// Math operations
    Math,
    /// Pattern generators
    Pattern,
    /// Color operations
    Color,
    /// Terminal output
    Output,
}

impl NodeCategory {
    /// All categories in palette order
    pub const ALL: [NodeCategory; 5] = [
        Self::Input,
        Self::Math,
        Self::Pattern,
        Self::Color,
        Self::Output,
    ];

    /// Lowercase identifier
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Math => "math",
            Self::Pattern => "pattern",
            Self::Color => "color",
            Self::Output => "output",
        }
    }

    /// Parse a lowercase identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Node type definition: port signature, parameter schema and emitter
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDef {
    /// Emitter behind this definition
    pub kind: NodeKind,
    /// Unique type identifier
    pub type_id: String,
    /// Display name
    pub label: String,
    /// Category
    pub category: NodeCategory,
    /// Input ports
    pub inputs: Vec<PortDef>,
    /// Output ports
    pub outputs: Vec<PortDef>,
    /// Editable parameters
    pub params: Vec<ParamDef>,
    /// Shared shader helpers this node needs
    pub helpers: Vec<String>,
}

impl NodeDef {
    /// Whether this is the terminal output node
    pub fn is_terminal(&self) -> bool {
        self.category == NodeCategory::Output
    }

    /// Get an input port by name
    pub fn input(&self, name: &str) -> Option<&PortDef> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Get an output port by name
    pub fn output(&self, name: &str) -> Option<&PortDef> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Resolve an instance's overrides against this schema
    pub fn resolve_params(&self, overrides: &IndexMap<String, Value>) -> ResolvedParams {
        ResolvedParams::resolve(overrides, &self.params)
    }

    /// Produce GLSL expressions for this node's outputs
    pub fn emit(&self, inputs: &Expressions, params: &ResolvedParams) -> Expressions {
        self.kind.emit(inputs, params)
    }
}

/// Registry of available node types
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Registered node types by ID
    types: IndexMap<String, NodeDef>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the whole built-in catalog
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in NodeKind::all() {
            registry.register(kind.definition());
        }
        registry
    }

    /// Register a node type, replacing any type with the same id
    pub fn register(&mut self, def: NodeDef) {
        self.types.insert(def.type_id.clone(), def);
    }

    /// Get a node type by ID
    pub fn get(&self, type_id: &str) -> Option<&NodeDef> {
        self.types.get(type_id)
    }

    /// Whether a type is registered
    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeDef> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeDef> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Categories that have at least one type, in registration order
    pub fn categories(&self) -> Vec<NodeCategory> {
        let mut seen = Vec::new();
        for def in self.types.values() {
            if !seen.contains(&def.category) {
                seen.push(def.category);
            }
        }
        seen
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a node instance from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<NodeInstance> {
        self.get(type_id).map(|def| NodeInstance::new(def.type_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = NodeRegistry::builtin();
        assert_eq!(registry.len(), 20);
        assert!(registry.contains("output"));
        assert!(registry.contains("math_add"));
        assert!(!registry.contains("math_divide"));
        assert_eq!(registry.types_in_category(NodeCategory::Math).count(), 8);
        assert_eq!(registry.types_in_category(NodeCategory::Output).count(), 1);
        assert_eq!(registry.categories(), NodeCategory::ALL.to_vec());
    }

    #[test]
    fn test_create_node() {
        let registry = NodeRegistry::builtin();
        let a = registry.create_node("pattern_noise").unwrap();
        let b = registry.create_node("pattern_noise").unwrap();
        assert_eq!(a.node_type, "pattern_noise");
        assert_ne!(a.id, b.id);
        assert!(registry.create_node("nope").is_none());
    }

    #[test]
    fn test_instance_json_shape() {
        let json = r#"{"id":"n1","type":"input_time","position":{"x":10,"y":20},"params":{"speed":2}}"#;
        let node: NodeInstance = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, NodeId::from("n1"));
        assert_eq!(node.node_type, "input_time");
        assert_eq!(node.params.get("speed"), Some(&Value::Number(2.0)));

        let bare: NodeInstance = serde_json::from_str(r#"{"id":"o","type":"output"}"#).unwrap();
        assert!(bare.params.is_empty());
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in NodeCategory::ALL {
            assert_eq!(NodeCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(NodeCategory::from_name("texture"), None);
    }
}
