// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node catalog.
//!
//! Every node type is a variant of [`NodeKind`], grouped by category. Each
//! variant carries its port signature, parameter schema and a pure emitter
//! that turns input expressions and parameters into output expressions.

pub mod color;
pub mod input;
pub mod math;
pub mod output;
pub mod pattern;

pub use color::ColorNode;
pub use input::InputNode;
pub use math::MathNode;
pub use output::{OutputNode, FRAG_COLOR_KEY};
pub use pattern::PatternNode;

use crate::node::{NodeCategory, NodeDef};
use crate::param::{ParamDef, ResolvedParams};
use crate::port::PortDef;
use indexmap::IndexMap;

/// GLSL expressions keyed by port name
pub type Expressions = IndexMap<String, String>;

/// A built-in node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Shader input
    Input(InputNode),
    /// Math operation
    Math(MathNode),
    /// Pattern generator
    Pattern(PatternNode),
    /// Color operation
    Color(ColorNode),
    /// Terminal output
    Output(OutputNode),
}

impl NodeKind {
    /// Every built-in kind in palette order
    pub fn all() -> Vec<NodeKind> {
        InputNode::ALL
            .into_iter()
            .map(Self::Input)
            .chain(MathNode::ALL.into_iter().map(Self::Math))
            .chain(PatternNode::ALL.into_iter().map(Self::Pattern))
            .chain(ColorNode::ALL.into_iter().map(Self::Color))
            .chain(OutputNode::ALL.into_iter().map(Self::Output))
            .collect()
    }

    /// Type id used by node instances
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Input(n) => n.type_id(),
            Self::Math(n) => n.type_id(),
            Self::Pattern(n) => n.type_id(),
            Self::Color(n) => n.type_id(),
            Self::Output(n) => n.type_id(),
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Input(n) => n.label(),
            Self::Math(n) => n.label(),
            Self::Pattern(n) => n.label(),
            Self::Color(n) => n.label(),
            Self::Output(n) => n.label(),
        }
    }

    /// Category of this kind
    pub fn category(self) -> NodeCategory {
        match self {
            Self::Input(_) => NodeCategory::Input,
            Self::Math(_) => NodeCategory::Math,
            Self::Pattern(_) => NodeCategory::Pattern,
            Self::Color(_) => NodeCategory::Color,
            Self::Output(_) => NodeCategory::Output,
        }
    }

    fn inputs(self) -> Vec<PortDef> {
        match self {
            Self::Input(_) => Vec::new(),
            Self::Math(n) => n.inputs(),
            Self::Pattern(n) => n.inputs(),
            Self::Color(n) => n.inputs(),
            Self::Output(n) => n.inputs(),
        }
    }

    fn outputs(self) -> Vec<PortDef> {
        match self {
            Self::Input(n) => n.outputs(),
            Self::Math(n) => n.outputs(),
            Self::Pattern(n) => n.outputs(),
            Self::Color(n) => n.outputs(),
            Self::Output(_) => Vec::new(),
        }
    }

    fn params(self) -> Vec<ParamDef> {
        match self {
            Self::Input(n) => n.params(),
            Self::Pattern(n) => n.params(),
            Self::Color(n) => n.params(),
            Self::Math(_) | Self::Output(_) => Vec::new(),
        }
    }

    fn helpers(self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Pattern(n) => n.helpers(),
            Self::Color(n) => n.helpers(),
            Self::Input(_) | Self::Math(_) | Self::Output(_) => &[],
        };
        names.iter().map(|h| (*h).to_string()).collect()
    }

    /// Build the full definition registered for this kind
    pub fn definition(self) -> NodeDef {
        NodeDef {
            kind: self,
            type_id: self.type_id().to_string(),
            label: self.label().to_string(),
            category: self.category(),
            inputs: self.inputs(),
            outputs: self.outputs(),
            params: self.params(),
            helpers: self.helpers(),
        }
    }

    /// Produce GLSL expressions for this kind's outputs
    pub fn emit(self, inputs: &Expressions, params: &ResolvedParams) -> Expressions {
        match self {
            Self::Input(n) => n.emit(params),
            Self::Math(n) => n.emit(inputs),
            Self::Pattern(n) => n.emit(inputs, params),
            Self::Color(n) => n.emit(inputs, params),
            Self::Output(n) => n.emit(inputs),
        }
    }
}

/// Input expression or a fallback literal when the caller left it out
pub(crate) fn arg<'a>(inputs: &'a Expressions, name: &str, fallback: &'a str) -> &'a str {
    inputs.get(name).map_or(fallback, String::as_str)
}

/// Collect `(port, expression)` pairs into an expression map
pub(crate) fn expressions<const N: usize>(pairs: [(&str, String); N]) -> Expressions {
    pairs
        .into_iter()
        .map(|(name, expr)| (name.to_string(), expr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ids_are_unique() {
        let all = NodeKind::all();
        assert_eq!(all.len(), 20);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.type_id(), b.type_id());
            }
        }
    }

    #[test]
    fn test_definition_carries_schema() {
        let def = NodeKind::Pattern(PatternNode::Noise).definition();
        assert_eq!(def.type_id, "pattern_noise");
        assert_eq!(def.category, NodeCategory::Pattern);
        assert_eq!(def.helpers, vec!["snoise".to_string()]);
        assert_eq!(def.params.len(), 2);
        assert!(def.input("uv").is_some());
        assert!(def.output("value").is_some());
    }

    #[test]
    fn test_only_output_is_terminal() {
        for kind in NodeKind::all() {
            let def = kind.definition();
            assert_eq!(def.is_terminal(), matches!(kind, NodeKind::Output(_)));
        }
    }

    #[test]
    fn test_arg_fallback() {
        let inputs = expressions([("a", "v0".to_string())]);
        assert_eq!(arg(&inputs, "a", "0.0"), "v0");
        assert_eq!(arg(&inputs, "b", "0.0"), "0.0");
    }
}
