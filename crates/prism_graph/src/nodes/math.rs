// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scalar math nodes.

use super::{arg, expressions, Expressions};
use crate::port::{PortDef, PortType};

/// Scalar math operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathNode {
    /// `a + b`
    Add,
    /// `a * b`
    Multiply,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Linear interpolation
    Mix,
    /// Smooth Hermite interpolation
    Smoothstep,
    /// Step function
    Step,
    /// Fractional part
    Fract,
}

impl MathNode {
    /// All math nodes
    pub const ALL: [MathNode; 8] = [
        Self::Add,
        Self::Multiply,
        Self::Sin,
        Self::Cos,
        Self::Mix,
        Self::Smoothstep,
        Self::Step,
        Self::Fract,
    ];

    /// Type id
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Add => "math_add",
            Self::Multiply => "math_multiply",
            Self::Sin => "math_sin",
            Self::Cos => "math_cos",
            Self::Mix => "math_mix",
            Self::Smoothstep => "math_smoothstep",
            Self::Step => "math_step",
            Self::Fract => "math_fract",
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Multiply => "Multiply",
            Self::Sin => "Sin",
            Self::Cos => "Cos",
            Self::Mix => "Mix",
            Self::Smoothstep => "Smoothstep",
            Self::Step => "Step",
            Self::Fract => "Fract",
        }
    }

    pub(crate) fn inputs(self) -> Vec<PortDef> {
        let float = |name: &str, default: f64| PortDef::new(name, PortType::Float).with_default(default);
        match self {
            Self::Add => vec![float("a", 0.0), float("b", 0.0)],
            Self::Multiply => vec![float("a", 1.0), float("b", 1.0)],
            Self::Sin | Self::Cos | Self::Fract => vec![float("x", 0.0)],
            Self::Mix => vec![float("a", 0.0), float("b", 1.0), float("t", 0.5)],
            Self::Smoothstep => vec![float("edge0", 0.0), float("edge1", 1.0), float("x", 0.5)],
            Self::Step => vec![float("edge", 0.5), float("x", 0.0)],
        }
    }

    pub(crate) fn outputs(self) -> Vec<PortDef> {
        vec![PortDef::new("result", PortType::Float)]
    }

    pub(crate) fn emit(self, inputs: &Expressions) -> Expressions {
        let result = match self {
            Self::Add => format!("({} + {})", arg(inputs, "a", "0.0"), arg(inputs, "b", "0.0")),
            Self::Multiply => {
                format!("({} * {})", arg(inputs, "a", "1.0"), arg(inputs, "b", "1.0"))
            }
            Self::Sin => format!("sin({})", arg(inputs, "x", "0.0")),
            Self::Cos => format!("cos({})", arg(inputs, "x", "0.0")),
            Self::Mix => format!(
                "mix({}, {}, {})",
                arg(inputs, "a", "0.0"),
                arg(inputs, "b", "1.0"),
                arg(inputs, "t", "0.5")
            ),
            Self::Smoothstep => format!(
                "smoothstep({}, {}, {})",
                arg(inputs, "edge0", "0.0"),
                arg(inputs, "edge1", "1.0"),
                arg(inputs, "x", "0.5")
            ),
            Self::Step => format!(
                "step({}, {})",
                arg(inputs, "edge", "0.5"),
                arg(inputs, "x", "0.0")
            ),
            Self::Fract => format!("fract({})", arg(inputs, "x", "0.0")),
        };
        expressions([("result", result)])
    }
}
