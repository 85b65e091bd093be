// SPDX-License-Identifier: MIT OR Apache-2.0
//! Terminal output node.

use super::{arg, expressions, Expressions};
use crate::port::{PortDef, PortType};

/// Reserved emitter key whose expression is written to the fragment output
pub const FRAG_COLOR_KEY: &str = "__fragColor";

/// Terminal nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputNode {
    /// Writes the final color
    Output,
}

impl OutputNode {
    /// All output nodes
    pub const ALL: [OutputNode; 1] = [Self::Output];

    /// Type id
    pub fn type_id(self) -> &'static str {
        "output"
    }

    /// Display name
    pub fn label(self) -> &'static str {
        "Output"
    }

    pub(crate) fn inputs(self) -> Vec<PortDef> {
        vec![
            PortDef::new("color", PortType::Vec3),
            PortDef::new("alpha", PortType::Float).with_default(1.0),
        ]
    }

    pub(crate) fn emit(self, inputs: &Expressions) -> Expressions {
        let color = arg(inputs, "color", "vec3(0.0)");
        let alpha = arg(inputs, "alpha", "1.0");
        expressions([(FRAG_COLOR_KEY, format!("vec4({color}, {alpha})"))])
    }
}
