// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs and the literal values they carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value kind that can flow through a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Scalar float
    Float,
    /// 2-component vector
    Vec2,
    /// 3-component vector (also used for RGB colors)
    Vec3,
    /// 4-component vector
    Vec4,
}

impl PortType {
    /// Every port type, scalar first
    pub const ALL: [PortType; 4] = [Self::Float, Self::Vec2, Self::Vec3, Self::Vec4];

    /// GLSL type name
    pub fn glsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
        }
    }

    /// Number of scalar components
    pub fn component_count(self) -> usize {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    /// Value used when an unwired port declares no default.
    ///
    /// The 4-component zero keeps an opaque alpha.
    pub fn zero_value(self) -> Value {
        match self {
            Self::Float => Value::Number(0.0),
            Self::Vec2 => Value::Vector(vec![0.0, 0.0]),
            Self::Vec3 => Value::Vector(vec![0.0, 0.0, 0.0]),
            Self::Vec4 => Value::Vector(vec![0.0, 0.0, 0.0, 1.0]),
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// Literal value stored in port defaults and node parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Single number
    Number(f64),
    /// Fixed-width list of numbers (vectors, colors)
    Vector(Vec<f64>),
    /// Text (select options)
    Text(String),
}

impl Value {
    /// Get the number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the components, if this is a vector
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Get the text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render as a GLSL literal of the given kind.
    ///
    /// Numbers feeding a vector kind become a broadcast constructor, short
    /// vectors are padded from the kind's zero value and text renders as the
    /// zero value.
    pub fn to_glsl(&self, kind: PortType) -> String {
        match (self, kind) {
            (Self::Number(n), PortType::Float) => float_literal(*n),
            (Self::Number(n), _) => format!("{}({})", kind.glsl_name(), float_literal(*n)),
            (Self::Vector(components), PortType::Float) => {
                float_literal(components.first().copied().unwrap_or(0.0))
            }
            (Self::Vector(components), _) => {
                let zero = kind.zero_value();
                let padding = zero.as_vector().unwrap_or_default();
                let parts: Vec<String> = (0..kind.component_count())
                    .map(|i| {
                        let c = components
                            .get(i)
                            .or_else(|| padding.get(i))
                            .copied()
                            .unwrap_or(0.0);
                        float_literal(c)
                    })
                    .collect();
                format!("{}({})", kind.glsl_name(), parts.join(", "))
            }
            (Self::Text(_), _) => kind.zero_value().to_glsl(kind),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Self::Vector(v.to_vec())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Format a float as a GLSL literal that always carries a decimal point.
///
/// Non-finite numbers have no GLSL spelling and render as `0.0`.
pub fn float_literal(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_string();
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Format a parameter number with four fixed decimals (`2.0000`)
pub fn fixed_literal(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        "0.0000".to_string()
    }
}

/// Declared input or output slot on a node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDef {
    /// Port name (edge handle)
    pub name: String,
    /// Value kind
    pub kind: PortType,
    /// Default value used when the port is unwired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PortDef {
    /// Create a port without a default
    pub fn new(name: impl Into<String>, kind: PortType) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// GLSL literal used when nothing is wired into this port
    pub fn default_literal(&self) -> String {
        match &self.default {
            Some(value) => value.to_glsl(self.kind),
            None => self.kind.zero_value().to_glsl(self.kind),
        }
    }
}
