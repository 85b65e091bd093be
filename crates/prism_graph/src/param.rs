// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editable node parameters and their resolution against instance overrides.

use crate::port::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an editable parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Single number
    Float,
    /// 2-component vector
    Vec2,
    /// 3-component vector
    Vec3,
    /// 4-component vector
    Vec4,
    /// RGB(A) color
    Color,
    /// One of a fixed list of options
    Select,
}

impl ParamKind {
    /// Lowercase identifier
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Color => "color",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Option offered by a select parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label
    pub label: String,
    /// Stored value
    pub value: String,
}

/// Schema of an editable parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name
    pub name: String,
    /// Parameter kind
    pub kind: ParamKind,
    /// Value used when the instance has no override
    pub default: Value,
    /// Lower bound hint for editors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound hint for editors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Options of a select parameter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl ParamDef {
    /// Create a number parameter
    pub fn float(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Float,
            default: Value::Number(default),
            min: None,
            max: None,
            options: Vec::new(),
        }
    }

    /// Create a 2-component vector parameter
    pub fn vec2(name: impl Into<String>, default: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Vec2,
            default: Value::from(default),
            min: None,
            max: None,
            options: Vec::new(),
        }
    }

    /// Create a select parameter from `(label, value)` pairs
    pub fn select(name: impl Into<String>, default: &str, options: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Select,
            default: Value::from(default),
            min: None,
            max: None,
            options: options
                .iter()
                .map(|(label, value)| SelectOption {
                    label: (*label).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
        }
    }

    /// Set the editor range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Whether a stored override has the shape this parameter expects
    pub fn accepts(&self, value: &Value) -> bool {
        match (self.kind, value) {
            (ParamKind::Float, Value::Number(_)) => true,
            (ParamKind::Vec2, Value::Vector(v)) => v.len() >= 2,
            (ParamKind::Vec3, Value::Vector(v)) => v.len() >= 3,
            (ParamKind::Vec4, Value::Vector(v)) => v.len() >= 4,
            (ParamKind::Color, Value::Vector(v)) => v.len() >= 3,
            (ParamKind::Select, Value::Text(t)) => {
                self.options.is_empty() || self.options.iter().any(|o| o.value == *t)
            }
            _ => false,
        }
    }
}

/// Parameter values handed to a node's emitter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    values: IndexMap<String, Value>,
}

impl ResolvedParams {
    /// Resolve instance overrides against a parameter schema.
    ///
    /// Overrides come first; every schema parameter that is missing or has the
    /// wrong shape takes its default. Overrides with no schema entry are kept.
    pub fn resolve(overrides: &IndexMap<String, Value>, schema: &[ParamDef]) -> Self {
        let mut values = overrides.clone();
        for def in schema {
            let usable = values.get(&def.name).is_some_and(|v| def.accepts(v));
            if !usable {
                values.insert(def.name.clone(), def.default.clone());
            }
        }
        Self { values }
    }

    /// Get a raw value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a number parameter
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    /// Get a vector parameter
    pub fn vector(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(Value::as_vector)
    }

    /// Get a text parameter
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Number of resolved values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<const N: usize> From<[(&str, Value); N]> for ResolvedParams {
    fn from(pairs: [(&str, Value); N]) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}
