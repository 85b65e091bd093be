// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pattern generators driven by a 2-D coordinate.

use super::input::UV_EXPR;
use super::{arg, expressions, Expressions};
use crate::param::{ParamDef, ResolvedParams};
use crate::port::{fixed_literal, PortDef, PortType};

/// Procedural pattern nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternNode {
    /// Simplex noise, fractal when octaves > 1
    Noise,
    /// Soft-edged circle and its distance field
    Circle,
    /// Checkerboard
    Checker,
    /// Linear or radial gradient
    Gradient,
}

impl PatternNode {
    /// All pattern nodes
    pub const ALL: [PatternNode; 4] = [Self::Noise, Self::Circle, Self::Checker, Self::Gradient];

    /// Type id
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Noise => "pattern_noise",
            Self::Circle => "pattern_circle",
            Self::Checker => "pattern_checker",
            Self::Gradient => "pattern_gradient",
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Noise => "Noise",
            Self::Circle => "Circle",
            Self::Checker => "Checker",
            Self::Gradient => "Gradient",
        }
    }

    pub(crate) fn inputs(self) -> Vec<PortDef> {
        vec![PortDef::new("uv", PortType::Vec2)]
    }

    pub(crate) fn outputs(self) -> Vec<PortDef> {
        match self {
            Self::Circle => vec![
                PortDef::new("value", PortType::Float),
                PortDef::new("distance", PortType::Float),
            ],
            Self::Noise | Self::Checker | Self::Gradient => {
                vec![PortDef::new("value", PortType::Float)]
            }
        }
    }

    pub(crate) fn params(self) -> Vec<ParamDef> {
        match self {
            Self::Noise => vec![
                ParamDef::float("scale", 5.0).with_range(0.1, 100.0),
                ParamDef::float("octaves", 1.0).with_range(1.0, 8.0),
            ],
            Self::Circle => vec![
                ParamDef::float("radius", 0.3).with_range(0.0, 1.0),
                ParamDef::vec2("center", [0.5, 0.5]),
                ParamDef::float("softness", 0.01).with_range(0.0, 0.5),
            ],
            Self::Checker => vec![ParamDef::float("scale", 8.0).with_range(1.0, 64.0)],
            Self::Gradient => vec![ParamDef::select(
                "direction",
                "horizontal",
                &[
                    ("Horizontal", "horizontal"),
                    ("Vertical", "vertical"),
                    ("Diagonal", "diagonal"),
                    ("Radial", "radial"),
                ],
            )],
        }
    }

    pub(crate) fn helpers(self) -> &'static [&'static str] {
        match self {
            Self::Noise => &["snoise"],
            Self::Circle | Self::Checker | Self::Gradient => &[],
        }
    }

    pub(crate) fn emit(self, inputs: &Expressions, params: &ResolvedParams) -> Expressions {
        let uv = arg(inputs, "uv", UV_EXPR);
        match self {
            Self::Noise => {
                let scale = fixed_literal(params.number("scale").unwrap_or(5.0));
                let octaves = params.number("octaves").unwrap_or(1.0).floor() as i64;
                let value = if octaves <= 1 {
                    format!("snoise({uv} * {scale})")
                } else {
                    format!("fbm({uv} * {scale}, {octaves})")
                };
                expressions([("value", value)])
            }
            Self::Circle => {
                let radius = fixed_literal(params.number("radius").unwrap_or(0.3));
                let softness = fixed_literal(params.number("softness").unwrap_or(0.01));
                let center = params.vector("center").unwrap_or(&[0.5, 0.5]);
                let cx = fixed_literal(center.first().copied().unwrap_or(0.5));
                let cy = fixed_literal(center.get(1).copied().unwrap_or(0.5));
                let distance = format!("length({uv} - vec2({cx}, {cy}))");
                expressions([
                    (
                        "value",
                        format!(
                            "smoothstep({radius} + {softness}, {radius} - {softness}, {distance})"
                        ),
                    ),
                    ("distance", distance),
                ])
            }
            Self::Checker => {
                let scale = fixed_literal(params.number("scale").unwrap_or(8.0));
                expressions([(
                    "value",
                    format!("mod(floor({uv}.x * {scale}) + floor({uv}.y * {scale}), 2.0)"),
                )])
            }
            Self::Gradient => {
                let value = match params.text("direction").unwrap_or("horizontal") {
                    "vertical" => format!("{uv}.y"),
                    "diagonal" => format!("({uv}.x + {uv}.y) * 0.5"),
                    "radial" => format!("length({uv} - vec2(0.5))"),
                    _ => format!("{uv}.x"),
                };
                expressions([("value", value)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Value;

    fn uv() -> Expressions {
        expressions([("uv", "v0".to_string())])
    }

    #[test]
    fn test_noise_single_octave() {
        let params = ResolvedParams::from([
            ("scale", Value::Number(5.0)),
            ("octaves", Value::Number(1.0)),
        ]);
        let out = PatternNode::Noise.emit(&uv(), &params);
        assert_eq!(out["value"], "snoise(v0 * 5.0000)");
    }

    #[test]
    fn test_noise_fractal() {
        let params = ResolvedParams::from([
            ("scale", Value::Number(2.5)),
            ("octaves", Value::Number(4.7)),
        ]);
        let out = PatternNode::Noise.emit(&uv(), &params);
        assert_eq!(out["value"], "fbm(v0 * 2.5000, 4)");
    }

    #[test]
    fn test_circle() {
        let params = ResolvedParams::from([
            ("radius", Value::Number(0.3)),
            ("center", Value::from([0.5, 0.25])),
            ("softness", Value::Number(0.01)),
        ]);
        let out = PatternNode::Circle.emit(&uv(), &params);
        assert_eq!(out["distance"], "length(v0 - vec2(0.5000, 0.2500))");
        assert_eq!(
            out["value"],
            "smoothstep(0.3000 + 0.0100, 0.3000 - 0.0100, length(v0 - vec2(0.5000, 0.2500)))"
        );
    }

    #[test]
    fn test_checker() {
        let params = ResolvedParams::from([("scale", Value::Number(8.0))]);
        let out = PatternNode::Checker.emit(&uv(), &params);
        assert_eq!(
            out["value"],
            "mod(floor(v0.x * 8.0000) + floor(v0.y * 8.0000), 2.0)"
        );
    }

    #[test]
    fn test_gradient_directions() {
        let cases = [
            ("horizontal", "v0.x"),
            ("vertical", "v0.y"),
            ("diagonal", "(v0.x + v0.y) * 0.5"),
            ("radial", "length(v0 - vec2(0.5))"),
        ];
        for (direction, expected) in cases {
            let params = ResolvedParams::from([("direction", Value::from(direction))]);
            assert_eq!(PatternNode::Gradient.emit(&uv(), &params)["value"], expected);
        }
    }
}
