// SPDX-License-Identifier: MIT OR Apache-2.0
//! Color construction and blending nodes.

use super::{arg, expressions, Expressions};
use crate::param::{ParamDef, ResolvedParams};
use crate::port::{PortDef, PortType};

/// Color nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorNode {
    /// Color from RGB components
    Rgb,
    /// Color from hue, saturation and value
    HsvToRgb,
    /// Blend two colors
    Blend,
}

impl ColorNode {
    /// All color nodes
    pub const ALL: [ColorNode; 3] = [Self::Rgb, Self::HsvToRgb, Self::Blend];

    /// Type id
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Rgb => "color_rgb",
            Self::HsvToRgb => "color_hsv_to_rgb",
            Self::Blend => "color_blend",
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::HsvToRgb => "HSV to RGB",
            Self::Blend => "Blend",
        }
    }

    pub(crate) fn inputs(self) -> Vec<PortDef> {
        let float = |name: &str, default: f64| PortDef::new(name, PortType::Float).with_default(default);
        match self {
            Self::Rgb => vec![float("r", 1.0), float("g", 1.0), float("b", 1.0)],
            Self::HsvToRgb => vec![float("h", 0.0), float("s", 1.0), float("v", 1.0)],
            Self::Blend => vec![
                PortDef::new("color1", PortType::Vec3),
                PortDef::new("color2", PortType::Vec3),
                float("factor", 0.5),
            ],
        }
    }

    pub(crate) fn outputs(self) -> Vec<PortDef> {
        vec![PortDef::new("color", PortType::Vec3)]
    }

    pub(crate) fn params(self) -> Vec<ParamDef> {
        match self {
            Self::Blend => vec![ParamDef::select(
                "mode",
                "mix",
                &[
                    ("Mix", "mix"),
                    ("Add", "add"),
                    ("Multiply", "multiply"),
                    ("Screen", "screen"),
                    ("Overlay", "overlay"),
                ],
            )],
            Self::Rgb | Self::HsvToRgb => Vec::new(),
        }
    }

    pub(crate) fn helpers(self) -> &'static [&'static str] {
        match self {
            Self::HsvToRgb => &["hsv2rgb"],
            Self::Rgb | Self::Blend => &[],
        }
    }

    pub(crate) fn emit(self, inputs: &Expressions, params: &ResolvedParams) -> Expressions {
        let color = match self {
            Self::Rgb => format!(
                "vec3({}, {}, {})",
                arg(inputs, "r", "1.0"),
                arg(inputs, "g", "1.0"),
                arg(inputs, "b", "1.0")
            ),
            Self::HsvToRgb => format!(
                "hsv2rgb(vec3({}, {}, {}))",
                arg(inputs, "h", "0.0"),
                arg(inputs, "s", "1.0"),
                arg(inputs, "v", "1.0")
            ),
            Self::Blend => {
                let c1 = arg(inputs, "color1", "vec3(0.0)");
                let c2 = arg(inputs, "color2", "vec3(1.0)");
                let factor = arg(inputs, "factor", "0.5");
                match params.text("mode").unwrap_or("mix") {
                    "add" => format!("({c1} + {c2} * {factor})"),
                    "multiply" => format!("mix({c1}, {c1} * {c2}, {factor})"),
                    "screen" => format!(
                        "mix({c1}, vec3(1.0) - (vec3(1.0) - {c1}) * (vec3(1.0) - {c2}), {factor})"
                    ),
                    "overlay" => format!(
                        "mix({c1}, {c1} * ({c1} + 2.0 * {c2} * (vec3(1.0) - {c1})), {factor})"
                    ),
                    _ => format!("mix({c1}, {c2}, {factor})"),
                }
            }
        };
        expressions([("color", color)])
    }
}
