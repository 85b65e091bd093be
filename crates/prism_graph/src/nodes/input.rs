// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input nodes: screen coordinates, time, pointer and resolution.

use super::{expressions, Expressions};
use crate::param::{ParamDef, ResolvedParams};
use crate::port::{fixed_literal, PortDef, PortType};

/// Normalized fragment coordinate (0-1 across the frame)
pub const UV_EXPR: &str = "(gl_FragCoord.xy / u_resolution)";

/// Nodes that read the shader's external inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputNode {
    /// Normalized screen coordinates
    Uv,
    /// Elapsed time in seconds
    Time,
    /// Normalized pointer position
    Mouse,
    /// Frame size in pixels
    Resolution,
}

impl InputNode {
    /// All input nodes
    pub const ALL: [InputNode; 4] = [Self::Uv, Self::Time, Self::Mouse, Self::Resolution];

    /// Type id
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Uv => "input_uv",
            Self::Time => "input_time",
            Self::Mouse => "input_mouse",
            Self::Resolution => "input_resolution",
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Uv => "UV",
            Self::Time => "Time",
            Self::Mouse => "Mouse",
            Self::Resolution => "Resolution",
        }
    }

    pub(crate) fn outputs(self) -> Vec<PortDef> {
        match self {
            Self::Uv => vec![
                PortDef::new("uv", PortType::Vec2),
                PortDef::new("x", PortType::Float),
                PortDef::new("y", PortType::Float),
            ],
            Self::Time => vec![
                PortDef::new("time", PortType::Float),
                PortDef::new("sin", PortType::Float),
                PortDef::new("cos", PortType::Float),
            ],
            Self::Mouse => vec![
                PortDef::new("position", PortType::Vec2),
                PortDef::new("x", PortType::Float),
                PortDef::new("y", PortType::Float),
            ],
            Self::Resolution => vec![
                PortDef::new("size", PortType::Vec2),
                PortDef::new("width", PortType::Float),
                PortDef::new("height", PortType::Float),
                PortDef::new("aspect", PortType::Float),
            ],
        }
    }

    pub(crate) fn params(self) -> Vec<ParamDef> {
        match self {
            Self::Time => vec![ParamDef::float("speed", 1.0).with_range(0.0, 10.0)],
            Self::Uv | Self::Mouse | Self::Resolution => Vec::new(),
        }
    }

    pub(crate) fn emit(self, params: &ResolvedParams) -> Expressions {
        match self {
            Self::Uv => expressions([
                ("uv", UV_EXPR.to_string()),
                ("x", format!("{UV_EXPR}.x")),
                ("y", format!("{UV_EXPR}.y")),
            ]),
            Self::Time => {
                let speed = params.number("speed").unwrap_or(1.0);
                let time = if speed == 1.0 {
                    "u_time".to_string()
                } else {
                    format!("(u_time * {})", fixed_literal(speed))
                };
                expressions([
                    ("sin", format!("sin({time})")),
                    ("cos", format!("cos({time})")),
                    ("time", time),
                ])
            }
            Self::Mouse => expressions([
                ("position", "u_mouse".to_string()),
                ("x", "u_mouse.x".to_string()),
                ("y", "u_mouse.y".to_string()),
            ]),
            Self::Resolution => expressions([
                ("size", "u_resolution".to_string()),
                ("width", "u_resolution.x".to_string()),
                ("height", "u_resolution.y".to_string()),
                ("aspect", "(u_resolution.x / u_resolution.y)".to_string()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Value;

    #[test]
    fn test_uv_emits_normalized_coordinates() {
        let out = InputNode::Uv.emit(&ResolvedParams::default());
        assert_eq!(out["uv"], "(gl_FragCoord.xy / u_resolution)");
        assert_eq!(out["x"], "(gl_FragCoord.xy / u_resolution).x");
        assert_eq!(out["y"], "(gl_FragCoord.xy / u_resolution).y");
    }

    #[test]
    fn test_time_default_speed() {
        let params = ResolvedParams::from([("speed", Value::Number(1.0))]);
        let out = InputNode::Time.emit(&params);
        assert_eq!(out["time"], "u_time");
        assert_eq!(out["sin"], "sin(u_time)");
        assert_eq!(out["cos"], "cos(u_time)");
    }

    #[test]
    fn test_time_custom_speed() {
        let params = ResolvedParams::from([("speed", Value::Number(2.0))]);
        let out = InputNode::Time.emit(&params);
        assert_eq!(out["time"], "(u_time * 2.0000)");
        assert_eq!(out["sin"], "sin((u_time * 2.0000))");
        assert_eq!(out["cos"], "cos((u_time * 2.0000))");
    }

    #[test]
    fn test_mouse_and_resolution() {
        let mouse = InputNode::Mouse.emit(&ResolvedParams::default());
        assert_eq!(mouse["position"], "u_mouse");
        assert_eq!(mouse["y"], "u_mouse.y");

        let res = InputNode::Resolution.emit(&ResolvedParams::default());
        assert_eq!(res["size"], "u_resolution");
        assert_eq!(res["aspect"], "(u_resolution.x / u_resolution.y)");
    }

    #[test]
    fn test_output_signatures() {
        assert_eq!(InputNode::Uv.outputs()[0].kind, PortType::Vec2);
        assert_eq!(InputNode::Resolution.outputs().len(), 4);
        assert_eq!(InputNode::Time.params()[0].name, "speed");
    }
}
