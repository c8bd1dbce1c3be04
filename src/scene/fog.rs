use serde::Deserialize;

use crate::resources::Color;

/// Scene fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fog {
    Linear { color: Color, near: f32, far: f32 },
    Exponential { color: Color, density: f32 },
}

impl Fog {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Fog::Linear { color, .. } | Fog::Exponential { color, .. } => *color,
        }
    }

    /// Fraction of fog color mixed in at `distance` from the eye.
    #[must_use]
    pub fn factor(&self, distance: f32) -> f32 {
        match *self {
            Fog::Linear { near, far, .. } => {
                if far <= near {
                    return 1.0;
                }
                ((distance - near) / (far - near)).clamp(0.0, 1.0)
            }
            Fog::Exponential { density, .. } => {
                let d = density * distance;
                (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
            }
        }
    }
}

/// Fog fragment of the world configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FogDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Option<crate::descriptor::ColorValue>,
    pub near: f32,
    pub far: f32,
    pub density: f32,
}

impl Default for FogDescriptor {
    fn default() -> Self {
        Self {
            kind: "linear".to_string(),
            color: None,
            near: 1.0,
            far: 1000.0,
            density: 0.00025,
        }
    }
}

/// Builds fog from its descriptor; unknown kinds fall back to linear.
#[must_use]
pub fn setup_fog(descriptor: &FogDescriptor) -> Fog {
    let color = descriptor
        .color
        .as_ref()
        .and_then(crate::descriptor::ColorValue::resolve)
        .unwrap_or(Color::WHITE);
    match descriptor.kind.as_str() {
        "exp" | "exp2" | "exponential" => Fog::Exponential {
            color,
            density: descriptor.density,
        },
        "linear" => Fog::Linear {
            color,
            near: descriptor.near,
            far: descriptor.far,
        },
        other => {
            log::warn!("Unknown fog type '{other}', using linear");
            Fog::Linear {
                color,
                near: descriptor.near,
                far: descriptor.far,
            }
        }
    }
}
