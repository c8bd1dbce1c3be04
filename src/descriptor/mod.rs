//! Object Descriptors
//!
//! The sole input contract of the compiler: a plain data record describing
//! one renderable object. Every field is optional; consumers resolve missing
//! values through the [`Defaults`] table or their own documented fallback.
//!
//! Descriptors are normally deserialized from the world configuration JSON:
//!
//! ```json
//! { "type": "box", "name": "crate", "size": [100, 100, 100],
//!   "position": "0 -500 1000", "color": "pink", "count": 3 }
//! ```
//!
//! Two fields cannot travel through JSON and are set programmatically:
//! [`ObjectDescriptor::curve_handler`] (a tube's sampled curve) and
//! [`ObjectDescriptor::parametric_handler`] (a parametric surface).

pub mod defaults;
pub mod path;

use std::fmt;
use std::rc::Rc;

use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;

pub use defaults::Defaults;
pub use path::{ControlPoints, PathSegment, PointValue, SegmentKind};

use crate::resources::color::Color;
use crate::resources::geometry::GeometryKind;
use crate::resources::material::MaterialKind;

/// A vector given either as a number list or as a space separated string
/// (`"0 -500 1000"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Vec3Value {
    List(Vec<f32>),
    Text(String),
}

impl Vec3Value {
    /// Resolves to a vector; missing components read as zero. Returns `None`
    /// for unparsable text.
    #[must_use]
    pub fn resolve(&self) -> Option<Vec3> {
        match self {
            Vec3Value::List(values) => Some(Vec3::from_array(defaults::pad3(values, [0.0; 3]))),
            Vec3Value::Text(text) => {
                let values = text
                    .split_whitespace()
                    .map(str::parse::<f32>)
                    .collect::<Result<Vec<_>, _>>()
                    .ok()?;
                Some(Vec3::from_array(defaults::pad3(&values, [0.0; 3])))
            }
        }
    }
}

impl From<Vec3> for Vec3Value {
    fn from(v: Vec3) -> Self {
        Vec3Value::List(v.to_array().to_vec())
    }
}

/// A color given as a packed number (`16777215`), a hex string or a keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(u32),
    Text(String),
}

impl ColorValue {
    #[must_use]
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorValue::Hex(hex) => Some(Color::from_hex(*hex)),
            ColorValue::Text(text) => Color::parse(text),
        }
    }
}

/// The JSON-expressible forms of `typeHandler`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeHandler {
    /// A named handler, e.g. a parametric surface (`"klein"`).
    Name(String),
    /// Numeric parameters, e.g. lathe profile angles in degrees.
    Values(Vec<f32>),
}

/// Extrusion settings for shape geometries.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub steps: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self { depth: 100.0, steps: 1 }
    }
}

/// A curve sampled at runtime: `t ∈ [0, 1] -> point`.
#[derive(Clone)]
pub struct CurveFn(pub Rc<dyn Fn(f32) -> Vec3>);

impl CurveFn {
    pub fn new(f: impl Fn(f32) -> Vec3 + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        (self.0)(t)
    }
}

impl fmt::Debug for CurveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CurveFn(..)")
    }
}

/// A parametric surface: `(u, v, size) -> point`.
#[derive(Clone)]
pub struct ParametricFn(pub Rc<dyn Fn(f32, f32, f32) -> Vec3>);

impl ParametricFn {
    pub fn new(f: impl Fn(f32, f32, f32) -> Vec3 + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    #[must_use]
    pub fn sample(&self, u: f32, v: f32, size: f32) -> Vec3 {
        (self.0)(u, v, size)
    }
}

impl fmt::Debug for ParametricFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParametricFn(..)")
    }
}

/// Declarative description of one renderable object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectDescriptor {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub size: Option<Vec<f32>>,
    pub position: Option<Vec3Value>,
    /// Euler angles in degrees (XYZ order).
    pub rotation: Option<Vec3Value>,
    pub color: Option<ColorValue>,
    pub opacity: Option<f32>,
    pub material: Option<String>,
    /// Texture url, resolved through the compiler's asset cache.
    pub texture: Option<String>,
    pub animation: Option<String>,
    pub animation_type: Option<String>,
    pub path: Option<Vec<PathSegment>>,
    pub count: Option<u32>,
    pub children: Vec<ObjectDescriptor>,
    pub extrude: Option<ExtrudeOptions>,
    pub segments: Option<u32>,
    /// Degrees.
    pub angle_start: Option<f32>,
    /// Degrees.
    pub arc_angle: Option<f32>,
    pub open_end: Option<bool>,
    pub type_handler: Option<TypeHandler>,
    /// Text for `font` geometry.
    pub title: Option<String>,
    /// Font url, resolved through the compiler's asset cache.
    pub font: Option<String>,

    #[serde(skip)]
    pub curve_handler: Option<CurveFn>,
    #[serde(skip)]
    pub parametric_handler: Option<ParametricFn>,
}

impl ObjectDescriptor {
    /// Starts a descriptor of the given geometry type.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: &[f32]) -> Self {
        self.size = Some(size.to_vec());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, hex: u32) -> Self {
        self.color = Some(ColorValue::Hex(hex));
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ObjectDescriptor) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.texture = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_curve_handler(mut self, f: impl Fn(f32) -> Vec3 + 'static) -> Self {
        self.curve_handler = Some(CurveFn::new(f));
        self
    }

    #[must_use]
    pub fn with_parametric_handler(mut self, f: impl Fn(f32, f32, f32) -> Vec3 + 'static) -> Self {
        self.parametric_handler = Some(ParametricFn::new(f));
        self
    }

    // ========================================================================
    // Field resolution
    // ========================================================================

    /// The raw `type` string, `"default"` when absent.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        self.kind.as_deref().unwrap_or(defaults::DEFAULT_KEY)
    }

    #[must_use]
    pub fn geometry_kind(&self) -> GeometryKind {
        GeometryKind::from_name(self.kind_name())
    }

    #[must_use]
    pub fn material_kind(&self) -> MaterialKind {
        self.material
            .as_deref()
            .map_or(MaterialKind::Wireframe, MaterialKind::from_name)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Explicit size (missing components padded from the table), else the
    /// table entry for this type.
    #[must_use]
    pub fn resolved_size(&self, defaults: &Defaults) -> [f32; 3] {
        let fallback = defaults.size_for(self.kind_name());
        match &self.size {
            Some(values) if !values.is_empty() => defaults::pad3(values, fallback),
            _ => fallback,
        }
    }

    #[must_use]
    pub fn resolved_position(&self, defaults: &Defaults) -> Vec3 {
        match self.position.as_ref().map(|p| (p, p.resolve())) {
            Some((_, Some(position))) => position,
            Some((raw, None)) => {
                log::warn!("Unparsable position {raw:?} on '{}', using default", self.display_name());
                defaults.position_for(self.kind_name())
            }
            None => defaults.position_for(self.kind_name()),
        }
    }

    #[must_use]
    pub fn resolved_rotation(&self) -> Quat {
        let degrees = self
            .rotation
            .as_ref()
            .and_then(Vec3Value::resolve)
            .unwrap_or(Vec3::ZERO);
        Quat::from_euler(
            EulerRot::XYZ,
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        )
    }

    /// Descriptor color, white when absent or unrecognised.
    #[must_use]
    pub fn resolved_color(&self) -> Color {
        match &self.color {
            None => Color::WHITE,
            Some(value) => value.resolve().unwrap_or_else(|| {
                log::warn!("Unrecognised color {value:?} on '{}', using white", self.display_name());
                Color::WHITE
            }),
        }
    }

    #[must_use]
    pub fn resolved_segments(&self, defaults: &Defaults) -> u32 {
        self.segments.unwrap_or(defaults.segments).max(1)
    }

    /// `(start, length)` in radians from `angleStart` / `arcAngle`.
    #[must_use]
    pub fn resolved_arc(&self) -> (f32, f32) {
        (
            self.angle_start.unwrap_or(0.0).to_radians(),
            self.arc_angle.unwrap_or(360.0).to_radians(),
        )
    }

    /// The animation key; `animationType` wins over `animation`.
    #[must_use]
    pub fn animation_key(&self) -> Option<&str> {
        self.animation_type.as_deref().or(self.animation.as_deref())
    }

    /// Replication factor; `count <= 1` means a single object.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.count.unwrap_or(1)
    }

    /// The path, when present and non-empty.
    #[must_use]
    pub fn path_segments(&self) -> Option<&[PathSegment]> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_position_is_split_on_whitespace() {
        let value = Vec3Value::Text("0 -500 1000".into());
        assert_eq!(value.resolve(), Some(Vec3::new(0.0, -500.0, 1000.0)));
    }

    #[test]
    fn two_component_size_is_padded_from_table() {
        let defaults = Defaults::builtin();
        let descriptor = ObjectDescriptor::new("plane").with_size(&[10000.0, 10000.0]);
        assert_eq!(descriptor.resolved_size(defaults), [10000.0, 10000.0, 0.0]);
    }

    #[test]
    fn animation_type_takes_precedence() {
        let mut descriptor = ObjectDescriptor::new("box").with_animation("spin");
        descriptor.animation_type = Some("float".into());
        assert_eq!(descriptor.animation_key(), Some("float"));
    }
}
