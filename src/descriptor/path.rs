use glam::{Vec2, Vec3};
use serde::Deserialize;

/// How a path segment joins the accumulated curve path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Quad,
    Spline,
    Cubic,
    /// Any other (or missing) type: emits a single stationary point.
    #[default]
    #[serde(other)]
    Point,
}

/// A bare `{x, y, z}` record; missing coordinates read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PointValue {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<PointValue> for Vec3 {
    fn from(p: PointValue) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for PointValue {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Explicit control point(s) attached to a segment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ControlPoints {
    Many(Vec<PointValue>),
    One(PointValue),
}

impl ControlPoints {
    /// The control point a quadratic segment uses: the point itself, or the
    /// first element of a list.
    #[must_use]
    pub fn first(&self) -> Option<Vec3> {
        match self {
            ControlPoints::One(p) => Some((*p).into()),
            ControlPoints::Many(list) => list.first().map(|p| (*p).into()),
        }
    }

    /// Both control points of a cubic segment, when exactly two are listed.
    #[must_use]
    pub fn pair(&self) -> Option<(Vec3, Vec3)> {
        match self {
            ControlPoints::Many(list) if list.len() == 2 => Some((list[0].into(), list[1].into())),
            _ => None,
        }
    }
}

/// One entry of a descriptor's `path` list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PathSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub cp: Option<ControlPoints>,
}

impl PathSegment {
    #[must_use]
    pub fn new(kind: SegmentKind, x: f32, y: f32, z: f32) -> Self {
        Self { kind, x, y, z, cp: None }
    }

    #[must_use]
    pub fn with_control(mut self, cp: ControlPoints) -> Self {
        self.cp = Some(cp);
        self
    }

    #[inline]
    #[must_use]
    pub fn point(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Lathe profiles ignore depth.
    #[inline]
    #[must_use]
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
