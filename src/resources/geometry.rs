use glam::{Affine3A, Vec2, Vec3};

/// Geometry kinds recognised by descriptor `type` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Box,
    Sphere,
    Cone,
    Cylinder,
    Circle,
    Tube,
    Lathe,
    Plane,
    Font,
    Heart,
    Parametric,
    Dodecahedron,
    Octahedron,
    Icosahedron,
    /// Unrecognised `type`; compiled as a box.
    Fallback(String),
}

impl GeometryKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "box" | "default" => Self::Box,
            "sphere" => Self::Sphere,
            "cone" => Self::Cone,
            "cylinder" => Self::Cylinder,
            "circle" => Self::Circle,
            "tube" => Self::Tube,
            "lathe" => Self::Lathe,
            "plane" => Self::Plane,
            "font" => Self::Font,
            "heart" => Self::Heart,
            "parametric" => Self::Parametric,
            "dodecahedron" => Self::Dodecahedron,
            "octahedron" => Self::Octahedron,
            "icosahedron" => Self::Icosahedron,
            _ => Self::Fallback(name.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cone => "cone",
            Self::Cylinder => "cylinder",
            Self::Circle => "circle",
            Self::Tube => "tube",
            Self::Lathe => "lathe",
            Self::Plane => "plane",
            Self::Font => "font",
            Self::Heart => "heart",
            Self::Parametric => "parametric",
            Self::Dodecahedron => "dodecahedron",
            Self::Octahedron => "octahedron",
            Self::Icosahedron => "icosahedron",
            Self::Fallback(name) => name,
        }
    }
}

/// Primitive assembly of the index/vertex stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    TriangleList,
    LineStrip,
}

/// Construction parameters kept alongside the buffers.
///
/// Only the planar extent is retained; fit-to-screen reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryParameters {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = matrix.transform_point3(corner);
            new_min = new_min.min(p);
            new_max = new_max.max(p);
        }
        Self { min: new_min, max: new_max }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// CPU-side vertex buffers for one drawable.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub kind: String,
    pub parameters: GeometryParameters,
    pub topology: Topology,

    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,

    bounding_box: Option<BoundingBox>,
    bounding_sphere: Option<BoundingSphere>,
    version: u64,
}

impl Geometry {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Records the planar extent used by fit-to-screen.
    #[must_use]
    pub fn with_extent(mut self, width: f32, height: f32) -> Self {
        self.parameters.width = Some(width);
        self.parameters.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounding_sphere
    }

    pub fn set_buffers(&mut self, positions: Vec<Vec3>, normals: Vec<Vec3>, uvs: Vec<Vec2>, indices: Vec<u32>) {
        self.positions = positions;
        self.normals = normals;
        self.uvs = uvs;
        self.indices = indices;
        self.version = self.version.wrapping_add(1);
        self.compute_bounding_volume();
    }

    /// Area weighted vertex normals from the triangle list.
    pub fn compute_vertex_normals(&mut self) {
        let count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; count];

        let mut accumulate = |i0: usize, i1: usize, i2: usize| {
            if i0 >= count || i1 >= count || i2 >= count {
                return;
            }
            let v0 = self.positions[i0];
            let face = (self.positions[i1] - v0).cross(self.positions[i2] - v0);
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        };

        if self.indices.is_empty() {
            for i in (0..count).step_by(3) {
                if i + 2 < count {
                    accumulate(i, i + 1, i + 2);
                }
            }
        } else {
            for tri in self.indices.chunks_exact(3) {
                accumulate(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    pub fn compute_bounding_volume(&mut self) {
        if self.positions.is_empty() {
            self.bounding_box = None;
            self.bounding_sphere = None;
            return;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }

        // AABB centre as the sphere centre
        let center = (min + max) * 0.5;
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max)
            .sqrt();

        self.bounding_box = Some(BoundingBox { min, max });
        self.bounding_sphere = Some(BoundingSphere { center, radius });
    }

    /// Translates every vertex; used to centre text.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
        self.version = self.version.wrapping_add(1);
        self.compute_bounding_volume();
    }
}
