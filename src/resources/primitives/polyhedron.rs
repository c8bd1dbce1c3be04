use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Platonic solids at detail level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polyhedron {
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl Polyhedron {
    fn name(self) -> &'static str {
        match self {
            Polyhedron::Octahedron => "octahedron",
            Polyhedron::Icosahedron => "icosahedron",
            Polyhedron::Dodecahedron => "dodecahedron",
        }
    }

    fn vertices(self) -> Vec<Vec3> {
        match self {
            Polyhedron::Octahedron => vec![
                Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z,
            ],
            Polyhedron::Icosahedron => {
                let t = (1.0 + 5f32.sqrt()) / 2.0;
                [
                    [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
                    [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
                    [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
                ]
                .into_iter()
                .map(Vec3::from_array)
                .collect()
            }
            Polyhedron::Dodecahedron => {
                let t = (1.0 + 5f32.sqrt()) / 2.0;
                let r = 1.0 / t;
                [
                    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
                    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
                    [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
                    [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
                    [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
                ]
                .into_iter()
                .map(Vec3::from_array)
                .collect()
            }
        }
    }

    fn faces(self) -> &'static [u32] {
        match self {
            Polyhedron::Octahedron => &[
                0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
            ],
            Polyhedron::Icosahedron => &[
                0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2,
                10, 7, 6, 7, 1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5,
                2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
            ],
            Polyhedron::Dodecahedron => &[
                3, 11, 7, 3, 7, 15, 3, 15, 13, 7, 19, 17, 7, 17, 6, 7, 6, 15, 17, 4, 8,
                17, 8, 10, 17, 10, 6, 8, 0, 16, 8, 16, 2, 8, 2, 10, 0, 12, 1, 0, 1, 18,
                0, 18, 16, 6, 10, 2, 6, 2, 13, 6, 13, 15, 2, 16, 18, 2, 18, 3, 2, 3, 13,
                18, 1, 9, 18, 9, 11, 18, 11, 3, 4, 14, 12, 4, 12, 0, 4, 0, 8, 11, 9, 5,
                11, 5, 19, 11, 19, 7, 19, 5, 14, 19, 14, 4, 19, 4, 17, 1, 12, 14, 1, 14, 5,
                1, 5, 9,
            ],
        }
    }
}

/// Builds a flat-shaded solid with every vertex projected onto `radius`.
#[must_use]
pub fn create_polyhedron(kind: Polyhedron, radius: f32) -> Geometry {
    let vertices = kind.vertices();
    let faces = kind.faces();

    let mut positions = Vec::with_capacity(faces.len());
    let mut uvs = Vec::with_capacity(faces.len());
    for &i in faces {
        let p = vertices[i as usize].normalize() * radius;
        positions.push(p);
        uvs.push(spherical_uv(p));
    }

    let indices = (0..positions.len() as u32).collect();
    let mut geo = Geometry::new(kind.name()).with_extent(radius * 2.0, radius * 2.0);
    geo.set_buffers(positions, Vec::new(), uvs, indices);
    geo.compute_vertex_normals();
    geo
}

fn spherical_uv(p: Vec3) -> Vec2 {
    let n = p.normalize_or_zero();
    let u = n.z.atan2(-n.x) / std::f32::consts::TAU + 0.5;
    let v = n.y.clamp(-1.0, 1.0).asin() / std::f32::consts::PI + 0.5;
    Vec2::new(u, v)
}
