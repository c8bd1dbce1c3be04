use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Axis-aligned box centred on the origin, 4 vertices per face.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vec3::new(width, height, depth) * 0.5;

    // (normal, u axis, v axis) per face; u x v == normal keeps CCW winding
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u_axis, v_axis) in faces {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = normal + u_axis * su + v_axis * sv;
            positions.push(p * half);
            normals.push(normal);
            uvs.push(Vec2::new((su + 1.0) * 0.5, 1.0 - (sv + 1.0) * 0.5));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut geo = Geometry::new("box").with_extent(width, height);
    geo.set_buffers(positions, normals, uvs, indices);
    geo
}
