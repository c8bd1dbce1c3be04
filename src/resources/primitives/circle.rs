use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Flat disc (or sector) in the XY plane.
#[must_use]
pub fn create_circle(radius: f32, segments: u32, theta_start: f32, theta_length: f32) -> Geometry {
    let segments = segments.max(3);

    let mut positions = vec![Vec3::ZERO];
    let mut normals = vec![Vec3::Z];
    let mut uvs = vec![Vec2::splat(0.5)];
    let mut indices = Vec::with_capacity(segments as usize * 3);

    for s in 0..=segments {
        let theta = theta_start + s as f32 / segments as f32 * theta_length;
        let (sin, cos) = theta.sin_cos();
        positions.push(Vec3::new(radius * cos, radius * sin, 0.0));
        normals.push(Vec3::Z);
        uvs.push(Vec2::new((cos + 1.0) / 2.0, (sin + 1.0) / 2.0));
    }
    for i in 1..=segments {
        indices.extend_from_slice(&[i, i + 1, 0]);
    }

    let mut geo = Geometry::new("circle").with_extent(radius * 2.0, radius * 2.0);
    geo.set_buffers(positions, normals, uvs, indices);
    geo
}
