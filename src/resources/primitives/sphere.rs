use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

#[must_use]
pub fn create_sphere(options: &SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        // polar angle, south pole to north pole
        let theta = v * PI;
        let py = -radius * theta.cos();
        let ring = radius * theta.sin();

        for x in 0..=width_segments {
            let u = x as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            let p = Vec3::new(-ring * phi.cos(), py, ring * phi.sin());

            positions.push(p);
            normals.push(p.normalize_or_zero());
            uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = (y + 1) * stride + x;
            let v3 = v2 + 1;

            if y != 0 {
                indices.extend_from_slice(&[v0, v1, v2]);
            }
            if y != height_segments - 1 {
                indices.extend_from_slice(&[v1, v3, v2]);
            }
        }
    }

    let mut geo = Geometry::new("sphere").with_extent(radius * 2.0, radius * 2.0);
    geo.set_buffers(positions, normals, uvs, indices);
    geo
}
