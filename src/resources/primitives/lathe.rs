use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Revolves a 2D profile (x = radius, y = height) around the Y axis.
#[must_use]
pub fn create_lathe(profile: &[Vec2], segments: u32, phi_start: f32, phi_length: f32) -> Geometry {
    let segments = segments.max(1);
    let phi_length = phi_length.clamp(0.0, TAU);

    let mut geo = Geometry::new("lathe");
    if profile.len() < 2 {
        log::warn!("Lathe profile needs at least two points, got {}", profile.len());
        return geo;
    }

    let mut positions = Vec::with_capacity((segments as usize + 1) * profile.len());
    let mut uvs = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::new();

    for i in 0..=segments {
        let phi = phi_start + i as f32 / segments as f32 * phi_length;
        let (sin, cos) = phi.sin_cos();
        for (j, p) in profile.iter().enumerate() {
            positions.push(Vec3::new(p.x * sin, p.y, p.x * cos));
            uvs.push(Vec2::new(
                i as f32 / segments as f32,
                j as f32 / (profile.len() - 1) as f32,
            ));
        }
    }

    let rows = profile.len() as u32;
    for i in 0..segments {
        for j in 0..rows - 1 {
            let base = j + i * rows;
            let (a, b, c, d) = (base, base + rows, base + rows + 1, base + 1);
            indices.extend_from_slice(&[a, b, d, c, d, b]);
        }
    }

    let (min, max) = profile.iter().fold((Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)), |(lo, hi), p| {
        (lo.min(*p), hi.max(*p))
    });
    geo = geo.with_extent(max.x.abs().max(min.x.abs()) * 2.0, max.y - min.y);
    geo.set_buffers(positions, Vec::new(), uvs, indices);
    geo.compute_vertex_normals();
    geo
}
