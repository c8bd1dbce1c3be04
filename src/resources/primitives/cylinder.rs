use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Options for cylinders and cones (a cone is a cylinder with a zero top
/// radius).
#[derive(Debug, Clone, Copy)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    /// Radians.
    pub theta_start: f32,
    /// Radians.
    pub theta_length: f32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: std::f32::consts::TAU,
        }
    }
}

#[must_use]
pub fn create_cylinder(options: &CylinderOptions) -> Geometry {
    build("cylinder", options)
}

#[must_use]
pub fn create_cone(radius: f32, height: f32, segments: u32, open_ended: bool, theta_start: f32, theta_length: f32) -> Geometry {
    let options = CylinderOptions {
        radius_top: 0.0,
        radius_bottom: radius,
        height,
        radial_segments: segments,
        height_segments: segments,
        open_ended,
        theta_start,
        theta_length,
    };
    build("cone", &options)
}

fn build(kind: &str, o: &CylinderOptions) -> Geometry {
    let radial = o.radial_segments.max(3);
    let rows = o.height_segments.max(1);
    let half_height = o.height / 2.0;
    let slope = (o.radius_bottom - o.radius_top) / o.height.max(f32::EPSILON);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // Torso
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (o.radius_bottom - o.radius_top) + o.radius_top;
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * o.theta_length + o.theta_start;
            let (sin, cos) = theta.sin_cos();
            positions.push(Vec3::new(radius * sin, -v * o.height + half_height, radius * cos));
            normals.push(Vec3::new(sin, slope, cos).normalize_or_zero());
            uvs.push(Vec2::new(u, 1.0 - v));
        }
    }
    for x in 0..radial {
        for y in 0..rows {
            let a = y * (radial + 1) + x;
            let b = (y + 1) * (radial + 1) + x;
            let c = (y + 1) * (radial + 1) + x + 1;
            let d = y * (radial + 1) + x + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    if !o.open_ended {
        if o.radius_top > 0.0 {
            push_cap(o, true, &mut positions, &mut normals, &mut uvs, &mut indices);
        }
        if o.radius_bottom > 0.0 {
            push_cap(o, false, &mut positions, &mut normals, &mut uvs, &mut indices);
        }
    }

    let diameter = o.radius_top.max(o.radius_bottom) * 2.0;
    let mut geo = Geometry::new(kind).with_extent(diameter, o.height);
    geo.set_buffers(positions, normals, uvs, indices);
    geo
}

fn push_cap(
    o: &CylinderOptions,
    top: bool,
    positions: &mut Vec<Vec3>,
    normals: &mut Vec<Vec3>,
    uvs: &mut Vec<Vec2>,
    indices: &mut Vec<u32>,
) {
    let radial = o.radial_segments.max(3);
    let (radius, sign) = if top { (o.radius_top, 1.0) } else { (o.radius_bottom, -1.0) };
    let y = o.height / 2.0 * sign;
    let normal = Vec3::Y * sign;

    let center = positions.len() as u32;
    positions.push(Vec3::new(0.0, y, 0.0));
    normals.push(normal);
    uvs.push(Vec2::splat(0.5));

    let ring = positions.len() as u32;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * o.theta_length + o.theta_start;
        let (sin, cos) = theta.sin_cos();
        positions.push(Vec3::new(radius * sin, y, radius * cos));
        normals.push(normal);
        uvs.push(Vec2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5));
    }
    for x in 0..radial {
        let (a, b) = (ring + x, ring + x + 1);
        if top {
            indices.extend_from_slice(&[a, b, center]);
        } else {
            indices.extend_from_slice(&[b, a, center]);
        }
    }
}
