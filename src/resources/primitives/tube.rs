use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

use crate::curves::CurvePath;
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, Copy)]
pub struct TubeOptions {
    pub radius: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub closed: bool,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tubular_segments: 64,
            radial_segments: 8,
            closed: false,
        }
    }
}

/// Sweeps a circle of `radius` along the path.
///
/// An empty path yields an empty geometry.
#[must_use]
pub fn create_tube(path: &CurvePath, options: &TubeOptions) -> Geometry {
    let tubular = options.tubular_segments.max(1);
    let radial = options.radial_segments.max(3);

    let mut geo = Geometry::new("tube");
    if path.is_empty() {
        log::warn!("Tube requested over an empty curve path");
        return geo;
    }

    let frames = frenet_frames(path, tubular, options.closed);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for (i, frame) in frames.iter().enumerate() {
        let center = path.point_at(i as f32 / tubular as f32).unwrap_or(Vec3::ZERO);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let (sin, cos) = v.sin_cos();
            let normal = (frame.normal * -cos + frame.binormal * sin).normalize_or_zero();
            positions.push(center + normal * options.radius);
            normals.push(normal);
            uvs.push(Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32));
        }
    }

    for j in 1..=tubular {
        for i in 1..=radial {
            let a = (radial + 1) * (j - 1) + (i - 1);
            let b = (radial + 1) * j + (i - 1);
            let c = (radial + 1) * j + i;
            let d = (radial + 1) * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    geo.set_buffers(positions, normals, uvs, indices);
    geo
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

fn frenet_frames(path: &CurvePath, segments: u32, closed: bool) -> Vec<Frame> {
    let mut tangents: Vec<Vec3> = (0..=segments)
        .map(|i| path.tangent_at(i as f32 / segments as f32).unwrap_or(Vec3::ZERO))
        .collect();

    // Stationary stretches borrow the nearest usable tangent.
    let fallback = tangents.iter().copied().find(|t| *t != Vec3::ZERO).unwrap_or(Vec3::Y);
    let mut last = fallback;
    for t in &mut tangents {
        if *t == Vec3::ZERO {
            *t = last;
        } else {
            last = *t;
        }
    }

    let first = tangents[0];
    let abs = first.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let normal = first.cross(first.cross(axis).normalize_or_zero()).normalize_or_zero();

    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame {
        tangent: first,
        normal,
        binormal: first.cross(normal),
    });

    for i in 1..tangents.len() {
        let prev = frames[i - 1];
        let tangent = tangents[i];
        let mut normal = prev.normal;
        let axis = prev.tangent.cross(tangent);
        if axis.length() > f32::EPSILON {
            let theta = prev.tangent.dot(tangent).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
        }
        frames.push(Frame {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        });
    }

    if closed && frames.len() > 1 {
        let n = frames.len() - 1;
        let mut theta = frames[0].normal.dot(frames[n].normal).clamp(-1.0, 1.0).acos() / n as f32;
        if frames[0].tangent.dot(frames[0].normal.cross(frames[n].normal)) > 0.0 {
            theta = -theta;
        }
        for (i, frame) in frames.iter_mut().enumerate().skip(1) {
            frame.normal = Quat::from_axis_angle(frame.tangent, theta * i as f32) * frame.normal;
            frame.binormal = frame.tangent.cross(frame.normal);
        }
    }

    frames
}
