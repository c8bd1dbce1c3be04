use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Named parametric surfaces usable from JSON `typeHandler` strings.
#[must_use]
pub fn named_surface(name: &str) -> Option<fn(f32, f32, f32) -> Vec3> {
    let f: fn(f32, f32, f32) -> Vec3 = match name {
        "plane" => plane,
        "klein" => klein,
        "mobius" => mobius,
        "sphere" => sphere,
        "torus" => torus,
        _ => return None,
    };
    Some(f)
}

fn plane(u: f32, v: f32, size: f32) -> Vec3 {
    Vec3::new((u - 0.5) * size, (v - 0.5) * size, 0.0)
}

fn klein(u: f32, v: f32, size: f32) -> Vec3 {
    let u = u * TAU;
    let v = v * TAU;
    let (x, z) = if u < PI {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + 2.0 * (1.0 - u.cos() / 2.0) * u.cos() * v.cos(),
            -8.0 * u.sin() - 2.0 * (1.0 - u.cos() / 2.0) * u.sin() * v.cos(),
        )
    } else {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + 2.0 * (1.0 - u.cos() / 2.0) * (v + PI).cos(),
            -8.0 * u.sin(),
        )
    };
    let y = -2.0 * (1.0 - u.cos() / 2.0) * v.sin();
    Vec3::new(x, y, z) * (size / 16.0)
}

fn mobius(u: f32, t: f32, size: f32) -> Vec3 {
    let u = u - 0.5;
    let v = TAU * t;
    let a = 2.0;
    let x = v.cos() * (a + u * (v / 2.0).cos());
    let y = v.sin() * (a + u * (v / 2.0).cos());
    let z = u * (v / 2.0).sin();
    Vec3::new(x, y, z) * (size / 4.0)
}

fn sphere(u: f32, v: f32, size: f32) -> Vec3 {
    let theta = u * TAU;
    let phi = v * PI;
    Vec3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin()) * (size / 2.0)
}

fn torus(u: f32, v: f32, size: f32) -> Vec3 {
    let theta = u * TAU;
    let phi = v * TAU;
    let (major, minor) = (size / 2.0, size / 6.0);
    Vec3::new(
        (major + minor * phi.cos()) * theta.cos(),
        minor * phi.sin(),
        (major + minor * phi.cos()) * theta.sin(),
    )
}

/// Samples `f(u, v)` on a `slices x stacks` grid.
#[must_use]
pub fn create_parametric(f: impl Fn(f32, f32) -> Vec3, slices: u32, stacks: u32) -> Geometry {
    let slices = slices.max(1);
    let stacks = stacks.max(1);
    let row = slices + 1;

    let mut positions = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    let mut uvs = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::new();

    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            positions.push(f(u, v));
            uvs.push(Vec2::new(u, v));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = i * row + j + 1;
            let c = (i + 1) * row + j + 1;
            let d = (i + 1) * row + j;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut geo = Geometry::new("parametric");
    geo.set_buffers(positions, Vec::new(), uvs, indices);
    geo.compute_vertex_normals();
    geo
}
