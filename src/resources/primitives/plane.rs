use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// XY plane facing +Z. Keeps `width`/`height` for fit-to-screen.
#[must_use]
pub fn create_plane(options: &PlaneOptions) -> Geometry {
    let grid_x = options.width_segments.max(1);
    let grid_y = options.height_segments.max(1);
    let row = grid_x + 1;

    let segment_width = options.width / grid_x as f32;
    let segment_height = options.height / grid_y as f32;

    let mut positions = Vec::with_capacity(((grid_x + 1) * (grid_y + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut uvs = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - options.height / 2.0;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - options.width / 2.0;
            // rows run top to bottom so v follows the image
            positions.push(Vec3::new(x, -y, 0.0));
            normals.push(Vec3::Z);
            uvs.push(Vec2::new(ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32));
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut geo = Geometry::new("plane").with_extent(options.width, options.height);
    geo.set_buffers(positions, normals, uvs, indices);
    geo
}
