use glam::{Vec2, Vec3};

use crate::resources::geometry::{Geometry, Topology};

/// Points sampled per curved command.
pub const CURVE_SEGMENTS: usize = 12;

/// A closed 2D outline with optional holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub outline: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

impl Shape {
    #[must_use]
    pub fn new(outline: Vec<Vec2>) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    /// Outline first, then each hole.
    pub fn contours(&self) -> impl Iterator<Item = &[Vec2]> {
        std::iter::once(self.outline.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// Pen-style 2D path builder.
#[derive(Debug, Clone, Default)]
pub struct ShapePath {
    points: Vec<Vec2>,
}

impl ShapePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.clear();
        self.points.push(Vec2::new(x, y));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.push(Vec2::new(x, y));
        self
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> &mut Self {
        let start = self.current();
        let (cp, end) = (Vec2::new(cpx, cpy), Vec2::new(x, y));
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let k = 1.0 - t;
            self.points.push(start * (k * k) + cp * (2.0 * k * t) + end * (t * t));
        }
        self
    }

    pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) -> &mut Self {
        let start = self.current();
        let (c1, c2, end) = (Vec2::new(cp1x, cp1y), Vec2::new(cp2x, cp2y), Vec2::new(x, y));
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let k = 1.0 - t;
            self.points
                .push(start * (k * k * k) + c1 * (3.0 * k * k * t) + c2 * (3.0 * k * t * t) + end * (t * t * t));
        }
        self
    }

    fn current(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Sampled points with the closing duplicate removed.
    #[must_use]
    pub fn points(&self) -> Vec<Vec2> {
        let mut points = self.points.clone();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    #[must_use]
    pub fn into_shape(self) -> Shape {
        Shape::new(self.points())
    }
}

/// Heart outline of fixed height 50 anchored at `origin` (its bottom tip).
#[must_use]
pub fn heart_shape(origin: Vec2) -> Shape {
    const HEIGHT: f32 = 50.0;
    let control = HEIGHT / 5.0;
    // unit up vector rotated by -45 degrees
    let r = Vec2::from_angle(-std::f32::consts::FRAC_PI_4).rotate(Vec2::Y) * HEIGHT;
    let top = origin.y + HEIGHT + control;

    let mut path = ShapePath::new();
    path.move_to(origin.x, origin.y)
        .quadratic_curve_to(r.x - control, r.y / 4.0, r.x, r.y)
        .quadratic_curve_to(r.x, r.y + control * 2.0, r.x / 2.0 + origin.x, top)
        .quadratic_curve_to(origin.x, top, origin.x, origin.y + HEIGHT)
        .quadratic_curve_to(origin.x, top, -(r.x / 2.0 + origin.x), top)
        .quadratic_curve_to(-r.x, r.y + control * 2.0, -r.x, r.y)
        .quadratic_curve_to(-(r.x - control), r.y / 4.0, origin.x, origin.y);
    path.into_shape()
}

/// Twice the signed area; positive for counter-clockwise contours.
#[must_use]
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        * 0.5
}

/// Point-in-polygon by ray crossing.
#[must_use]
pub fn contains(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let n = points.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Ear-clipping triangulation of a simple polygon. Indices refer to `points`.
#[must_use]
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (a, b, c) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
            is_ear(points, &remaining, a, b, c)
        });
        let Some(i) = ear else {
            log::debug!("Triangulation stalled with {m} vertices left");
            break;
        };
        let (a, b, c) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
        triangles.push([a as u32, b as u32, c as u32]);
        remaining.remove(i);
    }
    if remaining.len() == 3 {
        triangles.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    }
    triangles
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

fn is_ear(points: &[Vec2], remaining: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    if cross(pa, pb, pc) <= f32::EPSILON {
        return false;
    }
    remaining.iter().all(|&k| {
        if k == a || k == b || k == c {
            return true;
        }
        let p = points[k];
        !(cross(pa, pb, p) >= 0.0 && cross(pb, pc, p) >= 0.0 && cross(pc, pa, p) >= 0.0)
    })
}

/// Splices each hole into the outline through a bridge edge so the result
/// is a single simple polygon.
#[must_use]
pub fn merge_holes(shape: &Shape) -> Vec<Vec2> {
    let mut outline = shape.outline.clone();
    if signed_area(&outline) < 0.0 {
        outline.reverse();
    }

    for hole in &shape.holes {
        if hole.len() < 3 {
            continue;
        }
        let mut hole = hole.clone();
        if signed_area(&hole) > 0.0 {
            hole.reverse();
        }
        let (hi, hp) = hole
            .iter()
            .copied()
            .enumerate()
            .fold((0, Vec2::splat(f32::NEG_INFINITY)), |best, (i, p)| if p.x > best.1.x { (i, p) } else { best });
        let oi = outline
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.distance_squared(hp).total_cmp(&b.distance_squared(hp)))
            .map_or(0, |(i, _)| i);

        let mut merged = Vec::with_capacity(outline.len() + hole.len() + 2);
        merged.extend_from_slice(&outline[..=oi]);
        merged.extend(hole[hi..].iter().chain(&hole[..=hi]));
        merged.extend_from_slice(&outline[oi..]);
        outline = merged;
    }
    outline
}

/// Flat filled geometry in the XY plane.
#[must_use]
pub fn create_shape(shapes: &[Shape]) -> Geometry {
    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for shape in shapes {
        let polygon = merge_holes(shape);
        let base = positions.len() as u32;
        for p in &polygon {
            positions.push(p.extend(0.0));
            uvs.push(*p);
        }
        for [a, b, c] in triangulate(&polygon) {
            indices.extend_from_slice(&[base + a, base + b, base + c]);
        }
    }

    let normals = vec![Vec3::Z; positions.len()];
    let mut geo = Geometry::new("shape");
    geo.set_buffers(positions, normals, uvs, indices);
    with_box_extent(geo)
}

/// Extrudes the shape along +Z by `depth` in `steps` slices.
#[must_use]
pub fn create_extrude(shape: &Shape, depth: f32, steps: u32) -> Geometry {
    let steps = steps.max(1);
    let polygon = merge_holes(shape);
    let triangles = triangulate(&polygon);

    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // Caps: back faces -Z, front faces +Z
    for (z, flip) in [(0.0, true), (depth, false)] {
        let base = positions.len() as u32;
        for p in &polygon {
            positions.push(p.extend(z));
            uvs.push(*p);
        }
        for [a, b, c] in &triangles {
            if flip {
                indices.extend_from_slice(&[base + a, base + c, base + b]);
            } else {
                indices.extend_from_slice(&[base + a, base + b, base + c]);
            }
        }
    }

    // Walls, per contour so bridge edges stay internal
    for contour in shape.contours() {
        let n = contour.len();
        if n < 2 {
            continue;
        }
        for s in 0..steps {
            let z0 = depth * s as f32 / steps as f32;
            let z1 = depth * (s + 1) as f32 / steps as f32;
            for i in 0..n {
                let (a, b) = (contour[i], contour[(i + 1) % n]);
                let base = positions.len() as u32;
                positions.extend_from_slice(&[a.extend(z0), b.extend(z0), b.extend(z1), a.extend(z1)]);
                uvs.extend_from_slice(&[Vec2::new(a.x, z0), Vec2::new(b.x, z0), Vec2::new(b.x, z1), Vec2::new(a.x, z1)]);
                indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }
    }

    let mut geo = Geometry::new("extrude");
    geo.set_buffers(positions, Vec::new(), uvs, indices);
    geo.compute_vertex_normals();
    with_box_extent(geo)
}

/// One line strip per contour; holes become separate strips.
#[must_use]
pub fn create_outlines(shapes: &[Shape]) -> Vec<Geometry> {
    shapes
        .iter()
        .flat_map(Shape::contours)
        .filter(|c| c.len() > 1)
        .map(|contour| {
            let mut points: Vec<Vec3> = contour.iter().map(|p| p.extend(0.0)).collect();
            points.push(points[0]);
            let mut geo = Geometry::new("line").with_topology(Topology::LineStrip);
            geo.set_buffers(points, Vec::new(), Vec::new(), Vec::new());
            geo
        })
        .collect()
}

fn with_box_extent(geo: Geometry) -> Geometry {
    match geo.bounding_box() {
        Some(bb) => {
            let size = bb.size();
            geo.with_extent(size.x, size.y)
        }
        None => geo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_triangulates_into_two() {
        let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        assert_eq!(triangulate(&square).len(), 2);
    }

    #[test]
    fn clockwise_input_is_accepted() {
        let square = [Vec2::ZERO, Vec2::Y, Vec2::ONE, Vec2::X];
        assert_eq!(triangulate(&square).len(), 2);
    }
}
