//! Curve/Path Builder
//!
//! Turns a descriptor's ordered `path` segments into a [`CurvePath`] for tube
//! sweeps, and into a 2D profile for lathe revolutions.
//!
//! # Segment rules
//!
//! | type     | emits                                                      |
//! |----------|------------------------------------------------------------|
//! | `quad`   | quadratic bezier from the current point to the next point  |
//! | `cubic`  | cubic bezier; degenerate unless `cp` lists two points      |
//! | `spline` | one Catmull-Rom curve per run of consecutive spline points |
//! | other    | a stationary point curve at the current point              |
//!
//! "Next" is the following segment's point; the last segment uses its own
//! point, so a trailing quad or cubic collapses onto itself.

pub mod curve;
pub mod path;

use glam::{Vec2, Vec3};

pub use curve::Curve;
pub use path::CurvePath;

use crate::descriptor::{PathSegment, SegmentKind};

/// Builds a curve path from ordered segments. An empty slice yields an empty
/// path.
#[must_use]
pub fn build_curve_path(segments: &[PathSegment]) -> CurvePath {
    let mut curve_path = CurvePath::new();
    let mut spline_points: Vec<Vec3> = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        let current = segment.point();
        let next_segment = segments.get(i + 1);
        let next = next_segment.map_or(current, PathSegment::point);

        match segment.kind {
            SegmentKind::Quad => {
                let cp = segment
                    .cp
                    .as_ref()
                    .and_then(|cp| cp.first())
                    .unwrap_or(next);
                curve_path.push(Curve::QuadraticBezier(current, cp, next));
            }
            SegmentKind::Cubic => {
                let curve = match segment.cp.as_ref().and_then(|cp| cp.pair()) {
                    Some((cp1, cp2)) => Curve::CubicBezier(current, cp1, cp2, next),
                    None => Curve::CubicBezier(current, current, next, next),
                };
                curve_path.push(curve);
            }
            SegmentKind::Spline => {
                spline_points.push(current);
                let continues = next_segment.is_some_and(|s| s.kind == SegmentKind::Spline);
                if !continues {
                    curve_path.push(Curve::CatmullRom(std::mem::take(&mut spline_points)));
                }
            }
            SegmentKind::Point => curve_path.push(Curve::Point(current)),
        }
    }

    log::trace!("Built curve path: {} segments -> {} curves", segments.len(), curve_path.len());
    curve_path
}

/// Projects path points onto the XY plane for a lathe profile.
#[must_use]
pub fn lathe_profile(segments: &[PathSegment]) -> Vec<Vec2> {
    segments.iter().map(PathSegment::planar).collect()
}

/// Generated lathe profile used when a descriptor supplies no path:
/// `size[1]` points, `x = sin(i * angle) * size[0]`, `y = (i - n/2) * 2 * size[1]`.
#[must_use]
pub fn generated_lathe_profile(angle_degrees: f32, size: [f32; 3]) -> Vec<Vec2> {
    let angle = angle_degrees.to_radians();
    let length = size[1].max(0.0).floor() as usize;
    let radius = if size[0] > 0.0 { size[0] } else { 1.0 };

    (0..length)
        .map(|i| {
            let i = i as f32;
            Vec2::new(
                (i * angle).sin() * radius,
                (i - length as f32 / 2.0) * 2.0 * size[1],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_splines_share_one_curve() {
        let segments = vec![
            PathSegment::new(SegmentKind::Spline, 0.0, 0.0, 0.0),
            PathSegment::new(SegmentKind::Spline, 1.0, 1.0, 0.0),
            PathSegment::new(SegmentKind::Spline, 2.0, 0.0, 0.0),
        ];
        let path = build_curve_path(&segments);
        assert_eq!(path.len(), 1);
        assert!(matches!(&path.curves()[0], Curve::CatmullRom(points) if points.len() == 3));
    }

    #[test]
    fn unknown_segment_is_stationary() {
        let segments = vec![PathSegment::new(SegmentKind::Point, 4.0, 5.0, 6.0)];
        let path = build_curve_path(&segments);
        assert_eq!(path.point_at(0.7), Some(Vec3::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn generated_profile_has_one_point_per_unit_height() {
        let profile = generated_lathe_profile(30.0, [20.0, 20.0, 0.0]);
        assert_eq!(profile.len(), 20);
        assert_eq!(profile[0], Vec2::new(0.0, -400.0));
    }
}
