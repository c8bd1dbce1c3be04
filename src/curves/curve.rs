use glam::Vec3;

use crate::descriptor::CurveFn;

/// Samples used when estimating arc length.
pub const LENGTH_DIVISIONS: usize = 200;

/// A single parametric 3D curve, `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub enum Curve {
    /// Degenerate curve that stays at one point.
    Point(Vec3),
    Line(Vec3, Vec3),
    /// Start, control, end.
    QuadraticBezier(Vec3, Vec3, Vec3),
    /// Start, control 1, control 2, end.
    CubicBezier(Vec3, Vec3, Vec3, Vec3),
    /// Centripetal Catmull-Rom spline through the points.
    CatmullRom(Vec<Vec3>),
    /// Runtime sampled curve.
    Custom(CurveFn),
}

impl Curve {
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Point(p) => *p,
            Curve::Line(a, b) => a.lerp(*b, t),
            Curve::QuadraticBezier(p0, p1, p2) => {
                let k = 1.0 - t;
                *p0 * (k * k) + *p1 * (2.0 * k * t) + *p2 * (t * t)
            }
            Curve::CubicBezier(p0, p1, p2, p3) => {
                let k = 1.0 - t;
                *p0 * (k * k * k) + *p1 * (3.0 * k * k * t) + *p2 * (3.0 * k * t * t) + *p3 * (t * t * t)
            }
            Curve::CatmullRom(points) => catmull_rom_point(points, t),
            Curve::Custom(f) => f.sample(t),
        }
    }

    /// Chord-length approximation of the arc length.
    #[must_use]
    pub fn length(&self) -> f32 {
        match self {
            Curve::Point(_) => 0.0,
            Curve::Line(a, b) => a.distance(*b),
            _ => {
                let mut last = self.point_at(0.0);
                let mut sum = 0.0;
                for i in 1..=LENGTH_DIVISIONS {
                    let p = self.point_at(i as f32 / LENGTH_DIVISIONS as f32);
                    sum += p.distance(last);
                    last = p;
                }
                sum
            }
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Curve::Point(_))
    }
}

fn catmull_rom_point(points: &[Vec3], t: f32) -> Vec3 {
    let l = points.len();
    match l {
        0 => return Vec3::ZERO,
        1 => return points[0],
        _ => {}
    }

    let p = (l - 1) as f32 * t;
    let mut int_point = p.floor() as usize;
    let mut weight = p - int_point as f32;
    if int_point >= l - 1 {
        int_point = l - 2;
        weight = 1.0;
    }

    // Reflected end points stand in for the missing neighbours.
    let p0 = if int_point > 0 {
        points[int_point - 1]
    } else {
        points[0] * 2.0 - points[1]
    };
    let p1 = points[int_point];
    let p2 = points[int_point + 1];
    let p3 = if int_point + 2 < l {
        points[int_point + 2]
    } else {
        points[l - 1] * 2.0 - points[l - 2]
    };

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    let c0 = p1;
    let c1 = t1;
    let c2 = p1 * -3.0 + p2 * 3.0 - t1 * 2.0 - t2;
    let c3 = p1 * 2.0 - p2 * 2.0 + t1 + t2;

    let w = weight;
    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catmull_rom_passes_through_control_points() {
        let points = vec![Vec3::ZERO, Vec3::new(10.0, 5.0, 0.0), Vec3::new(20.0, 0.0, 3.0)];
        let curve = Curve::CatmullRom(points.clone());
        assert!(curve.point_at(0.0).distance(points[0]) < 1e-4);
        assert!(curve.point_at(0.5).distance(points[1]) < 1e-4);
        assert!(curve.point_at(1.0).distance(points[2]) < 1e-4);
    }

    #[test]
    fn quadratic_hits_endpoints() {
        let curve = Curve::QuadraticBezier(Vec3::ZERO, Vec3::Y * 10.0, Vec3::X * 10.0);
        assert_eq!(curve.point_at(0.0), Vec3::ZERO);
        assert_eq!(curve.point_at(1.0), Vec3::X * 10.0);
    }
}
