use glam::Vec3;

use super::curve::Curve;

/// An ordered sequence of curves sampled as one continuous path.
#[derive(Debug, Clone, Default)]
pub struct CurvePath {
    curves: Vec<Curve>,
    // Cumulative arc lengths, rebuilt on push.
    lengths: Vec<f32>,
}

impl CurvePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, curve: Curve) {
        let total = self.length() + curve.length();
        self.curves.push(curve);
        self.lengths.push(total);
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at arc-length fraction `t`. `None` for an empty path.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Option<Vec3> {
        let first = self.curves.first()?;
        let total = self.length();
        if total <= f32::EPSILON {
            return Some(first.point_at(0.0));
        }

        let d = t.clamp(0.0, 1.0) * total;
        let mut start = 0.0;
        for (curve, &end) in self.curves.iter().zip(&self.lengths) {
            if end >= d {
                let span = end - start;
                let u = if span <= f32::EPSILON { 0.0 } else { (d - start) / span };
                return Some(curve.point_at(u));
            }
            start = end;
        }
        self.curves.last().map(|c| c.point_at(1.0))
    }

    /// Unit tangent at `t`, by central difference. Zero when the path does
    /// not move around `t`.
    #[must_use]
    pub fn tangent_at(&self, t: f32) -> Option<Vec3> {
        const DELTA: f32 = 1e-4;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        let a = self.point_at(t1)?;
        let b = self.point_at(t2)?;
        Some((b - a).normalize_or_zero())
    }

    /// `divisions + 1` points evenly spaced by arc length.
    #[must_use]
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .filter_map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}

impl FromIterator<Curve> for CurvePath {
    fn from_iter<I: IntoIterator<Item = Curve>>(iter: I) -> Self {
        let mut path = CurvePath::new();
        for curve in iter {
            path.push(curve);
        }
        path
    }
}
