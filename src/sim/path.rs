//! Closed path the camera rides along
//!
//! A closed centripetal Catmull-Rom curve through a fixed set of control
//! points. Sampling is arc-length uniform: `point_at(0.5)` is halfway along
//! the loop by distance, not by control point index.

use glam::Vec3;

use crate::consts::PATH_ARC_DIVISIONS;
use crate::wrap_unit;

/// Control points of the default tunnel loop
///
/// A tilted, wobbling ring roughly 20 units across.
pub fn default_control_points() -> Vec<Vec3> {
    vec![
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(8.5, 1.2, -5.0),
        Vec3::new(5.0, 2.0, -8.8),
        Vec3::new(0.0, 1.4, -10.5),
        Vec3::new(-5.2, 0.2, -9.0),
        Vec3::new(-9.0, -1.0, -5.2),
        Vec3::new(-10.4, -1.6, 0.0),
        Vec3::new(-8.8, -1.2, 5.0),
        Vec3::new(-5.0, 0.0, 8.6),
        Vec3::new(0.0, 1.0, 10.2),
        Vec3::new(5.2, 0.8, 9.0),
        Vec3::new(8.8, 0.4, 5.0),
    ]
}

/// Immutable closed curve
#[derive(Debug, Clone)]
pub struct Path {
    points: Vec<Vec3>,
    /// Cumulative arc length at `i / PATH_ARC_DIVISIONS` of the raw parameter
    arc_lengths: Vec<f32>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new(default_control_points())
    }
}

impl Path {
    /// Build a closed path through `points`
    ///
    /// Fewer than two points produce a degenerate path that samples to the
    /// single point (or the origin when empty).
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut path = Self {
            points,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.compute_arc_lengths(PATH_ARC_DIVISIONS);
        path
    }

    /// Control points the curve passes through
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total length of the loop
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at normalized arc-length parameter `t`
    ///
    /// Any real `t` is accepted and wrapped into [0, 1), so `point_at(t)`
    /// and `point_at(t + 1.0)` name the same point.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = wrap_unit(t);
        self.raw_point(self.u_to_t(u))
    }

    /// Unit forward direction at `t`
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let delta = 1.0e-4;
        let a = self.point_at(t - delta);
        let b = self.point_at(t + delta);
        (b - a).normalize_or_zero()
    }

    /// Evenly spaced samples around the loop (first point not repeated)
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|i| self.point_at(i as f32 / count as f32))
            .collect()
    }

    /// Curve point at raw (non arc-length) parameter in [0, 1]
    fn raw_point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = n as f32 * t;
        let mut seg = p.floor() as isize;
        let weight = p - seg as f32;
        seg = seg.rem_euclid(n as isize);
        let seg = seg as usize;

        let p0 = self.points[(seg + n - 1) % n];
        let p1 = self.points[seg % n];
        let p2 = self.points[(seg + 1) % n];
        let p3 = self.points[(seg + 2) % n];

        // Centripetal knot spacing
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        if dt1 < 1.0e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1.0e-4 {
            dt0 = dt1;
        }
        if dt2 < 1.0e-4 {
            dt2 = dt1;
        }

        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        hermite(p1, p2, m1, m2, weight)
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.raw_point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let current = self.raw_point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        lengths
    }

    /// Map arc-length fraction `u` to the raw curve parameter
    fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let total = self.length();
        if lengths.len() < 2 || total <= 0.0 {
            return u;
        }

        let target = u * total;

        // Last index whose cumulative length is <= target
        let i = match lengths.partition_point(|&len| len <= target) {
            0 => 0,
            k => (k - 1).min(lengths.len() - 2),
        };

        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let frac = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (i as f32 + frac) / (lengths.len() - 1) as f32
    }
}

/// Cubic Hermite interpolation between `p1` and `p2`
#[inline]
fn hermite(p1: Vec3, p2: Vec3, m1: Vec3, m2: Vec3, t: f32) -> Vec3 {
    let c0 = p1;
    let c1 = m1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;
    c0 + t * (c1 + t * (c2 + t * c3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(radius: f32, n: usize) -> Path {
        let points = (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec3::new(radius * a.cos(), 0.0, radius * a.sin())
            })
            .collect();
        Path::new(points)
    }

    #[test]
    fn test_wrap_boundary_is_seamless() {
        let path = Path::default();
        let a = path.point_at(0.0);
        let b = path.point_at(1.0);
        assert_eq!(a, b);
        assert!(a.distance(path.point_at(0.999_99)) < 0.01);
    }

    #[test]
    fn test_passes_through_first_control_point() {
        let path = Path::default();
        assert!(path.point_at(0.0).distance(default_control_points()[0]) < 1e-4);
    }

    #[test]
    fn test_negative_parameter_wraps() {
        let path = Path::default();
        let a = path.point_at(-0.25);
        let b = path.point_at(0.75);
        assert!(a.distance(b) < 1e-3);
    }

    #[test]
    fn test_arc_length_uniform() {
        let path = Path::default();
        let samples = path.sample(100);
        let step = path.length() / 100.0;
        for w in samples.windows(2) {
            let d = w[0].distance(w[1]);
            // Chord vs arc and table quantization leave a little slack
            assert!((d - step).abs() < step * 0.1, "d={d} step={step}");
        }
    }

    #[test]
    fn test_circle_stays_near_radius() {
        let path = circle(20.0, 8);
        let expected = std::f32::consts::TAU * 20.0;
        assert!((path.length() - expected).abs() < expected * 0.02);
        for p in path.sample(64) {
            assert!((p.length() - 20.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_tangent_is_unit_and_forward() {
        let path = Path::default();
        let t = path.tangent_at(0.2);
        assert!((t.length() - 1.0).abs() < 1e-3);
        let ahead = path.point_at(0.21) - path.point_at(0.2);
        assert!(t.dot(ahead) > 0.0);
    }

    #[test]
    fn test_degenerate_paths() {
        assert_eq!(Path::new(Vec::new()).point_at(0.3), Vec3::ZERO);
        let single = Path::new(vec![Vec3::ONE]);
        assert_eq!(single.point_at(0.7), Vec3::ONE);
        assert_eq!(single.length(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_point_at_wraps(t in -4.0f32..4.0) {
            let path = Path::default();
            let a = path.point_at(t);
            let b = path.point_at(t + 1.0);
            prop_assert!(a.distance(b) < 1e-2);
        }

        #[test]
        fn prop_point_at_deterministic(t in -10.0f32..10.0) {
            let path = Path::default();
            prop_assert_eq!(path.point_at(t), path.point_at(t));
        }
    }
}
