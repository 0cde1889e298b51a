//! Tunnel wall as a signed distance field
//!
//! The tunnel is a tube of constant radius around the path. Distance to the
//! wall is measured against a dense polyline sampling of the centerline, and
//! rays are sphere-traced from the inside until they touch the wall.

use glam::Vec3;

use super::path::Path;
use crate::consts::{RAYMARCH_HIT_EPSILON, RAYMARCH_MAX_STEPS, TUNNEL_SAMPLES};

/// Distance from `p` to the segment `a`-`b`
#[inline]
pub fn sd_segment(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1.0e-12 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Result of a ray march against the wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Distance travelled along the ray
    pub distance: f32,
    /// World position on (within epsilon of) the wall
    pub point: Vec3,
}

/// The tube surrounding the path
#[derive(Debug, Clone)]
pub struct TunnelBoundary {
    /// Closed polyline approximating the centerline
    centerline: Vec<Vec3>,
    pub radius: f32,
}

impl TunnelBoundary {
    pub fn new(path: &Path, radius: f32) -> Self {
        Self::with_samples(path, radius, TUNNEL_SAMPLES)
    }

    pub fn with_samples(path: &Path, radius: f32, samples: usize) -> Self {
        Self {
            centerline: path.sample(samples.max(2)),
            radius,
        }
    }

    /// Unsigned distance from `p` to the tunnel centerline
    pub fn distance_to_centerline(&self, p: Vec3) -> f32 {
        let n = self.centerline.len();
        (0..n)
            .map(|i| sd_segment(p, self.centerline[i], self.centerline[(i + 1) % n]))
            .fold(f32::MAX, f32::min)
    }

    /// Signed distance to the wall, positive inside the tube
    ///
    /// The bound is conservative: a sphere of this radius around `p` never
    /// crosses the wall, which is what sphere tracing needs.
    #[inline]
    pub fn distance_inside(&self, p: Vec3) -> f32 {
        self.radius - self.distance_to_centerline(p)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.distance_inside(p) > 0.0
    }

    /// March a ray from inside the tube to the wall
    ///
    /// Only the inner face counts: a ray starting outside the tube never hits.
    /// `dir` must be normalized. Returns `None` when the wall is farther than
    /// `max_distance` or the step budget runs out.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<WallHit> {
        if !self.contains(origin) {
            return None;
        }

        let mut t = 0.0;
        for _ in 0..RAYMARCH_MAX_STEPS {
            let p = origin + dir * t;
            let d = self.distance_inside(p);

            if d < RAYMARCH_HIT_EPSILON {
                return Some(WallHit { distance: t, point: p });
            }

            t += d;
            if t > max_distance {
                break;
            }
        }

        None
    }
}
