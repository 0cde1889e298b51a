//! Fire-time ray resolution
//!
//! One ray per shot, from the camera through the aim point. Candidates are
//! every targetable obstacle (as an oriented cube) and the tunnel wall; the
//! nearest positive hit wins.

use glam::{Quat, Vec3};

use super::obstacles::{ObstacleField, ObstacleId};
use super::sdf::TunnelBoundary;
use crate::Rgb;
use crate::consts::{MIN_AIM_LENGTH, TUNNEL_COLOR};

/// A ray with unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Ray from `origin` through `target`
    ///
    /// Returns `None` when the two points coincide and no direction exists.
    pub fn through(origin: Vec3, target: Vec3) -> Option<Self> {
        let delta = target - origin;
        if delta.length() < MIN_AIM_LENGTH {
            return None;
        }
        Some(Self {
            origin,
            dir: delta.normalize(),
        })
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Resolved impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    pub distance: f32,
    pub color: Rgb,
    /// Set when the hit surface belongs to an obstacle
    pub obstacle: Option<ObstacleId>,
}

/// Distance to the first positive intersection of `ray` with a cube
///
/// The cube is centered at `center`, rotated by `rotation`, with half edge
/// `half_extent`. A ray starting inside the cube reports its exit point.
pub fn ray_cube(ray: &Ray, center: Vec3, rotation: Quat, half_extent: f32) -> Option<f32> {
    // Move the ray into the cube's local frame, where the slab test is axis aligned
    let inv = rotation.inverse();
    let origin = inv * (ray.origin - center);
    let dir = inv * ray.dir;

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < 1.0e-9 {
            // Parallel to this slab: must already be between its planes
            if o < -half_extent || o > half_extent {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t0 = (-half_extent - o) * inv_d;
        let mut t1 = (half_extent - o) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(if t_min > 0.0 { t_min } else { t_max })
}

/// Nearest hit along `ray` among obstacles and the tunnel wall
///
/// Obstacles already claimed by an in-flight projectile are skipped.
/// `max_distance` bounds the wall march.
pub fn resolve_ray(
    ray: &Ray,
    field: &ObstacleField,
    tunnel: &TunnelBoundary,
    max_distance: f32,
) -> Option<Hit> {
    let half = field.half_extent();

    let obstacle_hit = field
        .targetable()
        .filter_map(|o| {
            ray_cube(ray, o.position, o.orientation(), half)
                .filter(|&t| t > 0.0)
                .map(|t| Hit {
                    point: ray.at(t),
                    distance: t,
                    color: o.color,
                    obstacle: Some(o.id),
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance));

    let wall_hit = tunnel
        .raycast(ray.origin, ray.dir, max_distance)
        .filter(|w| w.distance > 0.0)
        .map(|w| Hit {
            point: w.point,
            distance: w.distance,
            color: TUNNEL_COLOR,
            obstacle: None,
        });

    match (obstacle_hit, wall_hit) {
        (Some(o), Some(w)) => Some(if o.distance <= w.distance { o } else { w }),
        (o, w) => o.or(w),
    }
}

/// Cast from `origin` through `aim_point` and return the nearest hit
///
/// Returns `None` for a degenerate direction as well as for a clean miss.
pub fn resolve(
    origin: Vec3,
    aim_point: Vec3,
    field: &ObstacleField,
    tunnel: &TunnelBoundary,
    max_distance: f32,
) -> Option<Hit> {
    let ray = Ray::through(origin, aim_point)?;
    resolve_ray(&ray, field, tunnel, max_distance)
}
