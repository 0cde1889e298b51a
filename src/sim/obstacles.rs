//! Obstacle field scattered along the path
//!
//! Obstacles are small rotated cubes placed once at world creation. Each has
//! a wireframe proxy that the renderer draws; the solid cube itself is only
//! a hit target.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::consts::*;
use crate::{Rgb, hsl_to_rgb, wrap_unit};

/// Stable handle to an obstacle (its index in the field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Wireframe visual coincident with an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireframeProxy {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl WireframeProxy {
    /// Hide the proxy by shrinking it to nothing
    pub fn collapse(&mut self) {
        self.scale = 0.0;
    }

    pub fn is_collapsed(&self) -> bool {
        self.scale == 0.0
    }
}

/// A single cube target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub position: Vec3,
    /// Euler angles (XYZ order, radians)
    pub rotation: Vec3,
    pub color: Rgb,
    /// Path parameter the obstacle was placed at
    pub placement: f32,
    /// Cleared once, when the projectile that hit it detonates
    pub alive: bool,
    /// Set at fire time when a projectile commits to this obstacle
    pub claimed: bool,
    pub proxy: WireframeProxy,
}

impl Obstacle {
    pub fn new(id: ObstacleId, position: Vec3, rotation: Vec3, color: Rgb, placement: f32) -> Self {
        Self {
            id,
            position,
            rotation,
            color,
            placement,
            alive: true,
            claimed: false,
            proxy: WireframeProxy {
                position,
                rotation,
                scale: 1.0,
            },
        }
    }

    /// Orientation as a quaternion
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Whether a newly fired ray may still select this obstacle
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.alive && !self.claimed
    }

    /// Mark destroyed and collapse the proxy
    ///
    /// Returns `true` only on the call that actually flips `alive`.
    pub fn destroy(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.proxy.collapse();
        true
    }
}

/// Place `count` obstacles along `path`
///
/// Slot `i` sits at `i / count` plus up to a tenth of the loop, wrapped.
/// Only the X and Z axes are jittered so obstacles keep to the tunnel's
/// general line. Hue follows the placement parameter, giving a color
/// gradient around the loop.
pub fn generate<R: Rng>(
    count: usize,
    jitter_scale: f32,
    path: &Path,
    rng: &mut R,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(count);

    for i in 0..count {
        let p = wrap_unit(i as f32 / count as f32 + rng.random::<f32>() * OBSTACLE_SLOT_JITTER);
        let mut position = path.point_at(p);
        let color = hsl_to_rgb(OBSTACLE_HUE_BASE + p, OBSTACLE_SATURATION, OBSTACLE_LIGHTNESS);

        position.x += (rng.random::<f32>() - JITTER_BIAS) * jitter_scale;
        position.z += (rng.random::<f32>() - JITTER_BIAS) * jitter_scale;

        let rotation = Vec3::new(
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
        );

        obstacles.push(Obstacle::new(ObstacleId(i as u32), position, rotation, color, p));
    }

    obstacles
}

/// All obstacles plus their shared cube size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Edge length of every cube
    pub size: f32,
}

impl ObstacleField {
    /// Wrap pre-built obstacles, re-numbering ids to match their index
    pub fn new(mut obstacles: Vec<Obstacle>, size: f32) -> Self {
        for (i, obstacle) in obstacles.iter_mut().enumerate() {
            obstacle.id = ObstacleId(i as u32);
        }
        Self { obstacles, size }
    }

    pub fn generate<R: Rng>(
        count: usize,
        jitter_scale: f32,
        size: f32,
        path: &Path,
        rng: &mut R,
    ) -> Self {
        let field = Self::new(generate(count, jitter_scale, path, rng), size);
        log::info!("Generated {} obstacles along a {:.1} unit path", field.len(), path.length());
        field
    }

    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size * 0.5
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacles a fresh ray may hit
    pub fn targetable(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_targetable())
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(id.0 as usize)
    }

    pub fn alive_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.alive).count()
    }
}
