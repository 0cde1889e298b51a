//! Projectile record and its per-frame state machine
//!
//! Flying -> Exploding -> Expired, never backwards. The impact point is fixed
//! at fire time; flight is a straight line toward it at constant speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleId;
use crate::Rgb;
use crate::consts::PROJECTILE_COLOR;

/// Stable projectile handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectileState {
    /// Travelling toward the impact point
    Flying,
    /// Growing and fading at the impact point
    Exploding,
    /// Finished; waiting to be swept from the active list
    Expired,
}

/// Per-frame motion and explosion constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Distance covered per frame while flying
    pub speed: f32,
    /// Distance to the impact point that counts as arrival
    pub impact_tolerance: f32,
    /// Scale added per exploding frame
    pub scale_step: f32,
    /// Opacity multiplier per exploding frame
    pub decay: f32,
    /// Opacity at or below which the explosion ends
    pub threshold: f32,
    /// Scale left on an expired projectile
    pub expired_scale: f32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            speed: 0.5,
            impact_tolerance: 0.5,
            scale_step: 0.2,
            decay: 0.85,
            threshold: 0.01,
            expired_scale: 0.01,
        }
    }
}

/// Emitted on the frame a projectile reaches its impact point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detonation {
    /// Obstacle to destroy, if the shot hit one
    pub obstacle: Option<ObstacleId>,
}

/// A single shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    /// Displacement applied each flying frame
    pub velocity: Vec3,
    pub impact_point: Vec3,
    pub impact_color: Rgb,
    /// Obstacle claimed at fire time
    pub target: Option<ObstacleId>,
    pub state: ProjectileState,
    pub scale: f32,
    pub opacity: f32,
    /// Current display color
    pub color: Rgb,
}

impl Projectile {
    /// Spawn at `origin` heading for `impact_point`
    pub fn new(
        id: ProjectileId,
        origin: Vec3,
        impact_point: Vec3,
        impact_color: Rgb,
        target: Option<ObstacleId>,
        speed: f32,
    ) -> Self {
        let velocity = (impact_point - origin).normalize_or_zero() * speed;
        Self {
            id,
            position: origin,
            velocity,
            impact_point,
            impact_color,
            target,
            state: ProjectileState::Flying,
            scale: 1.0,
            opacity: 1.0,
            color: PROJECTILE_COLOR,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != ProjectileState::Expired
    }

    /// Advance one frame
    ///
    /// Returns a [`Detonation`] on the single frame the projectile switches
    /// from flying to exploding; the caller applies it to the obstacle field.
    pub fn advance(&mut self, params: &ProjectileParams) -> Option<Detonation> {
        match self.state {
            ProjectileState::Flying => {
                self.position += self.velocity;

                // A fast shot can step over the tolerance sphere; passing the
                // impact point counts as arrival too
                let to_impact = self.impact_point - self.position;
                let arrived = to_impact.length() < params.impact_tolerance
                    || to_impact.dot(self.velocity) < 0.0;

                if arrived {
                    self.position = self.impact_point;
                    self.color = self.impact_color;
                    self.state = ProjectileState::Exploding;
                    return Some(Detonation {
                        obstacle: self.target,
                    });
                }
                None
            }
            ProjectileState::Exploding => {
                if self.opacity > params.threshold {
                    self.scale += params.scale_step;
                    self.opacity *= params.decay;
                }
                if self.opacity <= params.threshold {
                    self.opacity = 0.0;
                    self.scale = params.expired_scale;
                    self.state = ProjectileState::Expired;
                }
                None
            }
            ProjectileState::Expired => None,
        }
    }
}
