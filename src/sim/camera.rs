//! Path-following camera
//!
//! The camera position is a pure function of elapsed time: time is dilated,
//! folded into one loop duration, and used as the path parameter. The view
//! direction comes from a point a fixed fraction further along the path.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::wrap_unit;

/// World up used to orient the camera
pub const CAMERA_UP: Vec3 = Vec3::Y;

/// Camera position and look-at target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
        }
    }
}

impl CameraPose {
    /// Unit view direction (camera-local -Z in world space)
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Camera-to-world rotation, right-handed, looking down local -Z
    pub fn rotation(&self) -> Quat {
        let forward = self.forward();
        // Fall back to +Z as up when looking straight along the world up
        let up = if forward.cross(CAMERA_UP).length_squared() < 1.0e-8 {
            Vec3::Z
        } else {
            CAMERA_UP
        };
        let right = forward.cross(up).normalize();
        let true_up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward))
    }

    /// Transform a camera-local point to world space
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation() * local
    }
}

/// Maps elapsed time to a pose on the path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraNavigator {
    /// Multiplier applied to raw elapsed milliseconds
    pub time_scale: f64,
    /// Scaled milliseconds for one full loop
    pub loop_duration_ms: f64,
    /// Fraction of the loop the camera looks ahead
    pub lookahead: f32,
}

impl Default for CameraNavigator {
    fn default() -> Self {
        Self {
            time_scale: 0.1,
            loop_duration_ms: 10.0 * 1000.0,
            lookahead: 0.03,
        }
    }
}

impl CameraNavigator {
    /// Path parameter in [0, 1) for raw elapsed milliseconds
    pub fn path_param(&self, elapsed_ms: f64) -> f32 {
        if self.loop_duration_ms <= 0.0 {
            return 0.0;
        }
        let scaled = elapsed_ms * self.time_scale;
        let p = scaled.rem_euclid(self.loop_duration_ms) / self.loop_duration_ms;
        wrap_unit(p as f32)
    }

    /// Camera pose for raw elapsed milliseconds
    pub fn advance(&self, path: &Path, elapsed_ms: f64) -> CameraPose {
        let p = self.path_param(elapsed_ms);
        CameraPose {
            position: path.point_at(p),
            look_at: path.point_at(wrap_unit(p + self.lookahead)),
        }
    }

    /// Raw elapsed milliseconds for one trip around the loop
    pub fn raw_loop_ms(&self) -> f64 {
        self.loop_duration_ms / self.time_scale
    }
}
