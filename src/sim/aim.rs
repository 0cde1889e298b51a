//! Pointer-to-aim-point mapping and the reticle
//!
//! The pointer is normalized to [-1, 1] (Y up), scaled by a fudge factor
//! (X also by aspect ratio) and placed one unit in front of the camera.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::camera::CameraPose;

/// Raw pointer position in device pixels plus the viewport it was taken in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerSample {
    /// Pointer at the viewport center
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            x: width * 0.5,
            y: height * 0.5,
            width,
            height,
        }
    }

    /// Normalized device coordinates in [-1, 1], Y up
    ///
    /// An empty viewport maps to the center.
    pub fn ndc(&self) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (self.x / self.width) * 2.0 - 1.0,
            -(self.y / self.height) * 2.0 + 1.0,
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// Maps pointer samples to a camera-local aim point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimController {
    /// Bounds the aim cone
    pub fudge: f32,
    /// Forward distance of the aim plane
    pub distance: f32,
    /// Latest camera-local aim point
    local: Vec3,
}

impl Default for AimController {
    fn default() -> Self {
        Self::new(0.75, 1.0)
    }
}

impl AimController {
    pub fn new(fudge: f32, distance: f32) -> Self {
        Self {
            fudge,
            distance,
            local: Vec3::new(0.0, 0.0, -distance),
        }
    }

    /// Camera-local aim point for normalized pointer coordinates
    pub fn map_pointer(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Vec3 {
        Vec3::new(
            ndc_x * self.fudge * aspect,
            ndc_y * self.fudge,
            -self.distance,
        )
    }

    /// Replace the stored aim with the latest pointer sample
    pub fn update(&mut self, sample: &PointerSample) {
        let ndc = sample.ndc();
        self.local = self.map_pointer(ndc.x, ndc.y, sample.aspect());
    }

    /// Latest camera-local aim point
    pub fn local(&self) -> Vec3 {
        self.local
    }

    /// Latest aim point in world space for the given camera pose
    pub fn world_point(&self, pose: &CameraPose) -> Vec3 {
        pose.local_to_world(self.local)
    }
}

/// Crosshair made of four short ticks around the aim point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reticle {
    pub inner: f32,
    pub outer: f32,
}

impl Default for Reticle {
    fn default() -> Self {
        Self {
            inner: 0.02,
            outer: 0.05,
        }
    }
}

impl Reticle {
    /// Tick segments in camera space, centered on `center`
    pub fn segments_local(&self, center: Vec3) -> [[Vec3; 2]; 4] {
        let tick_outer = Vec3::new(0.0, self.outer, 0.0);
        let tick_inner = Vec3::new(0.0, self.inner, 0.0);
        std::array::from_fn(|i| {
            let rot = Quat::from_rotation_z(i as f32 * FRAC_PI_2);
            [center + rot * tick_outer, center + rot * tick_inner]
        })
    }

    /// Tick segments in world space
    pub fn segments_world(&self, aim: &AimController, pose: &CameraPose) -> [[Vec3; 2]; 4] {
        self.segments_local(aim.local())
            .map(|[a, b]| [pose.local_to_world(a), pose.local_to_world(b)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let s = PointerSample { x: 0.0, y: 0.0, width: 800.0, height: 600.0 };
        assert_eq!(s.ndc(), Vec2::new(-1.0, 1.0));

        let s = PointerSample { x: 800.0, y: 600.0, width: 800.0, height: 600.0 };
        assert_eq!(s.ndc(), Vec2::new(1.0, -1.0));

        assert_eq!(PointerSample::centered(800.0, 600.0).ndc(), Vec2::ZERO);
    }

    #[test]
    fn test_empty_viewport_is_centered() {
        let s = PointerSample { x: 10.0, y: 10.0, width: 0.0, height: 0.0 };
        assert_eq!(s.ndc(), Vec2::ZERO);
        assert_eq!(s.aspect(), 1.0);
    }

    #[test]
    fn test_map_pointer_fudge_and_aspect() {
        let aim = AimController::default();
        let p = aim.map_pointer(1.0, 1.0, 2.0);
        assert!((p.x - 1.5).abs() < 1e-6);
        assert!((p.y - 0.75).abs() < 1e-6);
        assert_eq!(p.z, -1.0);
    }

    #[test]
    fn test_update_replaces_aim() {
        let mut aim = AimController::default();
        assert_eq!(aim.local(), Vec3::new(0.0, 0.0, -1.0));

        aim.update(&PointerSample { x: 800.0, y: 300.0, width: 800.0, height: 600.0 });
        let expected_x = 1.0 * 0.75 * (800.0 / 600.0);
        assert!((aim.local().x - expected_x).abs() < 1e-5);
        assert!(aim.local().y.abs() < 1e-6);

        aim.update(&PointerSample::centered(800.0, 600.0));
        assert_eq!(aim.local(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_world_point_is_one_unit_ahead() {
        let aim = AimController::default();
        let pose = CameraPose {
            position: Vec3::new(5.0, 0.0, 0.0),
            look_at: Vec3::new(5.0, 0.0, -10.0),
        };
        assert!(aim.world_point(&pose).distance(Vec3::new(5.0, 0.0, -1.0)) < 1e-5);
    }

    #[test]
    fn test_reticle_ticks() {
        let reticle = Reticle::default();
        let segs = reticle.segments_local(Vec3::new(0.0, 0.0, -1.0));

        // First tick points straight up
        assert!(segs[0][0].distance(Vec3::new(0.0, 0.05, -1.0)) < 1e-6);
        assert!(segs[0][1].distance(Vec3::new(0.0, 0.02, -1.0)) < 1e-6);
        // Second is rotated a quarter turn counter-clockwise
        assert!(segs[1][0].distance(Vec3::new(-0.05, 0.0, -1.0)) < 1e-6);
        for [a, b] in segs {
            assert_eq!(a.z, -1.0);
            assert_eq!(b.z, -1.0);
        }
    }
}
