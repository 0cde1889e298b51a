//! Game settings and tunables
//!
//! Loaded from an optional JSON file. Missing fields take their defaults, so
//! a file only needs the values it changes.

use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::sim::{AimController, CameraNavigator, ProjectileParams};

/// Errors from loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// All tunables of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for obstacle placement
    pub seed: u64,

    // === Tunnel ===
    pub tunnel_radius: f32,

    // === Obstacles ===
    pub obstacle_count: usize,
    /// Edge length of each obstacle cube
    pub obstacle_size: f32,
    /// Multiplier on the lateral (X/Z) jitter
    pub jitter_scale: f32,

    // === Camera ===
    /// Multiplier on raw elapsed milliseconds
    pub time_scale: f64,
    /// Scaled milliseconds per loop
    pub loop_duration_ms: f64,
    /// Fraction of the loop the camera looks ahead
    pub lookahead: f32,
    /// Far clip distance; also where shots that hit nothing detonate
    pub far_clip: f32,

    // === Aim ===
    pub aim_fudge: f32,
    pub aim_distance: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub impact_tolerance: f32,
    pub explode_scale_step: f32,
    pub explode_decay: f32,
    pub explode_threshold: f32,
    pub expired_scale: f32,
    /// Also sweep expired projectiles at the end of every tick
    pub sweep_each_tick: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            tunnel_radius: 0.65,

            obstacle_count: 55,
            obstacle_size: 0.075,
            jitter_scale: 1.0,

            time_scale: 0.1,
            loop_duration_ms: 10.0 * 1000.0,
            lookahead: 0.03,
            far_clip: 1000.0,

            aim_fudge: 0.75,
            aim_distance: 1.0,

            projectile_speed: 0.5,
            impact_tolerance: 0.5,
            explode_scale_step: 0.2,
            explode_decay: 0.85,
            explode_threshold: 0.01,
            expired_scale: 0.01,
            sweep_each_tick: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<FsPath>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        if !(self.tunnel_radius > 0.0) {
            return invalid("tunnel_radius", "must be positive");
        }
        if !(self.obstacle_size > 0.0) {
            return invalid("obstacle_size", "must be positive");
        }
        if !(self.jitter_scale >= 0.0) {
            return invalid("jitter_scale", "must not be negative");
        }
        if !(self.time_scale > 0.0) {
            return invalid("time_scale", "must be positive");
        }
        if !(self.loop_duration_ms > 0.0) {
            return invalid("loop_duration_ms", "must be positive");
        }
        if !(0.0..1.0).contains(&self.lookahead) || self.lookahead == 0.0 {
            return invalid("lookahead", "must be in (0, 1)");
        }
        if !(self.far_clip > 0.0) {
            return invalid("far_clip", "must be positive");
        }
        if !(self.aim_distance > 0.0) {
            return invalid("aim_distance", "must be positive");
        }
        if !(self.projectile_speed > 0.0) {
            return invalid("projectile_speed", "must be positive");
        }
        if !(self.impact_tolerance > 0.0) {
            return invalid("impact_tolerance", "must be positive");
        }
        if !(self.explode_scale_step >= 0.0) {
            return invalid("explode_scale_step", "must not be negative");
        }
        if !(self.explode_decay > 0.0 && self.explode_decay < 1.0) {
            return invalid("explode_decay", "must be in (0, 1)");
        }
        if !(self.explode_threshold > 0.0 && self.explode_threshold < 1.0) {
            return invalid("explode_threshold", "must be in (0, 1)");
        }
        Ok(())
    }

    pub fn projectile_params(&self) -> ProjectileParams {
        ProjectileParams {
            speed: self.projectile_speed,
            impact_tolerance: self.impact_tolerance,
            scale_step: self.explode_scale_step,
            decay: self.explode_decay,
            threshold: self.explode_threshold,
            expired_scale: self.expired_scale,
        }
    }

    pub fn navigator(&self) -> CameraNavigator {
        CameraNavigator {
            time_scale: self.time_scale,
            loop_duration_ms: self.loop_duration_ms,
            lookahead: self.lookahead,
        }
    }

    pub fn aim_controller(&self) -> AimController {
        AimController::new(self.aim_fudge, self.aim_distance)
    }
}
