//! Tunnel Rail - core of a first-person rail shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path, camera, aim, obstacles, projectiles)
//! - `renderer`: Renderer-facing snapshot types (no GPU code)
//! - `settings`: Tunables loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Linear RGB color, each channel in [0, 1]
pub type Rgb = [f32; 3];

/// Fixed constants that are not worth tuning
pub mod consts {
    use crate::Rgb;

    /// Frame rate the per-frame constants were tuned against
    pub const FRAME_HZ: f64 = 60.0;
    /// Milliseconds per frame at `FRAME_HZ`
    pub const FRAME_MS: f64 = 1000.0 / FRAME_HZ;

    /// Divisions of the arc-length lookup table
    pub const PATH_ARC_DIVISIONS: usize = 200;
    /// Polyline samples used for the tunnel distance field
    pub const TUNNEL_SAMPLES: usize = 400;
    /// Ray march step limit against the tunnel wall
    pub const RAYMARCH_MAX_STEPS: usize = 256;
    /// Distance below which the ray march reports a wall hit
    pub const RAYMARCH_HIT_EPSILON: f32 = 1.0e-3;

    /// Below this length a fire direction is considered degenerate
    pub const MIN_AIM_LENGTH: f32 = 1.0e-6;

    /// Tunnel wireframe color (0x00ccff)
    pub const TUNNEL_COLOR: Rgb = [0.0, 0.8, 1.0];
    /// Projectile color while flying (0xffcc00)
    pub const PROJECTILE_COLOR: Rgb = [1.0, 0.8, 0.0];

    /// Obstacle hue start; the placement parameter is added on top
    pub const OBSTACLE_HUE_BASE: f32 = 0.7;
    pub const OBSTACLE_SATURATION: f32 = 1.0;
    pub const OBSTACLE_LIGHTNESS: f32 = 0.5;

    /// Random per-slot offset as a fraction of the full loop
    pub const OBSTACLE_SLOT_JITTER: f32 = 0.1;
    /// Lateral jitter is `rand - JITTER_BIAS`, skewed slightly positive
    pub const JITTER_BIAS: f32 = 0.4;
}

/// Wrap any real number into [0, 1)
///
/// Uses a Euclidean remainder so negative inputs land in range, and clamps
/// the rounding case where a tiny negative input would come back as 1.0.
#[inline]
pub fn wrap_unit(t: f32) -> f32 {
    let r = t.rem_euclid(1.0);
    if r >= 1.0 { 0.0 } else { r }
}

/// Convert HSL (all in [0, 1], hue wrapped) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = wrap_unit(h);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Convert a packed 0xRRGGBB value to RGB
#[inline]
pub fn rgb_from_hex(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
