//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-based stepping only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aim;
pub mod camera;
pub mod collision;
pub mod obstacles;
pub mod path;
pub mod projectile;
pub mod sdf;
pub mod state;
pub mod tick;

pub use aim::{AimController, PointerSample, Reticle};
pub use camera::{CameraNavigator, CameraPose};
pub use collision::{Hit, Ray, resolve, resolve_ray};
pub use obstacles::{Obstacle, ObstacleField, ObstacleId, WireframeProxy};
pub use path::Path;
pub use projectile::{Detonation, Projectile, ProjectileId, ProjectileParams, ProjectileState};
pub use sdf::{TunnelBoundary, WallHit};
pub use state::{SceneEvent, World};
pub use tick::{TickInput, tick};
