//! Per-frame simulation tick
//!
//! Order within a tick is fixed: camera, then aim, then an optional fire,
//! then the projectile pass. A shot always uses this frame's aim.

use super::aim::PointerSample;
use super::state::World;

/// Input for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw elapsed milliseconds since start (monotonic)
    pub elapsed_ms: f64,
    /// Latest pointer sample, if the pointer moved or the viewport changed
    pub pointer: Option<PointerSample>,
    /// Fire trigger (click)
    pub fire: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) {
    world.frame += 1;

    world.camera = world.navigator.advance(&world.path, input.elapsed_ms);

    if let Some(sample) = &input.pointer {
        world.aim.update(sample);
    }
    world.aim_point = world.aim.world_point(&world.camera);

    if input.fire {
        world.fire();
    }

    world.advance_projectiles();

    if world.settings.sweep_each_tick {
        world.sweep_expired();
    }
}
