//! Tunnel Rail headless driver
//!
//! Runs a scripted session at 60 Hz without a window: the pointer sweeps in
//! a slow circle and a shot is fired every half second. Useful for checking
//! a settings file and for watching the simulation through the log.
//!
//! Usage: `tunnel-rail [settings.json] [frames]`

use tunnel_rail::Settings;
use tunnel_rail::consts::FRAME_MS;
use tunnel_rail::renderer::RenderFrame;
use tunnel_rail::sim::{PointerSample, SceneEvent, TickInput, World, tick};

const VIEWPORT: (f32, f32) = (1280.0, 720.0);
const DEFAULT_FRAMES: u64 = 60 * 30;
const FIRE_EVERY: u64 = 30;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Tunnel Rail (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut world = World::new(settings);
    let mut shots = 0u32;
    let mut kills = 0u32;
    let mut wall_hits = 0u32;

    for n in 0..frames {
        let angle = n as f32 * 0.02;
        let (w, h) = VIEWPORT;
        let pointer = PointerSample {
            x: w * (0.5 + 0.3 * angle.cos()),
            y: h * (0.5 + 0.3 * angle.sin()),
            width: w,
            height: h,
        };
        let input = TickInput {
            elapsed_ms: n as f64 * FRAME_MS,
            pointer: Some(pointer),
            fire: n % FIRE_EVERY == 0,
        };
        tick(&mut world, &input);

        for event in world.drain_events() {
            match event {
                SceneEvent::ProjectileSpawned { .. } => shots += 1,
                SceneEvent::ProjectileDetonated { obstacle: None, .. } => wall_hits += 1,
                SceneEvent::ObstacleCollapsed { id } => {
                    kills += 1;
                    log::info!("Frame {}: obstacle {} destroyed", world.frame, id.0);
                }
                _ => {}
            }
        }

        if n % 600 == 0 {
            let frame = RenderFrame::capture(&world);
            log::debug!(
                "Frame {}: camera {:?}, {} projectiles on screen",
                world.frame,
                frame.globals.camera_pos,
                frame.globals.projectile_count
            );
        }
    }

    log::info!(
        "Done after {} frames: {} shots, {} kills, {} misses, {}/{} obstacles left",
        world.frame,
        shots,
        kills,
        wall_hits,
        world.field.alive_count(),
        world.field.len()
    );
}
