//! Per-frame render snapshot
//!
//! Flattens the world into `Pod` records a GPU backend can upload as-is.
//! Layouts keep every `vec3` followed by a scalar so they match WGSL
//! storage buffer alignment.

use bytemuck::{Pod, Zeroable};

use crate::sim::{Path, ProjectileState, World};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameGlobals {
    pub camera_pos: [f32; 3],     // offset 0
    pub obstacle_count: u32,      // offset 12
    pub camera_look_at: [f32; 3], // offset 16
    pub projectile_count: u32,    // offset 28
    pub aim_point: [f32; 3],      // offset 32
    pub frame: u32,               // offset 44
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObstacleInstance {
    pub position: [f32; 3],
    /// Cube edge length; zero once the obstacle is destroyed
    pub scale: f32,
    /// Quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ProjectileInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// RGB plus opacity
    pub color: [f32; 4],
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub globals: FrameGlobals,
    pub obstacles: Vec<ObstacleInstance>,
    pub projectiles: Vec<ProjectileInstance>,
    /// Reticle tick segments in world space
    pub reticle: [[[f32; 3]; 2]; 4],
}

impl Default for FrameGlobals {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl RenderFrame {
    /// Snapshot the world as it stands after a tick
    pub fn capture(world: &World) -> Self {
        let size = world.field.size;
        let obstacles: Vec<_> = world
            .field
            .iter()
            .map(|o| {
                let proxy = &o.proxy;
                let rotation = glam::Quat::from_euler(
                    glam::EulerRot::XYZ,
                    proxy.rotation.x,
                    proxy.rotation.y,
                    proxy.rotation.z,
                );
                ObstacleInstance {
                    position: proxy.position.to_array(),
                    scale: proxy.scale * size,
                    rotation: rotation.to_array(),
                    color: [o.color[0], o.color[1], o.color[2], 1.0],
                }
            })
            .collect();

        // Expired projectiles are invisible until swept
        let projectiles: Vec<_> = world
            .projectiles
            .iter()
            .filter(|p| p.state != ProjectileState::Expired)
            .map(|p| ProjectileInstance {
                position: p.position.to_array(),
                scale: p.scale,
                color: [p.color[0], p.color[1], p.color[2], p.opacity],
            })
            .collect();

        let globals = FrameGlobals {
            camera_pos: world.camera.position.to_array(),
            obstacle_count: saturate(obstacles.len() as u64),
            camera_look_at: world.camera.look_at.to_array(),
            projectile_count: saturate(projectiles.len() as u64),
            aim_point: world.aim_point.to_array(),
            frame: saturate(world.frame),
        };

        let reticle = world
            .reticle_segments()
            .map(|[a, b]| [a.to_array(), b.to_array()]);

        Self {
            globals,
            obstacles,
            projectiles,
            reticle,
        }
    }

    pub fn globals_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.globals)
    }

    pub fn obstacle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.obstacles)
    }

    pub fn projectile_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.projectiles)
    }
}

/// Narrow a counter for the GPU, pinning at `u32::MAX`
fn saturate(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Closed centerline polyline for the tunnel wireframe
///
/// The first point is repeated at the end so the strip closes.
pub fn tunnel_polyline(path: &Path, samples: usize) -> Vec<[f32; 3]> {
    let mut points: Vec<[f32; 3]> = path
        .sample(samples)
        .iter()
        .map(|p| p.to_array())
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::Settings;
    use crate::sim::{CameraPose, Obstacle, ObstacleField, ObstacleId, TickInput, tick};

    #[test]
    fn test_gpu_layout_sizes() {
        assert_eq!(std::mem::size_of::<FrameGlobals>(), 48);
        assert_eq!(std::mem::size_of::<ObstacleInstance>(), 48);
        assert_eq!(std::mem::size_of::<ProjectileInstance>(), 32);
    }

    #[test]
    fn test_capture_fresh_world() {
        let world = World::new(Settings::default());
        let frame = RenderFrame::capture(&world);

        assert_eq!(frame.obstacles.len(), 55);
        assert_eq!(frame.globals.obstacle_count, 55);
        assert_eq!(frame.globals.projectile_count, 0);
        assert_eq!(frame.globals.camera_pos, world.camera.position.to_array());
        assert_eq!(frame.obstacle_bytes().len(), 55 * 48);
        assert_eq!(frame.globals_bytes().len(), 48);
        assert!(frame.obstacles.iter().all(|o| (o.scale - 0.075).abs() < 1e-6));
    }

    #[test]
    fn test_capture_tracks_projectile_and_collapse() {
        let settings = Settings::default();
        let path = Path::default();
        let camera = settings.navigator().advance(&path, 0.0);
        let position = camera.position + camera.forward() * 1.0;
        let obstacle = Obstacle::new(ObstacleId(0), position, Vec3::ZERO, [0.5; 3], 0.0);
        let field = ObstacleField::new(vec![obstacle], 0.075);
        let mut world = World::from_parts(settings, path, field);

        tick(
            &mut world,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        let frame = RenderFrame::capture(&world);
        assert_eq!(frame.projectiles.len(), 1);
        assert_eq!(frame.projectiles[0].color[3], 1.0);

        for _ in 0..200 {
            tick(&mut world, &TickInput::default());
        }
        let frame = RenderFrame::capture(&world);
        assert_eq!(frame.obstacles[0].scale, 0.0);
        // Expired but not yet swept
        assert_eq!(world.projectiles.len(), 1);
        assert!(frame.projectiles.is_empty());
        assert_eq!(frame.globals.frame, 201);
    }

    #[test]
    fn test_reticle_matches_world() {
        let world = World::new(Settings::default());
        let frame = RenderFrame::capture(&world);
        let segs = world.reticle_segments();
        assert_eq!(frame.reticle[2][0], segs[2][0].to_array());
    }

    #[test]
    fn test_capture_keeps_every_obstacle() {
        let settings = Settings {
            obstacle_count: 300,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        let world = World::new(settings);
        let frame = RenderFrame::capture(&world);
        assert_eq!(frame.obstacles.len(), 300);
        assert_eq!(frame.globals.obstacle_count, 300);
    }

    #[test]
    fn test_capture_keeps_every_live_projectile() {
        let mut world = World::new(Settings::default());
        // Outside the tube every shot misses and flies toward the far clip
        world.camera = CameraPose {
            position: Vec3::new(0.0, 500.0, 0.0),
            look_at: Vec3::new(0.0, 501.0, 0.0),
        };
        world.aim_point = world.aim.world_point(&world.camera);
        for _ in 0..70 {
            world.fire().expect("fired");
            world.advance_projectiles();
        }
        assert!(world.projectiles.iter().all(|p| p.is_active()));

        let frame = RenderFrame::capture(&world);
        assert_eq!(frame.projectiles.len(), 70);
        assert_eq!(frame.globals.projectile_count, 70);
        assert_eq!(frame.projectile_bytes().len(), 70 * 32);
    }

    #[test]
    fn test_frame_counter_saturates() {
        let mut world = World::new(Settings::default());
        world.frame = u64::from(u32::MAX) + 5;
        let frame = RenderFrame::capture(&world);
        assert_eq!(frame.globals.frame, u32::MAX);

        world.frame = 12;
        assert_eq!(RenderFrame::capture(&world).globals.frame, 12);
    }

    #[test]
    fn test_tunnel_polyline_closes() {
        let line = tunnel_polyline(&Path::default(), 100);
        assert_eq!(line.len(), 101);
        assert_eq!(line[0], line[100]);
    }
}
