//! World state and the fire operation
//!
//! `World` owns everything the simulation mutates: the path, tunnel wall,
//! obstacle field, camera and aim, and the active projectile list. Only the
//! tick thread touches it.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aim::{AimController, Reticle};
use super::camera::{CameraNavigator, CameraPose};
use super::collision::{Ray, resolve_ray};
use super::obstacles::{ObstacleField, ObstacleId};
use super::path::Path;
use super::projectile::{Projectile, ProjectileId, ProjectileParams};
use super::sdf::TunnelBoundary;
use crate::Settings;

/// Notifications for the renderer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    ObstacleAdded { id: ObstacleId },
    /// Wireframe proxy shrunk to zero
    ObstacleCollapsed { id: ObstacleId },
    ProjectileSpawned { id: ProjectileId },
    ProjectileDetonated {
        id: ProjectileId,
        obstacle: Option<ObstacleId>,
    },
    ProjectileRemoved { id: ProjectileId },
}

/// Complete simulation state
///
/// Scene events accumulate until the host calls [`World::drain_events`];
/// `tick` never clears them.
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub path: Path,
    pub tunnel: TunnelBoundary,
    pub field: ObstacleField,
    pub navigator: CameraNavigator,
    pub aim: AimController,
    pub reticle: Reticle,
    pub params: ProjectileParams,
    /// Camera pose for the current frame
    pub camera: CameraPose,
    /// World-space aim point for the current frame
    pub aim_point: Vec3,
    /// Active projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Frames ticked so far
    pub frame: u64,
    /// Pending renderer notifications
    events: Vec<SceneEvent>,
    next_id: u32,
}

impl World {
    /// Build a world on the default path with a seeded obstacle field
    pub fn new(settings: Settings) -> Self {
        let path = Path::default();
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let field = ObstacleField::generate(
            settings.obstacle_count,
            settings.jitter_scale,
            settings.obstacle_size,
            &path,
            &mut rng,
        );
        Self::from_parts(settings, path, field)
    }

    /// Build a world from an explicit path and obstacle field
    pub fn from_parts(settings: Settings, path: Path, field: ObstacleField) -> Self {
        let tunnel = TunnelBoundary::new(&path, settings.tunnel_radius);
        let navigator = settings.navigator();
        let aim = settings.aim_controller();
        let params = settings.projectile_params();
        let camera = navigator.advance(&path, 0.0);
        let aim_point = aim.world_point(&camera);
        let events = field
            .iter()
            .map(|o| SceneEvent::ObstacleAdded { id: o.id })
            .collect();

        log::info!(
            "World ready: {} obstacles, tunnel radius {}, seed {:#x}",
            field.len(),
            settings.tunnel_radius,
            settings.seed
        );

        Self {
            settings,
            path,
            tunnel,
            field,
            navigator,
            aim,
            reticle: Reticle::default(),
            params,
            camera,
            aim_point,
            projectiles: Vec::new(),
            frame: 0,
            events,
            next_id: 1,
        }
    }

    fn next_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take all pending scene events
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending scene events, without consuming them
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Fire from the current camera position through the current aim point
    ///
    /// Resolves the impact once, here. A shot that hits nothing detonates at
    /// the far clip distance. Returns `None` without spawning when the aim
    /// point coincides with the camera. Expired projectiles are swept first.
    pub fn fire(&mut self) -> Option<ProjectileId> {
        self.sweep_expired();

        let origin = self.camera.position;
        let Some(ray) = Ray::through(origin, self.aim_point) else {
            log::debug!("Fire ignored: aim point coincides with camera");
            return None;
        };

        let far_clip = self.settings.far_clip;
        let (impact_point, impact_color, target) =
            match resolve_ray(&ray, &self.field, &self.tunnel, far_clip) {
                Some(hit) => (hit.point, hit.color, hit.obstacle),
                None => (ray.at(far_clip), crate::consts::PROJECTILE_COLOR, None),
            };

        if let Some(obstacle) = target.and_then(|id| self.field.get_mut(id)) {
            obstacle.claimed = true;
        }

        let id = self.next_projectile_id();
        self.projectiles.push(Projectile::new(
            id,
            origin,
            impact_point,
            impact_color,
            target,
            self.params.speed,
        ));
        self.events.push(SceneEvent::ProjectileSpawned { id });

        log::debug!(
            "Fired {:?}: impact at {:.2} units, target {:?}",
            id,
            origin.distance(impact_point),
            target
        );

        Some(id)
    }

    /// Advance every projectile one frame and apply detonations
    pub fn advance_projectiles(&mut self) {
        let params = self.params;
        for projectile in &mut self.projectiles {
            let Some(detonation) = projectile.advance(&params) else {
                continue;
            };

            self.events.push(SceneEvent::ProjectileDetonated {
                id: projectile.id,
                obstacle: detonation.obstacle,
            });

            if let Some(id) = detonation.obstacle {
                let destroyed = self.field.get_mut(id).is_some_and(|o| o.destroy());
                if destroyed {
                    self.events.push(SceneEvent::ObstacleCollapsed { id });
                }
            }
        }
    }

    /// Remove expired projectiles, returning how many were removed
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.projectiles.len();
        let events = &mut self.events;
        self.projectiles.retain(|p| {
            if p.is_active() {
                true
            } else {
                events.push(SceneEvent::ProjectileRemoved { id: p.id });
                false
            }
        });
        before - self.projectiles.len()
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Reticle tick segments in world space for the current frame
    pub fn reticle_segments(&self) -> [[Vec3; 2]; 4] {
        self.reticle.segments_world(&self.aim, &self.camera)
    }
}
