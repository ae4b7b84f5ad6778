//! The simulation session: one explicitly constructed context owning the
//! collider registry, terrain, entities, particles, the player, and the
//! handle to the vision pipeline. No globals; everything a frame touches
//! hangs off [`SimSession`].

use fell_audio::{AudioEvent, AudioSink};
use fell_collision::{Collider, CollisionWorld};
use fell_physics::{Player, PlayerParams};
use fell_scene::{
    DrawItem, Entity, ParticleSystem, PatrolRoute, RenderableId, Renderer, order_draw_list,
    submit_draw_list,
};
use fell_terrain::{TerrainParams, TerrainSampler};
use fell_vision::{DetectionFlag, VisionPipeline};
use glam::Vec3;
use tracing::debug;

use crate::frame_clock::FpsCounter;
use crate::input::{InputSample, speed_multiplier};

/// Offset from the player's head to the trailing viewpoint.
const VIEWPOINT_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 1.0);
/// Fixed facing of the headless viewpoint.
const VIEW_FACING: Vec3 = Vec3::NEG_Z;
/// Particles spawned per fire input.
const BURST_COUNT: usize = 20;

/// Fatal failures surfaced at the application seam.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] fell_config::ConfigError),
    #[error(transparent)]
    Platform(#[from] crate::platform::PlatformError),
    #[error(transparent)]
    Vision(#[from] fell_vision::VisionError),
}

/// Index of an entity within its session. Entities are only added, never
/// removed, so an id stays valid for the session's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityId(usize);

struct Orbiter {
    entity: EntityId,
    center: Vec3,
    radius: f32,
    angular_speed: f32,
}

struct Patrol {
    entity: EntityId,
    route: PatrolRoute,
    speed: f32,
}

/// UI-adjustable transparency binding.
struct AlphaSlider {
    entity: EntityId,
    value: f32,
}

/// Read-only per-frame values handed to the info overlay collaborator.
#[derive(Clone, Debug)]
pub struct UiSnapshot {
    pub fps: f32,
    pub sim_time: f32,
    pub player_position: Vec3,
    pub viewpoint: Vec3,
    pub target_detected: bool,
    pub slider_values: Vec<f32>,
    pub particle_count: usize,
    pub draw_count: usize,
}

/// One running simulation.
pub struct SimSession {
    world: CollisionWorld,
    terrain: TerrainSampler,
    entities: Vec<Entity>,
    orbiters: Vec<Orbiter>,
    patrols: Vec<Patrol>,
    sliders: Vec<AlphaSlider>,
    particles: ParticleSystem,
    player: Player,
    player_renderable: Option<RenderableId>,
    viewpoint: Vec3,
    detection: DetectionFlag,
    pipeline: Option<VisionPipeline>,
    sim_time: f32,
    fps: FpsCounter,
}

impl SimSession {
    /// Build a session with the player spawned at the world origin.
    pub fn new(terrain: TerrainParams, player_params: PlayerParams, particle_seed: u64) -> Self {
        let terrain = TerrainSampler::new(terrain);
        let mut world = CollisionWorld::new();
        let player = Player::spawn(0.0, 0.0, player_params, &terrain, &mut world);
        let viewpoint = player.head_position() + VIEWPOINT_OFFSET;
        Self {
            world,
            terrain,
            entities: Vec::new(),
            orbiters: Vec::new(),
            patrols: Vec::new(),
            sliders: Vec::new(),
            particles: ParticleSystem::new(particle_seed),
            player,
            player_renderable: None,
            viewpoint,
            detection: DetectionFlag::new(),
            pipeline: None,
            sim_time: 0.0,
            fps: FpsCounter::new(),
        }
    }

    /// Adopt a running vision pipeline. Its detection flag becomes the
    /// session's speed-boost signal, and session teardown stops the
    /// workers.
    pub fn attach_pipeline(&mut self, pipeline: VisionPipeline) {
        self.detection = pipeline.detection_flag();
        self.pipeline = Some(pipeline);
    }

    /// Handle to the detection flag driving the speed boost.
    pub fn detection_flag(&self) -> DetectionFlag {
        self.detection.clone()
    }

    /// True when an attached pipeline has stopped (source drained or
    /// shut down); false when no pipeline is attached.
    pub fn pipeline_stopped(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| !p.is_running())
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    /// Add a static box obstacle: one entity plus its registered collider.
    pub fn add_box_obstacle(
        &mut self,
        position: Vec3,
        size: Vec3,
        renderable: Option<RenderableId>,
        alpha: f32,
    ) -> EntityId {
        let collider = self.world.insert(Collider::box_from_size(position, size));
        let mut entity = Entity::new(position, size)
            .with_collider(collider)
            .with_alpha(alpha);
        entity.renderable = renderable;
        self.add_entity(entity)
    }

    /// Add a static sphere obstacle: one entity plus its registered collider.
    pub fn add_sphere_obstacle(
        &mut self,
        position: Vec3,
        radius: f32,
        renderable: Option<RenderableId>,
    ) -> EntityId {
        let collider = self.world.insert(Collider::Sphere {
            center: position,
            radius,
        });
        let mut entity = Entity::new(position, Vec3::splat(radius)).with_collider(collider);
        entity.renderable = renderable;
        self.add_entity(entity)
    }

    /// Drive an entity on a horizontal circle, closed-form in time.
    pub fn add_orbiter(&mut self, entity: EntityId, center: Vec3, radius: f32, angular_speed: f32) {
        self.orbiters.push(Orbiter {
            entity,
            center,
            radius,
            angular_speed,
        });
    }

    /// Drive an entity around a cyclic waypoint route.
    pub fn add_patrol(&mut self, entity: EntityId, waypoints: Vec<Vec3>, speed: f32) {
        self.patrols.push(Patrol {
            entity,
            route: PatrolRoute::new(waypoints),
            speed,
        });
    }

    /// Bind a UI transparency slider to an entity. Returns the slider
    /// index for [`SimSession::set_slider`].
    pub fn bind_alpha_slider(&mut self, entity: EntityId, initial: f32) -> usize {
        self.entities[entity.0].alpha = initial;
        self.sliders.push(AlphaSlider {
            entity,
            value: initial,
        });
        self.sliders.len() - 1
    }

    /// Update a slider's value; it is written to the bound entity on the
    /// next step.
    pub fn set_slider(&mut self, slider: usize, value: f32) {
        if let Some(slider) = self.sliders.get_mut(slider) {
            slider.value = value.clamp(0.0, 1.0);
        }
    }

    pub fn set_player_renderable(&mut self, renderable: RenderableId) {
        self.player_renderable = Some(renderable);
    }

    pub fn set_particle_renderable(&mut self, renderable: RenderableId) {
        self.particles.set_renderable(renderable);
    }

    /// Advance the simulation by `dt` seconds and submit the frame.
    ///
    /// Order within a step: input, scripted entity motion, collider
    /// resync, player physics, particles, slider feedback, then draw
    /// assembly from the updated viewpoint. The resync runs before the
    /// player's registry query so moving entities collide at this tick's
    /// position, not last tick's.
    pub fn step(
        &mut self,
        dt: f32,
        input: &InputSample,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
    ) -> UiSnapshot {
        self.sim_time += dt;
        if let Some(fps) = self.fps.frame(dt) {
            debug!(fps, "fps window closed");
        }

        let multiplier = speed_multiplier(input, &self.detection);
        self.player.accelerate(input.move_direction, multiplier, dt);
        if input.jump && self.player.jump() {
            audio.play_event(
                AudioEvent::Jump,
                self.player.position(),
                self.player.head_position(),
                VIEW_FACING,
            );
        }
        if input.fire {
            let point = self.player.position();
            self.particles.spawn_burst(point, BURST_COUNT);
            audio.play_event(AudioEvent::Burst, point, self.player.head_position(), VIEW_FACING);
        }

        for orbiter in &self.orbiters {
            self.entities[orbiter.entity.0].move_in_circle(
                orbiter.center,
                orbiter.radius,
                orbiter.angular_speed,
                self.sim_time,
            );
        }
        for patrol in &mut self.patrols {
            patrol
                .route
                .advance(&mut self.entities[patrol.entity.0], patrol.speed, dt);
        }

        for entity in &self.entities {
            if let Some(handle) = entity.collider {
                self.world.sync(handle, entity.position, entity.scale);
            }
        }

        if self.player.update(dt, &self.terrain, &mut self.world) {
            audio.play_event(
                AudioEvent::Land,
                self.player.position(),
                self.player.head_position(),
                VIEW_FACING,
            );
        }

        self.particles.update(dt);

        for slider in &self.sliders {
            self.entities[slider.entity.0].alpha = slider.value;
        }

        self.viewpoint = self.player.head_position() + VIEWPOINT_OFFSET;
        let items = self.assemble_draw_list();
        submit_draw_list(renderer, &items);

        UiSnapshot {
            fps: self.fps.fps(),
            sim_time: self.sim_time,
            player_position: self.player.position(),
            viewpoint: self.viewpoint,
            target_detected: self.detection.get(),
            slider_values: self.sliders.iter().map(|s| s.value).collect(),
            particle_count: self.particles.len(),
            draw_count: items.len(),
        }
    }

    /// Player first, opaque entities in scene order, particles, then
    /// transparent entities depth-sorted back to front.
    fn assemble_draw_list(&self) -> Vec<DrawItem> {
        let mut items = Vec::with_capacity(self.entities.len() + self.particles.len() + 1);
        if let Some(renderable) = self.player_renderable {
            items.push(DrawItem {
                renderable,
                position: self.player.position(),
                orientation: Vec3::ZERO,
                alpha: 1.0,
            });
        }
        let mut transparent = Vec::new();
        for entity in &self.entities {
            let Some(item) = entity.draw_item() else {
                continue;
            };
            if entity.is_transparent() {
                transparent.push(item);
            } else {
                items.push(item);
            }
        }
        items.extend(self.particles.draw_items());
        items.extend(order_draw_list(transparent, self.viewpoint));
        items
    }

    /// Tear the session down: stop the vision workers, then unregister
    /// every collider so the registry empties before the entities drop.
    pub fn shutdown(&mut self) {
        if let Some(mut pipeline) = self.pipeline.take() {
            pipeline.shutdown();
        }
        for entity in &mut self.entities {
            if let Some(handle) = entity.collider.take() {
                self.world.remove(handle);
            }
        }
        self.player.remove_collider(&mut self.world);
        debug!(remaining = self.world.len(), "session torn down");
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.0]
    }

    pub fn collision_world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn viewpoint(&self) -> Vec3 {
        self.viewpoint
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}
