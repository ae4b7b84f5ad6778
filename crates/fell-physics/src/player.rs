//! Player body: gravity, terrain clamping, and positional collision
//! response against the collider registry.

use fell_collision::{Collider, ColliderHandle, CollisionWorld};
use fell_terrain::TerrainSampler;
use glam::Vec3;
use tracing::trace;

use crate::PhysicsBody;

/// Exponential decay rate for grounded horizontal velocity.
const FRICTION_COEFFICIENT: f32 = 5.0;
/// Below this separation the correction direction falls back to straight
/// up instead of dividing by a near-zero length.
const CORRECTION_EPSILON: f32 = 0.001;
/// Tolerance for the resting-on-box-top landing check.
const LANDING_EPSILON: f32 = 0.1;

/// Tunable player dimensions and movement constants.
#[derive(Clone, Copy, Debug)]
pub struct PlayerParams {
    /// Body height in world units; spawn rests the center half this high.
    pub height: f32,
    /// Radius of the body's collision sphere.
    pub radius: f32,
    /// Horizontal acceleration applied by movement input.
    pub movement_acceleration: f32,
    /// Vertical velocity set by a jump.
    pub jump_velocity: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.3,
            movement_acceleration: 20.0,
            jump_velocity: 8.0,
        }
    }
}

/// The player-controlled physics body.
///
/// Ground contact is a two-state machine (airborne/grounded) re-derived
/// every tick from terrain contact, then possibly re-asserted by landing
/// on a box top during collision resolution.
pub struct Player {
    pub body: PhysicsBody,
    pub params: PlayerParams,
    pub grounded: bool,
    collider: ColliderHandle,
}

impl Player {
    /// Spawn resting on the terrain surface at (x, z) and register the
    /// body's collision sphere.
    pub fn spawn(
        x: f32,
        z: f32,
        params: PlayerParams,
        terrain: &TerrainSampler,
        world: &mut CollisionWorld,
    ) -> Self {
        let ground = terrain.height_at(x, z);
        let position = Vec3::new(x, ground + params.height * 0.5, z);
        let collider = world.insert(Collider::Sphere {
            center: position,
            radius: params.radius,
        });
        Self {
            body: PhysicsBody::with_gravity(position),
            params,
            grounded: true,
            collider,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    /// Eye position used by the trailing viewpoint and audio listener.
    pub fn head_position(&self) -> Vec3 {
        self.body.position + Vec3::new(0.0, self.params.radius, 0.0)
    }

    /// Unregister the body's collider. Call during session teardown,
    /// before the registry is dropped.
    pub fn remove_collider(&self, world: &mut CollisionWorld) {
        world.remove(self.collider);
    }

    /// Add movement acceleration along the horizontal projection of
    /// `direction`, scaled by `multiplier`.
    pub fn accelerate(&mut self, direction: Vec3, multiplier: f32, dt: f32) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() < 1e-8 {
            return;
        }
        let accel = flat.normalize() * self.params.movement_acceleration * multiplier;
        self.body.velocity += accel * dt;
    }

    /// Jump if grounded. Returns whether the jump fired.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.body.velocity.y = self.params.jump_velocity;
        self.grounded = false;
        true
    }

    /// One physics tick: integrate, clamp to terrain, resolve registry
    /// overlaps by positional correction, apply ground friction, resync
    /// the collision sphere.
    ///
    /// Returns true when this tick landed the body (an airborne-to-
    /// grounded transition).
    pub fn update(&mut self, dt: f32, terrain: &TerrainSampler, world: &mut CollisionWorld) -> bool {
        let was_grounded = self.grounded;
        self.body.integrate(dt);

        // Terrain contact is keyed on the body's lower bound.
        let terrain_height = terrain.height_at(self.body.position.x, self.body.position.z);
        if self.body.position.y - self.params.radius <= terrain_height {
            self.body.position.y = terrain_height + self.params.radius;
            self.body.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        // The probe must reflect this tick's position before the query.
        world.sync(
            self.collider,
            self.body.position,
            Vec3::splat(self.params.radius),
        );
        for handle in world.overlaps(self.collider) {
            let Some(shape) = world.get(handle) else {
                continue;
            };
            match *shape {
                Collider::Box {
                    center,
                    half_extents,
                } => self.resolve_box(center, half_extents),
                Collider::Sphere { center, radius } => self.resolve_sphere(center, radius),
            }
        }

        if self.grounded {
            let decay = (1.0 - FRICTION_COEFFICIENT * dt).max(0.0);
            self.body.velocity.x *= decay;
            self.body.velocity.z *= decay;
        }

        world.sync(
            self.collider,
            self.body.position,
            Vec3::splat(self.params.radius),
        );

        let landed = !was_grounded && self.grounded;
        if landed {
            trace!(y = self.body.position.y, "player landed");
        }
        landed
    }

    /// Push the body out of a box along the closest-point direction.
    fn resolve_box(&mut self, center: Vec3, half_extents: Vec3) {
        let closest = self
            .body
            .position
            .clamp(center - half_extents, center + half_extents);
        let diff = self.body.position - closest;
        let distance = diff.length();
        if distance >= self.params.radius {
            return;
        }

        let depth = self.params.radius - distance;
        let direction = if distance > CORRECTION_EPSILON {
            diff / distance
        } else {
            Vec3::Y
        };
        self.body.position += direction * depth;

        // Landing on the top face: mostly-vertical correction while
        // falling, resting within epsilon of the face height.
        let box_top = center.y + half_extents.y;
        if direction.y > 0.5
            && self.body.velocity.y <= 0.0
            && ((self.body.position.y - self.params.radius) - box_top).abs() < LANDING_EPSILON
        {
            self.body.velocity.y = 0.0;
            self.grounded = true;
        }
    }

    /// Push the body out of another sphere along the center line.
    fn resolve_sphere(&mut self, center: Vec3, radius: f32) {
        let diff = self.body.position - center;
        let distance = diff.length();
        let combined = self.params.radius + radius;
        if distance >= combined {
            return;
        }

        let depth = combined - distance;
        let direction = if distance > CORRECTION_EPSILON {
            diff / distance
        } else {
            Vec3::Y
        };
        self.body.position += direction * depth;
    }
}
