//! Velocity-integrated point bodies.

use glam::Vec3;

/// Gravitational acceleration applied to gravity-affected bodies.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// A point body integrated with semi-implicit (symplectic) Euler.
///
/// Velocity is updated from acceleration before position is updated from
/// the new velocity, which stays stable at interactive frame rates where
/// explicit Euler drifts.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub gravity_enabled: bool,
}

impl PhysicsBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            gravity_enabled: false,
        }
    }

    pub fn with_gravity(position: Vec3) -> Self {
        Self {
            gravity_enabled: true,
            ..Self::new(position)
        }
    }

    /// Advance one tick.
    ///
    /// Acceleration is rederived every call: the gravity vector when
    /// enabled, zero otherwise. Forces do not persist across ticks.
    pub fn integrate(&mut self, dt: f32) {
        self.acceleration = if self.gravity_enabled {
            GRAVITY
        } else {
            Vec3::ZERO
        };
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }
}
