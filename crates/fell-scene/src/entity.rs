//! Scene entities and their scripted motion primitives.

use fell_collision::ColliderHandle;
use glam::Vec3;

use crate::RenderableId;

/// Remaining distance below which [`Entity::move_towards`] reports
/// arrival. An at-rest approximation, not exact arrival.
pub const ARRIVAL_THRESHOLD: f32 = 0.1;

/// Fraction of the remaining yaw difference applied per motion step.
const YAW_EASE_FACTOR: f32 = 0.1;

/// A positioned, oriented, scaled object in the scene.
///
/// An entity optionally owns one collider (the handle; shape storage
/// lives in the [`CollisionWorld`](fell_collision::CollisionWorld)) and
/// one renderable (the id; GPU resources live with the render
/// collaborator). An alpha below 1.0 marks the entity transparent for
/// draw-order purposes.
#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vec3,
    /// Euler angles in degrees; `orientation.y` is yaw.
    pub orientation: Vec3,
    pub scale: Vec3,
    pub collider: Option<ColliderHandle>,
    pub renderable: Option<RenderableId>,
    pub alpha: f32,
}

impl Entity {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            orientation: Vec3::ZERO,
            scale,
            collider: None,
            renderable: None,
            alpha: 1.0,
        }
    }

    pub fn with_collider(mut self, collider: ColliderHandle) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_renderable(mut self, renderable: RenderableId) -> Self {
        self.renderable = Some(renderable);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// True when this entity must be depth-sorted behind opaque geometry.
    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }

    /// Draw item for this entity, if it has a renderable.
    pub fn draw_item(&self) -> Option<crate::DrawItem> {
        self.renderable.map(|renderable| crate::DrawItem {
            renderable,
            position: self.position,
            orientation: self.orientation,
            alpha: self.alpha,
        })
    }

    /// Step toward `target` at constant `speed`.
    ///
    /// Returns true once the remaining distance drops below
    /// [`ARRIVAL_THRESHOLD`]; the entity then stays put, so further calls
    /// are idempotent. While moving, the step length is clamped to the
    /// remaining distance (never overshoots) and yaw eases toward the
    /// horizontal travel direction along the shortest arc. A purely
    /// vertical approach leaves yaw unchanged.
    pub fn move_towards(&mut self, target: Vec3, speed: f32, dt: f32) -> bool {
        let to_target = target - self.position;
        let distance = to_target.length();
        if distance < ARRIVAL_THRESHOLD {
            return true;
        }

        let direction = to_target / distance;
        let step = (speed * dt).min(distance);
        self.position += direction * step;

        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() > 1e-8 {
            let flat = flat.normalize();
            let target_yaw = flat.x.atan2(flat.z).to_degrees();
            self.orientation.y = lerp_angle(self.orientation.y, target_yaw, YAW_EASE_FACTOR);
        }

        false
    }

    /// Place the entity on a horizontal circle around `center` as a pure
    /// function of `time`.
    ///
    /// Position is closed-form: the vertical bob runs at twice the
    /// angular rate, and yaw follows the circle tangent. Nothing
    /// accumulates between calls, so the path is exactly periodic and
    /// restartable from any time value.
    pub fn move_in_circle(&mut self, center: Vec3, radius: f32, angular_speed: f32, time: f32) {
        let angle = angular_speed * time;
        self.position.x = center.x + radius * angle.cos();
        self.position.z = center.z + radius * angle.sin();
        self.position.y = center.y + 2.0 * (2.0 * angle).sin();
        self.orientation.y = (-angle.sin()).atan2(angle.cos()).to_degrees();
    }
}

/// Cyclic waypoint route driven through [`Entity::move_towards`].
///
/// Advancing steers the entity toward the current waypoint and steps the
/// index (wrapping) once arrival is reported.
#[derive(Clone, Debug)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    current: usize,
}

impl PatrolRoute {
    /// An empty route is valid and leaves entities untouched.
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }

    /// Index of the waypoint currently steered toward.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    /// Drive `entity` one step along the route. Returns true when a
    /// waypoint was reached and the route advanced.
    pub fn advance(&mut self, entity: &mut Entity, speed: f32, dt: f32) -> bool {
        let Some(target) = self.current_waypoint() else {
            return false;
        };
        if entity.move_towards(target, speed, dt) {
            self.current = (self.current + 1) % self.waypoints.len();
            return true;
        }
        false
    }
}

/// Interpolate between two angles in degrees along the shortest arc.
///
/// The difference is normalized into (-180, 180] first, so easing never
/// swings the long way around the circle.
fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    let mut diff = target - current;
    while diff < -180.0 {
        diff += 360.0;
    }
    while diff > 180.0 {
        diff -= 360.0;
    }
    current + diff * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_towards_tick_count() {
        // Distance 10 at speed 2 with dt 0.5: one unit per tick, so the
        // threshold is crossed after 10 ticks of movement.
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        let target = Vec3::new(10.0, 0.0, 0.0);

        let mut ticks = 0;
        while !entity.move_towards(target, 2.0, 0.5) {
            ticks += 1;
            assert!(ticks < 100, "never arrived");
        }
        assert_eq!(ticks, 10);
        assert!(entity.position.distance(target) < ARRIVAL_THRESHOLD);
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        let target = Vec3::new(1.0, 0.0, 0.0);
        // One step would cover 5 units; it must stop at the target.
        entity.move_towards(target, 10.0, 0.5);
        assert!(entity.position.x <= 1.0 + 1e-6);
        assert!(entity.position.distance(target) < ARRIVAL_THRESHOLD);
    }

    #[test]
    fn test_move_towards_idempotent_after_arrival() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        let target = Vec3::new(0.05, 0.0, 0.0);
        assert!(entity.move_towards(target, 5.0, 0.1), "already in range");

        let before = entity.position;
        for _ in 0..5 {
            assert!(entity.move_towards(target, 5.0, 0.1));
        }
        assert_eq!(entity.position, before, "arrived entity must stay put");
    }

    #[test]
    fn test_move_towards_yaw_eases_toward_heading() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        // Heading along +x: target yaw is atan2(1, 0) = 90 degrees.
        entity.move_towards(Vec3::new(10.0, 0.0, 0.0), 1.0, 0.1);
        assert!((entity.orientation.y - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_towards_yaw_takes_shortest_arc() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        entity.orientation.y = -170.0;
        // Heading along -z: target yaw 180. The short way from -170 runs
        // through -180, so yaw must decrease, not swing up through zero.
        entity.move_towards(Vec3::new(0.0, 0.0, -10.0), 1.0, 0.1);
        assert!(
            entity.orientation.y < -170.0,
            "yaw {} should ease downward through the wrap",
            entity.orientation.y
        );
    }

    #[test]
    fn test_move_towards_vertical_leaves_yaw_alone() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        entity.orientation.y = 42.0;
        entity.move_towards(Vec3::new(0.0, 10.0, 0.0), 1.0, 0.1);
        assert_eq!(entity.orientation.y, 42.0);
    }

    #[test]
    fn test_move_in_circle_known_points() {
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);
        let center = Vec3::new(1.0, 2.0, 3.0);

        entity.move_in_circle(center, 10.0, 0.5, 0.0);
        assert!((entity.position.x - 11.0).abs() < 1e-5);
        assert!((entity.position.z - 3.0).abs() < 1e-5);
        assert!((entity.position.y - 2.0).abs() < 1e-5);

        // Quarter turn: angle pi/2, bob term sin(pi) = 0.
        let quarter = std::f32::consts::FRAC_PI_2 / 0.5;
        entity.move_in_circle(center, 10.0, 0.5, quarter);
        assert!((entity.position.x - 1.0).abs() < 1e-4);
        assert!((entity.position.z - 13.0).abs() < 1e-4);
        assert!((entity.position.y - 2.0).abs() < 1e-4);
        assert!((entity.orientation.y + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_move_in_circle_periodic() {
        let angular_speed = 0.5;
        let period = std::f32::consts::TAU / angular_speed;
        let mut a = Entity::new(Vec3::ZERO, Vec3::ONE);
        let mut b = Entity::new(Vec3::ZERO, Vec3::ONE);

        for i in 0..8 {
            let t = i as f32 * 0.37;
            a.move_in_circle(Vec3::ZERO, 10.0, angular_speed, t);
            b.move_in_circle(Vec3::ZERO, 10.0, angular_speed, t + period);
            assert!(
                a.position.distance(b.position) < 1e-3,
                "t={t}: {:?} vs {:?}",
                a.position,
                b.position
            );
        }
    }

    #[test]
    fn test_move_in_circle_is_pure_in_time() {
        let mut a = Entity::new(Vec3::ZERO, Vec3::ONE);
        let mut b = Entity::new(Vec3::new(99.0, 99.0, 99.0), Vec3::ONE);
        // Same time, wildly different prior state: same result.
        a.move_in_circle(Vec3::ZERO, 5.0, 1.3, 2.0);
        b.move_in_circle(Vec3::ZERO, 5.0, 1.3, 2.0);
        assert_eq!(a.position, b.position);
        assert_eq!(a.orientation.y, b.orientation.y);
    }

    #[test]
    fn test_patrol_route_cycles_and_wraps() {
        let waypoints = vec![
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let mut route = PatrolRoute::new(waypoints.clone());
        let mut entity = Entity::new(Vec3::ZERO, Vec3::ONE);

        let mut reached = Vec::new();
        for _ in 0..10_000 {
            if route.advance(&mut entity, 25.0, 0.016) {
                reached.push(route.current_index());
                if reached.len() == 5 {
                    break;
                }
            }
        }
        // Visits every corner and wraps back to the first.
        assert_eq!(reached, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_empty_patrol_route_is_inert() {
        let mut route = PatrolRoute::new(Vec::new());
        let mut entity = Entity::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        assert!(!route.advance(&mut entity, 10.0, 0.1));
        assert_eq!(entity.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_lerp_angle_wraps_into_half_open_range() {
        // 350 degrees of raw difference normalizes to -10.
        let stepped = lerp_angle(-170.0, 180.0, 0.1);
        assert!((stepped - (-171.0)).abs() < 1e-4);
        // Exactly 180 stays 180 (half-open on the negative side).
        let half = lerp_angle(0.0, 180.0, 1.0);
        assert!((half - 180.0).abs() < 1e-4);
    }
}
