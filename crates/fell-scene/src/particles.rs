//! Short-lived particles spawned in bursts and drained by lifetime.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{DrawItem, RenderableId};

/// One ballistic particle. Alpha fades linearly with remaining lifetime.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining lifetime in seconds.
    pub lifetime: f32,
    /// Total lifetime in seconds at spawn.
    pub life_span: f32,
}

impl Particle {
    /// Alpha in [0, 1], proportional to remaining lifetime.
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.life_span).clamp(0.0, 1.0)
    }
}

/// Owns the live particles and the RNG their bursts draw from.
///
/// The RNG is seeded explicitly so bursts replay identically across runs
/// with the same seed.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
    renderable: Option<RenderableId>,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            renderable: None,
        }
    }

    /// Renderable submitted for every particle; all particles share one.
    pub fn set_renderable(&mut self, renderable: RenderableId) {
        self.renderable = Some(renderable);
    }

    /// Spawn `count` particles at `impact_point`.
    ///
    /// Directions are uniform random (a near-zero draw falls back to
    /// straight up), speeds lie in [2, 5), lifetimes in [1, 2) seconds.
    pub fn spawn_burst(&mut self, impact_point: Vec3, count: usize) {
        for _ in 0..count {
            let speed = 2.0 + self.rng.random::<f32>() * 3.0;
            let mut direction = Vec3::new(
                (self.rng.random::<f32>() - 0.5) * 2.0,
                (self.rng.random::<f32>() - 0.5) * 2.0,
                (self.rng.random::<f32>() - 0.5) * 2.0,
            );
            if direction.length() < 0.001 {
                direction = Vec3::Y;
            }
            let lifetime = 1.0 + self.rng.random::<f32>();
            self.particles.push(Particle {
                position: impact_point,
                velocity: direction.normalize() * speed,
                lifetime,
                life_span: lifetime,
            });
        }
    }

    /// Integrate living particles and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.lifetime -= dt;
            if p.lifetime > 0.0 {
                p.position += p.velocity * dt;
            }
        }
        self.particles.retain(|p| p.lifetime > 0.0);
    }

    /// Draw items for all living particles, in spawn order.
    pub fn draw_items(&self) -> impl Iterator<Item = DrawItem> + '_ {
        self.particles.iter().filter_map(move |p| {
            self.renderable.map(|renderable| DrawItem {
                renderable,
                position: p.position,
                orientation: Vec3::ZERO,
                alpha: p.alpha(),
            })
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_spawns_requested_count() {
        let mut system = ParticleSystem::new(7);
        system.spawn_burst(Vec3::ZERO, 12);
        assert_eq!(system.len(), 12);
    }

    #[test]
    fn test_burst_speed_and_lifetime_ranges() {
        let mut system = ParticleSystem::new(11);
        system.spawn_burst(Vec3::ZERO, 200);
        for p in system.particles() {
            let speed = p.velocity.length();
            assert!((2.0 - 1e-4..5.0).contains(&speed), "speed {speed} out of range");
            assert!((1.0..2.0).contains(&p.lifetime), "lifetime {} out of range", p.lifetime);
            assert_eq!(p.lifetime, p.life_span);
        }
    }

    #[test]
    fn test_same_seed_same_burst() {
        let mut a = ParticleSystem::new(42);
        let mut b = ParticleSystem::new(42);
        a.spawn_burst(Vec3::ONE, 20);
        b.spawn_burst(Vec3::ONE, 20);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.velocity, pb.velocity);
            assert_eq!(pa.lifetime, pb.lifetime);
        }
    }

    #[test]
    fn test_update_integrates_position() {
        let mut system = ParticleSystem::new(3);
        system.spawn_burst(Vec3::ZERO, 5);
        let velocities: Vec<Vec3> = system.particles().iter().map(|p| p.velocity).collect();

        system.update(0.5);
        for (p, v) in system.particles().iter().zip(velocities) {
            assert!(p.position.distance(v * 0.5) < 1e-5);
        }
    }

    #[test]
    fn test_alpha_fades_monotonically() {
        let mut system = ParticleSystem::new(5);
        system.spawn_burst(Vec3::ZERO, 1);
        let mut last_alpha = system.particles()[0].alpha();
        assert!(last_alpha <= 1.0);

        for _ in 0..5 {
            system.update(0.1);
            let alpha = system.particles()[0].alpha();
            assert!(alpha < last_alpha, "alpha must fade: {alpha} vs {last_alpha}");
            last_alpha = alpha;
        }
    }

    #[test]
    fn test_lifetime_draining_empties_system() {
        let mut system = ParticleSystem::new(9);
        system.spawn_burst(Vec3::ZERO, 30);

        // Max lifetime is below 2 seconds.
        for _ in 0..25 {
            system.update(0.1);
        }
        assert!(system.is_empty(), "{} particles survived", system.len());
    }

    #[test]
    fn test_draw_items_need_a_renderable() {
        let mut system = ParticleSystem::new(1);
        system.spawn_burst(Vec3::ZERO, 3);
        assert_eq!(system.draw_items().count(), 0);

        system.set_renderable(RenderableId(5));
        assert_eq!(system.draw_items().count(), 3);
        assert!(system.draw_items().all(|i| i.renderable == RenderableId(5)));
    }
}
