use glam::{DVec2, DVec3};
use rand::Rng;
use std::f64::consts::TAU;

use crate::defs::{
    PARTICLE_COLOR, PARTICLE_DAMP, PARTICLE_GRAVITY, PARTICLE_LIFETIME, PARTICLE_MAX_SPEED,
    PARTICLE_POOL_CAPACITY, PARTICLE_SCALE,
};
use crate::renderer::{SpriteImage, SpritePool};
use crate::world::Scene;

/// Blast debris. Same kinematics as a bomb, no sounds, no payload.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub lifetime: f64,
}

impl Particle {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifetime > 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            lifetime: 0.0,
        }
    }
}

pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::with_capacity(PARTICLE_POOL_CAPACITY)
    }
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
        }
    }

    /// Scatter up to `count` particles from `origin` into free slots:
    /// a uniform planar angle at speed `MAX * U[0,1)`, with an
    /// independent upward lift in `[0.5, 1.0)`. Emission is truncated
    /// quietly when the pool runs dry.
    pub fn emit(&mut self, origin: DVec3, count: usize, rng: &mut impl Rng) -> usize {
        let mut spawned = 0;
        for particle in self.particles.iter_mut() {
            if spawned == count {
                break;
            }
            if particle.is_active() {
                continue;
            }
            let angle = rng.gen_range(0.0..TAU);
            let lift = rng.gen_range(0.5..1.0);
            let speed = PARTICLE_MAX_SPEED * rng.gen::<f64>();
            particle.position = origin;
            particle.velocity = DVec3::new(angle.cos() * speed, angle.sin() * speed, lift);
            particle.lifetime = PARTICLE_LIFETIME;
            spawned += 1;
        }
        if spawned < count {
            tracing::debug!(requested = count, spawned, "particle pool dry, emission truncated");
        }
        spawned
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }
}

/// Gravity plus the same axis-flip bounce rule bombs use, then a tiny
/// glowing billboard for every particle still alive.
pub fn update_particles(
    particles: &mut ParticlePool,
    scene: &Scene,
    sprites: &mut SpritePool,
    dt: f64,
) {
    for particle in particles.particles.iter_mut() {
        if !particle.is_active() {
            continue;
        }
        particle.lifetime -= dt;
        particle.velocity.z -= PARTICLE_GRAVITY * dt;

        let nx = particle.position.x + particle.velocity.x * dt;
        let ny = particle.position.y + particle.velocity.y * dt;
        if scene.is_wall(DVec2::new(nx, ny)) {
            let dx = (particle.position.x.floor() - nx.floor()).abs();
            let dy = (particle.position.y.floor() - ny.floor()).abs();
            if dx > 0.0 {
                particle.velocity.x *= -1.0;
            }
            if dy > 0.0 {
                particle.velocity.y *= -1.0;
            }
            particle.velocity *= PARTICLE_DAMP;
        } else {
            particle.position.x = nx;
            particle.position.y = ny;
        }

        let nz = particle.position.z + particle.velocity.z * dt;
        if nz < PARTICLE_SCALE || nz > 1.0 {
            particle.velocity.z *= -1.0;
            particle.velocity *= PARTICLE_DAMP;
        } else {
            particle.position.z = nz;
        }

        if particle.is_active() {
            sprites.push(
                SpriteImage::Solid(PARTICLE_COLOR),
                particle.position.truncate(),
                particle.position.z,
                PARTICLE_SCALE,
            );
        }
    }
}
