use glam::{DVec2, DVec3};
use rand::Rng;

use crate::defs::{
    Sound, BOMB_DAMP, BOMB_GRAVITY, BOMB_LIFETIME, BOMB_PARTICLE_COUNT, BOMB_POOL_CAPACITY,
    BOMB_SCALE, BOMB_THROW_HEIGHT, BOMB_THROW_VELOCITY, RICOCHET_MIN_SPEED,
};
use crate::renderer::{SpriteImage, SpritePool};
use crate::sim::particles::ParticlePool;
use crate::sim::player::Player;
use crate::sim::sounds::{distance_volume, SoundEvent, SoundQueue};
use crate::world::Scene;

/// A thrown bomb. Inactive slots have `lifetime <= 0` and are reused in
/// place; the pool never grows past its capacity.
#[derive(Debug, Clone, Copy)]
pub struct Bomb {
    pub position: DVec3,
    pub velocity: DVec3,
    pub lifetime: f64,
}

impl Bomb {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifetime > 0.0
    }
}

impl Default for Bomb {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            lifetime: 0.0,
        }
    }
}

pub struct BombPool {
    bombs: Vec<Bomb>,
}

impl Default for BombPool {
    fn default() -> Self {
        Self::with_capacity(BOMB_POOL_CAPACITY)
    }
}

impl BombPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bombs: vec![Bomb::default(); capacity],
        }
    }

    /// Arm the first free slot from the player's hands: a fixed upward
    /// throw along the facing direction. A full pool drops the throw.
    pub fn throw(&mut self, player: &Player) -> bool {
        let Some(bomb) = self.bombs.iter_mut().find(|b| !b.is_active()) else {
            tracing::debug!("bomb pool exhausted, throw dropped");
            return false;
        };
        let (sin, cos) = player.direction.sin_cos();
        bomb.position = DVec3::new(player.position.x, player.position.y, BOMB_THROW_HEIGHT);
        bomb.velocity = DVec3::new(cos, sin, 0.5).normalize() * BOMB_THROW_VELOCITY;
        bomb.lifetime = BOMB_LIFETIME;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bomb> {
        self.bombs.iter()
    }

    pub fn active_count(&self) -> usize {
        self.bombs.iter().filter(|b| b.is_active()).count()
    }
}

/// Integrate every live bomb: gravity, one horizontal step with
/// axis-flip bounces off wall cells, one vertical step bouncing between
/// the floor and z = 1, then either detonate or push the billboard.
///
/// The ricochet loudness test runs after damping, so low-energy bounces
/// go quiet one bounce earlier.
#[allow(clippy::too_many_arguments)]
pub fn update_bombs(
    bombs: &mut BombPool,
    scene: &Scene,
    player: &Player,
    particles: &mut ParticlePool,
    sprites: &mut SpritePool,
    sounds: &mut SoundQueue,
    image: SpriteImage,
    rng: &mut impl Rng,
    dt: f64,
) {
    for bomb in bombs.bombs.iter_mut() {
        if !bomb.is_active() {
            continue;
        }
        bomb.lifetime -= dt;
        bomb.velocity.z -= BOMB_GRAVITY * dt;

        let nx = bomb.position.x + bomb.velocity.x * dt;
        let ny = bomb.position.y + bomb.velocity.y * dt;
        if scene.is_wall(DVec2::new(nx, ny)) {
            // Flip only the axis whose integer cell changed, so grazing
            // hits keep their tangential motion.
            let dx = (bomb.position.x.floor() - nx.floor()).abs();
            let dy = (bomb.position.y.floor() - ny.floor()).abs();
            if dx > 0.0 {
                bomb.velocity.x *= -1.0;
            }
            if dy > 0.0 {
                bomb.velocity.y *= -1.0;
            }
            bomb.velocity *= BOMB_DAMP;
            if bomb.velocity.length() > RICOCHET_MIN_SPEED {
                sounds.push(SoundEvent {
                    sound: Sound::BombRicochet,
                    volume: distance_volume(player.position, bomb.position.truncate()),
                });
            }
        } else {
            bomb.position.x = nx;
            bomb.position.y = ny;
        }

        let nz = bomb.position.z + bomb.velocity.z * dt;
        if nz < BOMB_SCALE || nz > 1.0 {
            bomb.velocity.z *= -1.0;
            bomb.velocity *= BOMB_DAMP;
            if bomb.velocity.length() > RICOCHET_MIN_SPEED {
                sounds.push(SoundEvent {
                    sound: Sound::BombRicochet,
                    volume: distance_volume(player.position, bomb.position.truncate()),
                });
            }
        } else {
            bomb.position.z = nz;
        }

        if bomb.lifetime <= 0.0 {
            sounds.push(SoundEvent {
                sound: Sound::BombBlast,
                volume: distance_volume(player.position, bomb.position.truncate()),
            });
            particles.emit(bomb.position, BOMB_PARTICLE_COUNT, rng);
        } else {
            sprites.push(
                image,
                bomb.position.truncate(),
                bomb.position.z,
                BOMB_SCALE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::Color;
    use crate::world::Tile;
    use glam::dvec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn walled_scene() -> Scene {
        let mut row0 = vec![Tile::Empty; 7];
        for x in 2..=4 {
            row0[x] = Tile::Solid(Color::new(1.0, 0.0, 0.0, 1.0));
        }
        let mut rows = vec![row0];
        for _ in 0..6 {
            rows.push(vec![Tile::Empty; 7]);
        }
        Scene::from_rows(&rows)
    }

    fn bomb_image() -> SpriteImage {
        SpriteImage::Solid(Color::new(0.2, 0.2, 0.2, 1.0))
    }

    #[test]
    fn throw_arms_a_slot_with_the_facing_velocity() {
        let player = Player::new(dvec2(3.5, 3.5), 0.0);
        let mut pool = BombPool::default();
        assert!(pool.throw(&player));
        assert_eq!(pool.active_count(), 1);

        let bomb = pool.iter().find(|b| b.is_active()).unwrap();
        assert_eq!(bomb.position.z, BOMB_THROW_HEIGHT);
        assert!((bomb.velocity.length() - BOMB_THROW_VELOCITY).abs() < 1e-9);
        assert!(bomb.velocity.x > 0.0);
        assert!((bomb.velocity.y).abs() < 1e-9);
    }

    #[test]
    fn a_full_pool_drops_the_throw() {
        let player = Player::new(dvec2(3.5, 3.5), 0.0);
        let mut pool = BombPool::default();
        for _ in 0..BOMB_POOL_CAPACITY {
            assert!(pool.throw(&player));
        }
        assert!(!pool.throw(&player));
        assert_eq!(pool.active_count(), BOMB_POOL_CAPACITY);
    }

    #[test]
    fn wall_hit_flips_the_crossing_axis_and_damps() {
        let scene = walled_scene();
        let player = Player::new(dvec2(3.5, 3.5), 0.0);
        let mut pool = BombPool::default();
        pool.bombs[0] = Bomb {
            position: glam::DVec3::new(3.5, 1.02, 0.5),
            velocity: glam::DVec3::new(0.0, -5.0, 0.0),
            lifetime: 1.0,
        };
        let mut particles = ParticlePool::default();
        let mut sprites = SpritePool::default();
        let mut sounds = SoundQueue::new();
        let mut rng = SmallRng::seed_from_u64(7);

        update_bombs(
            &mut pool,
            &scene,
            &player,
            &mut particles,
            &mut sprites,
            &mut sounds,
            bomb_image(),
            &mut rng,
            1.0 / 60.0,
        );

        let bomb = &pool.bombs[0];
        // Flipped north->south and damped: +5 * 0.8.
        assert!((bomb.velocity.y - 4.0).abs() < 1e-9);
        // The blocked step does not move the bomb.
        assert!((bomb.position.y - 1.02).abs() < 1e-12);
        assert_eq!(
            sounds
                .iter()
                .filter(|e| e.sound == Sound::BombRicochet)
                .count(),
            1
        );
        assert_eq!(sprites.len(), 1);
    }

    #[test]
    fn floor_bounce_reflects_z() {
        let scene = walled_scene();
        let player = Player::new(dvec2(3.5, 3.5), 0.0);
        let mut pool = BombPool::default();
        pool.bombs[0] = Bomb {
            position: glam::DVec3::new(3.5, 3.5, 0.26),
            velocity: glam::DVec3::new(0.0, 0.0, -1.0),
            lifetime: 1.0,
        };
        let mut particles = ParticlePool::default();
        let mut sprites = SpritePool::default();
        let mut sounds = SoundQueue::new();
        let mut rng = SmallRng::seed_from_u64(7);

        update_bombs(
            &mut pool,
            &scene,
            &player,
            &mut particles,
            &mut sprites,
            &mut sounds,
            bomb_image(),
            &mut rng,
            1.0 / 60.0,
        );

        let bomb = &pool.bombs[0];
        assert!(bomb.velocity.z > 0.0);
        assert!((bomb.position.z - 0.26).abs() < 1e-12);
    }
}
