//! The frame driver.
//!
//! [`Game`] owns the world and runs the fixed per-frame sequence:
//! player kinematics, then entity updates (which fill the sprite pool
//! and the sound queue), then the render passes in floor/walls/sprites
//! order so the z-buffer is produced before it is consumed, then the
//! overlays. One call to [`Game::render_frame`] is one frame; there is
//! no other scheduler.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::defs::{FPS_SAMPLE_COUNT, MAX_FRAME_TIME};
use crate::renderer::{
    self, render_floor_and_ceiling, render_minimap, render_sprites, render_walls, Display,
    SpriteImage, SpritePool,
};
use crate::sim::{
    update_bombs, update_items, update_particles, AudioSink, BombPool, Item, ParticlePool, Player,
    SoundQueue,
};
use crate::world::{Scene, TextureBank};

/// Rolling average of recent frame times for the HUD readout.
#[derive(Debug)]
pub struct FpsCounter {
    samples: [f64; FPS_SAMPLE_COUNT],
    cursor: usize,
    len: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            samples: [0.0; FPS_SAMPLE_COUNT],
            cursor: 0,
            len: 0,
        }
    }
}

impl FpsCounter {
    pub fn push(&mut self, dt: f64) {
        self.samples[self.cursor] = dt;
        self.cursor = (self.cursor + 1) % FPS_SAMPLE_COUNT;
        self.len = (self.len + 1).min(FPS_SAMPLE_COUNT);
    }

    /// `floor(1 / avg)` over the window, 0 while the window is empty or
    /// the clock has not advanced.
    pub fn fps(&self) -> u32 {
        if self.len == 0 {
            return 0;
        }
        let avg = self.samples[..self.len].iter().sum::<f64>() / self.len as f64;
        if avg > 0.0 {
            (1.0 / avg) as u32
        } else {
            0
        }
    }
}

/// Whole-world state plus the per-frame machinery.
pub struct Game {
    pub scene: Scene,
    pub player: Player,
    pub items: Vec<Item>,
    pub bombs: BombPool,
    pub particles: ParticlePool,
    /// Overlay switches; the minimap is on by default, sprite markers
    /// are a debug aid.
    pub minimap: bool,
    pub minimap_sprites: bool,

    sprites: SpritePool,
    bomb_image: SpriteImage,
    rng: SmallRng,
    fps: FpsCounter,
    time: f64,
}

impl Game {
    /// `seed` fixes the particle randomness; replays and tests pass a
    /// constant, hosts usually pass the clock.
    pub fn new(
        scene: Scene,
        player: Player,
        items: Vec<Item>,
        bomb_image: SpriteImage,
        seed: u64,
    ) -> Self {
        Self {
            scene,
            player,
            items,
            bombs: BombPool::default(),
            particles: ParticlePool::default(),
            minimap: true,
            minimap_sprites: false,
            sprites: SpritePool::default(),
            bomb_image,
            rng: SmallRng::seed_from_u64(seed),
            fps: FpsCounter::default(),
            time: 0.0,
        }
    }

    /// Host input edge: lob a bomb along the facing direction. Dropped
    /// silently when all slots are airborne.
    pub fn throw_bomb(&mut self) -> bool {
        self.bombs.throw(&self.player)
    }

    /// Advance the simulation by `dt` seconds and drain sound requests
    /// into `audio`. `dt` is clamped so a stalled host cannot push
    /// entities through walls.
    pub fn update(&mut self, dt: f64, audio: &mut dyn AudioSink) {
        self.fps.push(dt);
        let dt = dt.min(MAX_FRAME_TIME);
        self.time += dt;

        self.sprites.clear();
        let mut sounds = SoundQueue::new();

        self.player.update(&self.scene, dt);
        update_items(
            &mut self.items,
            &self.player,
            self.time,
            &mut self.sprites,
            &mut sounds,
        );
        update_bombs(
            &mut self.bombs,
            &self.scene,
            &self.player,
            &mut self.particles,
            &mut self.sprites,
            &mut sounds,
            self.bomb_image,
            &mut self.rng,
            dt,
        );
        update_particles(&mut self.particles, &self.scene, &mut self.sprites, dt);

        for event in sounds {
            audio.play(event.sound, event.volume);
        }
    }

    /// Paint one frame of the current state into `display`.
    pub fn render(&mut self, display: &mut Display, bank: &TextureBank) {
        render_floor_and_ceiling(display, &self.player);
        render_walls(display, bank, &self.scene, &self.player);
        render_sprites(display, bank, &self.player, &mut self.sprites);

        if self.minimap {
            let markers = self.minimap_sprites.then_some(&self.sprites);
            render_minimap(display, &self.scene, &self.player, markers);
        }

        let fps = self.fps.fps();
        let scale = 2;
        let x = display.width() as i64 - renderer::number_width(fps, scale) - 8;
        renderer::draw_number(&mut display.back, x, 8, fps, scale, [255, 255, 255]);
    }

    /// One full frame: simulate, then draw.
    pub fn render_frame(
        &mut self,
        display: &mut Display,
        bank: &TextureBank,
        audio: &mut dyn AudioSink,
        dt: f64,
    ) {
        self.update(dt, audio);
        self.render(display, bank);
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn sprites(&self) -> &SpritePool {
        &self.sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_averages_its_window() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.fps(), 0);
        for _ in 0..10 {
            fps.push(1.0 / 60.0);
        }
        let fps_60 = fps.fps();
        assert!((59..=60).contains(&fps_60), "got {fps_60}");
        for _ in 0..FPS_SAMPLE_COUNT {
            fps.push(0.5);
        }
        // Old samples age out entirely.
        assert_eq!(fps.fps(), 2);
    }

    #[test]
    fn fps_counter_handles_a_stopped_clock() {
        let mut fps = FpsCounter::default();
        fps.push(0.0);
        fps.push(0.0);
        assert_eq!(fps.fps(), 0);
    }
}
