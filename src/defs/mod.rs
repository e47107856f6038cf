pub mod color;
pub mod sound;

pub use self::{color::Color, sound::Sound};

use std::f64::consts::PI;

/* ----------------------------------------------------------------- */
/*  Projection                                                       */
/* ----------------------------------------------------------------- */
pub const EPS: f64 = 1e-6;
pub const FOV: f64 = PI * 0.5;
pub const NEAR_CLIPPING_PLANE: f64 = 0.1;
pub const FAR_CLIPPING_PLANE: f64 = 10.0;

/// Back buffer is 16:9 at a deliberately chunky software resolution;
/// the host upscales with nearest-neighbour.
pub const SCREEN_FACTOR: usize = 30;
pub const SCREEN_WIDTH: usize = 16 * SCREEN_FACTOR;
pub const SCREEN_HEIGHT: usize = 9 * SCREEN_FACTOR;

/* ----------------------------------------------------------------- */
/*  Player                                                           */
/* ----------------------------------------------------------------- */
pub const PLAYER_SPEED: f64 = 2.0; // world units / s
pub const PLAYER_TURN_SPEED: f64 = PI * 0.75; // rad / s
pub const PLAYER_SIZE: f64 = 0.5; // collision box side
pub const PLAYER_RADIUS: f64 = 0.5; // pickup reach

/* ----------------------------------------------------------------- */
/*  Bombs & particles (f64 world-units, seconds)                     */
/* ----------------------------------------------------------------- */
pub const BOMB_POOL_CAPACITY: usize = 10;
pub const BOMB_LIFETIME: f64 = 2.0;
pub const BOMB_THROW_HEIGHT: f64 = 0.6;
pub const BOMB_THROW_VELOCITY: f64 = 5.0;
pub const BOMB_GRAVITY: f64 = 10.0;
pub const BOMB_DAMP: f64 = 0.8;
pub const BOMB_SCALE: f64 = 0.25;
pub const BOMB_PARTICLE_COUNT: usize = 50;

pub const PARTICLE_POOL_CAPACITY: usize = 1000;
pub const PARTICLE_LIFETIME: f64 = 1.0;
pub const PARTICLE_GRAVITY: f64 = 10.0;
pub const PARTICLE_DAMP: f64 = 0.8;
pub const PARTICLE_SCALE: f64 = 0.1;
pub const PARTICLE_MAX_SPEED: f64 = 8.0;
pub const PARTICLE_COLOR: Color = Color::new(1.0, 0.5, 0.15, 1.0);

/// Bounces slower than this stay silent. Checked after damping.
pub const RICOCHET_MIN_SPEED: f64 = 1.0;

/* ----------------------------------------------------------------- */
/*  Items                                                            */
/* ----------------------------------------------------------------- */
pub const ITEM_SCALE: f64 = 0.25;
pub const ITEM_BOB_AMPLITUDE: f64 = 0.07;
pub const ITEM_BOB_FREQUENCY: f64 = 0.7;

/* ----------------------------------------------------------------- */
/*  Floor / ceiling checker palette                                  */
/* ----------------------------------------------------------------- */
pub const FLOOR1: Color = Color::new(0.094, 0.144, 0.144, 1.0);
pub const FLOOR2: Color = Color::new(0.188, 0.238, 0.238, 1.0);
pub const CEILING1: Color = Color::new(0.144, 0.094, 0.094, 1.0);
pub const CEILING2: Color = Color::new(0.238, 0.188, 0.188, 1.0);

/* ----------------------------------------------------------------- */
/*  Frame driver                                                     */
/* ----------------------------------------------------------------- */
/// Long stalls step the simulation by at most this much, so a dropped
/// frame cannot tunnel entities through walls.
pub const MAX_FRAME_TIME: f64 = 0.1;
pub const FPS_SAMPLE_COUNT: usize = 60;

/* ----------------------------------------------------------------- */
/*  Minimap                                                          */
/* ----------------------------------------------------------------- */
pub const MINIMAP_SCALE: f64 = 0.03; // cell size as a share of screen width
pub const MINIMAP_BACKGROUND: Color = Color::new(0.094, 0.094, 0.094, 1.0); // #181818
pub const MINIMAP_GRID: Color = Color::new(0.188, 0.188, 0.188, 1.0); // #303030
pub const MINIMAP_PLAYER: Color = Color::new(1.0, 0.0, 1.0, 1.0);
