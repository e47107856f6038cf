//! Interactive demo: a small bordered map, two wall texture sets, a few
//! pickups and throwable bombs.
//!
//! ```bash
//! cargo run --release --bin play
//! ```
//!
//! W/S or ↑/↓ walk, A/D or ←/→ turn, Space throws a bomb, M toggles the
//! minimap, Escape quits.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

use gridcaster::defs::{Color, Sound, SCREEN_HEIGHT, SCREEN_WIDTH};
use gridcaster::renderer::SpriteImage;
use gridcaster::sim::{AudioSink, InputState, Item, ItemKind, Player};
use gridcaster::world::{Texture, TextureBank, Tile};
use gridcaster::{Display, Game, Scene};

/// Window is the back buffer upscaled 3x; minifb does the stretch.
const WINDOW_SCALE: usize = 3;

/// Sink that narrates playback requests instead of producing audio.
struct TraceSink;

impl AudioSink for TraceSink {
    fn play(&mut self, sound: Sound, volume: f64) {
        tracing::debug!(?sound, volume, "play");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut bank = TextureBank::new();
    let brick = bank.insert("BRICK", brick_texture())?;
    let plate = bank.insert("PLATE", plate_texture())?;
    let key_image = SpriteImage::Texture(bank.insert("KEY", key_texture())?);
    let bomb_image = SpriteImage::Texture(bank.insert("BOMB", bomb_texture())?);

    let scene = demo_scene(brick, plate);
    let player = Player::new(glam::dvec2(4.5, 6.5), -std::f64::consts::FRAC_PI_2);
    let items = vec![
        Item::new(ItemKind::Key, key_image, glam::dvec2(2.5, 2.5)),
        Item::new(ItemKind::Key, key_image, glam::dvec2(6.5, 2.5)),
        Item::new(ItemKind::Bomb, bomb_image, glam::dvec2(7.5, 6.5)),
    ];

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed);
    let mut game = Game::new(scene, player, items, bomb_image, seed);
    let mut display = Display::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut audio = TraceSink;

    let mut window = Window::new(
        "gridcaster",
        SCREEN_WIDTH * WINDOW_SCALE,
        SCREEN_HEIGHT * WINDOW_SCALE,
        WindowOptions::default(),
    )?;
    window.set_target_fps(60);

    tracing::info!("world ready, entering the frame loop");

    let mut blit = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
    let mut last: Option<Instant> = None;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        /* ---- sample input ------------------------------------------- */
        let mut input = InputState::empty();
        if window.is_key_down(Key::W) || window.is_key_down(Key::Up) {
            input |= InputState::FORWARD;
        }
        if window.is_key_down(Key::S) || window.is_key_down(Key::Down) {
            input |= InputState::BACKWARD;
        }
        if window.is_key_down(Key::A) || window.is_key_down(Key::Left) {
            input |= InputState::TURN_LEFT;
        }
        if window.is_key_down(Key::D) || window.is_key_down(Key::Right) {
            input |= InputState::TURN_RIGHT;
        }
        game.player.input = input;

        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            game.throw_bomb();
        }
        if window.is_key_pressed(Key::M, KeyRepeat::No) {
            game.minimap = !game.minimap;
        }

        /* ---- one frame ---------------------------------------------- */
        let now = Instant::now();
        let dt = last.map(|t| (now - t).as_secs_f64()).unwrap_or(0.0);
        last = Some(now);

        game.render_frame(&mut display, &bank, &mut audio, dt);

        /* ---- blit RGBA8 into minifb's 0RGB words --------------------- */
        for (dst, src) in blit.iter_mut().zip(display.back.pixels().chunks_exact(4)) {
            *dst = (src[0] as u32) << 16 | (src[1] as u32) << 8 | src[2] as u32;
        }
        window.update_with_buffer(&blit, SCREEN_WIDTH, SCREEN_HEIGHT)?;
        window.set_title(&format!("gridcaster  {} fps", game.fps()));
    }
    Ok(())
}

/* ----------------------------------------------------------------- */
/*  Demo content: a bordered 9x9 yard with a few inner walls          */
/* ----------------------------------------------------------------- */

fn demo_scene(brick: gridcaster::world::TextureId, plate: gridcaster::world::TextureId) -> Scene {
    let b = Tile::Textured(brick);
    let p = Tile::Textured(plate);
    let c = Tile::Solid(Color::new(0.2, 0.25, 0.4, 1.0));
    let e = Tile::Empty;

    Scene::from_rows(&[
        vec![b, b, b, b, b, b, b, b, b],
        vec![b, e, e, e, e, e, e, e, b],
        vec![b, e, p, e, e, e, p, e, b],
        vec![b, e, p, e, c, e, p, e, b],
        vec![b, e, e, e, e, e, e, e, b],
        vec![b, e, b, b, e, b, b, e, b],
        vec![b, e, e, e, e, e, e, e, b],
        vec![b, e, e, e, e, e, e, e, b],
        vec![b, b, b, b, b, b, b, b, b],
    ])
}

fn brick_texture() -> Texture {
    const SIZE: usize = 32;
    let mut pixels = vec![0u8; SIZE * SIZE * 4];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let course = y / 8;
            let shift = if course % 2 == 0 { 0 } else { 4 };
            let mortar = y % 8 == 0 || (x + shift) % 8 == 0;
            let rgb: [u8; 3] = if mortar {
                [136, 130, 124]
            } else {
                // a little per-texel variation so courses do not band
                let n = ((x * 7 + y * 13) % 5) as u8 * 6;
                [158 + n.min(24), 74 + n / 2, 64]
            };
            let i = (y * SIZE + x) * 4;
            pixels[i..i + 3].copy_from_slice(&rgb);
            pixels[i + 3] = 255;
        }
    }
    Texture::from_rgba8(SIZE, SIZE, pixels).expect("brick buffer is sized to fit")
}

fn plate_texture() -> Texture {
    const SIZE: usize = 32;
    let mut pixels = vec![0u8; SIZE * SIZE * 4];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let edge = x % 16 == 0 || y % 16 == 0;
            let rivet = (x % 16 == 2 || x % 16 == 13) && (y % 16 == 2 || y % 16 == 13);
            let rgb: [u8; 3] = if edge {
                [70, 78, 88]
            } else if rivet {
                [160, 170, 182]
            } else {
                [108, 118, 130]
            };
            let i = (y * SIZE + x) * 4;
            pixels[i..i + 3].copy_from_slice(&rgb);
            pixels[i + 3] = 255;
        }
    }
    Texture::from_rgba8(SIZE, SIZE, pixels).expect("plate buffer is sized to fit")
}

fn key_texture() -> Texture {
    const SIZE: usize = 16;
    let mut pixels = vec![0u8; SIZE * SIZE * 4];
    for y in 0..SIZE {
        for x in 0..SIZE {
            // ring on the left, teeth on the right
            let ring = {
                let dx = x as i32 - 5;
                let dy = y as i32 - 8;
                let d2 = dx * dx + dy * dy;
                (6..=12).contains(&d2)
            };
            let shaft = (8..=14).contains(&x) && y == 8;
            let teeth = (x == 12 || x == 14) && (9..=10).contains(&y);
            let i = (y * SIZE + x) * 4;
            if ring || shaft || teeth {
                pixels[i..i + 4].copy_from_slice(&[232, 202, 66, 255]);
            }
        }
    }
    Texture::from_rgba8(SIZE, SIZE, pixels).expect("key buffer is sized to fit")
}

fn bomb_texture() -> Texture {
    const SIZE: usize = 16;
    let mut pixels = vec![0u8; SIZE * SIZE * 4];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as i32 - 8;
            let dy = y as i32 - 9;
            let body = dx * dx + dy * dy <= 30;
            let glint = dx * dx + dy * dy <= 30 && dx < -2 && dy < -2;
            let fuse = x == 10 && (2..=4).contains(&y);
            let i = (y * SIZE + x) * 4;
            if fuse {
                pixels[i..i + 4].copy_from_slice(&[196, 148, 90, 255]);
            } else if glint {
                pixels[i..i + 4].copy_from_slice(&[96, 96, 104, 255]);
            } else if body {
                pixels[i..i + 4].copy_from_slice(&[34, 34, 40, 255]);
            }
        }
    }
    Texture::from_rgba8(SIZE, SIZE, pixels).expect("bomb buffer is sized to fit")
}
