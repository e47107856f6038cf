//! Billboard sprite pipeline: cull → project → depth sort → blend.
//!
//! Gameplay pushes transient sprite records every frame; the pool is
//! cleared at frame start and never shrinks. Visible sprites are drawn
//! strictly back-to-front and depth-tested per column against the
//! z-buffer the wall pass produced.

use glam::DVec2;

use crate::defs::{Color, FAR_CLIPPING_PLANE, FOV, NEAR_CLIPPING_PLANE};
use crate::renderer::Display;
use crate::sim::Player;
use crate::world::{TextureBank, TextureId};

/// What a sprite samples from: a bank texture or a flat color whose
/// alpha drives the blend.
#[derive(Debug, Clone, Copy)]
pub enum SpriteImage {
    Texture(TextureId),
    Solid(Color),
}

#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub image: SpriteImage,
    pub position: DVec2,
    /// Height above the floor line: 0 rests on it, 1 touches the ceiling.
    pub z: f64,
    pub scale: f64,
    /// Perpendicular distance to the view plane, filled by projection.
    pub pdist: f64,
    /// Horizontal screen position in `[0, 1]`, filled by projection.
    pub t: f64,
}

/// Per-frame sprite records plus the projection scratch list. Both
/// vectors keep their capacity across frames.
#[derive(Default)]
pub struct SpritePool {
    sprites: Vec<Sprite>,
    visible: Vec<Sprite>,
}

impl SpritePool {
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn push(&mut self, image: SpriteImage, position: DVec2, z: f64, scale: f64) {
        self.sprites.push(Sprite {
            image,
            position,
            z,
            scale,
            pdist: 0.0,
            t: 0.0,
        });
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }
}

pub fn render_sprites(
    display: &mut Display,
    bank: &TextureBank,
    player: &Player,
    pool: &mut SpritePool,
) {
    let d = DVec2::from_angle(player.direction);
    let cos_half_fov = (FOV * 0.5).cos();
    let fov_span = player.fov_left.distance(player.fov_right);

    /* ---- cull + project --------------------------------------------- */
    pool.visible.clear();
    for sprite in &pool.sprites {
        let sp = sprite.position - player.position;
        let spl = sp.length();
        if spl <= NEAR_CLIPPING_PLANE || spl >= FAR_CLIPPING_PLANE {
            continue;
        }
        let cos = sp.dot(d) / spl;
        if cos < cos_half_fov {
            continue;
        }
        let pdist = sp.dot(d);
        if pdist < NEAR_CLIPPING_PLANE || pdist >= FAR_CLIPPING_PLANE {
            continue;
        }
        // Project onto the near segment and measure along it.
        let p = player.position + sp.normalize_or_zero() * (NEAR_CLIPPING_PLANE / cos);
        let t = player.fov_left.distance(p) / fov_span;
        pool.visible.push(Sprite {
            pdist,
            t,
            ..*sprite
        });
    }

    /* ---- painter's order: farthest first ----------------------------- */
    pool.visible
        .sort_by(|a, b| b.pdist.partial_cmp(&a.pdist).unwrap());

    /* ---- rasterize ---------------------------------------------------- */
    let w = display.width() as i64;
    let h = display.height() as i64;
    for sprite in &pool.visible {
        let cx = w as f64 * sprite.t;
        let cy = h as f64 * 0.5;
        let max_size = h as f64 / sprite.pdist;
        let size = max_size * sprite.scale;
        if size < 1.0 {
            continue;
        }

        let x1 = (cx - size * 0.5).floor() as i64;
        let x2 = x1 + size.floor() as i64 - 1;
        let bx1 = x1.max(0);
        let bx2 = x2.min(w - 1);

        let y1 = (cy + max_size * 0.5 - max_size * sprite.z).floor() as i64;
        let y2 = y1 + size.floor() as i64 - 1;
        let by1 = y1.max(0);
        let by2 = y2.min(h - 1);

        match sprite.image {
            SpriteImage::Texture(id) => {
                let tex = bank.texture(id);
                for x in bx1..=bx2 {
                    // Strict test: a sprite exactly on a wall loses.
                    if sprite.pdist >= display.zbuffer[x as usize] {
                        continue;
                    }
                    let tx =
                        ((((x - x1) as f64) / size) * tex.w as f64).min(tex.w as f64 - 1.0) as usize;
                    for y in by1..=by2 {
                        let ty = ((((y - y1) as f64) / size) * tex.h as f64)
                            .min(tex.h as f64 - 1.0) as usize;
                        let [r, g, b, a] = tex.texel(tx, ty);
                        display
                            .back
                            .blend(x as usize, y as usize, [r, g, b], a as f64 / 255.0);
                    }
                }
            }
            SpriteImage::Solid(color) => {
                let rgb = color.to_rgb8();
                for x in bx1..=bx2 {
                    if sprite.pdist >= display.zbuffer[x as usize] {
                        continue;
                    }
                    for y in by1..=by2 {
                        display.back.blend(x as usize, y as usize, rgb, color.a);
                    }
                }
            }
        }
    }
}
