//! Top-down debug overlay: the grid, solid cells, the player box and
//! the near-clip segment, drawn in the top-left corner of the back
//! buffer after the 3-D passes.

use glam::DVec2;

use crate::defs::{MINIMAP_BACKGROUND, MINIMAP_GRID, MINIMAP_PLAYER, MINIMAP_SCALE, PLAYER_SIZE};
use crate::renderer::{Display, SpritePool};
use crate::sim::Player;
use crate::world::{Scene, Tile};

pub fn render_minimap(
    display: &mut Display,
    scene: &Scene,
    player: &Player,
    sprites: Option<&SpritePool>,
) {
    let fb = &mut display.back;
    let cell = fb.width() as f64 * MINIMAP_SCALE;
    let ox = fb.width() as f64 * MINIMAP_SCALE;
    let oy = fb.height() as f64 * MINIMAP_SCALE;

    let to_px = |p: DVec2| -> (i64, i64) {
        (
            (ox + p.x * cell).round() as i64,
            (oy + p.y * cell).round() as i64,
        )
    };
    let grid_w = scene.width() as f64;
    let grid_h = scene.height() as f64;

    /* ---- background + solid cells ------------------------------------ */
    let (bx, by) = to_px(DVec2::ZERO);
    let (bx1, by1) = to_px(DVec2::new(grid_w, grid_h));
    fb.fill_rect(bx, by, bx1 - bx, by1 - by, MINIMAP_BACKGROUND.to_rgb8());

    for gy in 0..scene.height() {
        for gx in 0..scene.width() {
            let p = DVec2::new(gx as f64, gy as f64);
            if let Tile::Solid(color) = scene.tile_at(p) {
                let (cx0, cy0) = to_px(p);
                let (cx1, cy1) = to_px(p + DVec2::ONE);
                fb.fill_rect(cx0, cy0, cx1 - cx0, cy1 - cy0, color.to_rgb8());
            }
        }
    }

    /* ---- grid lines --------------------------------------------------- */
    let grid_rgb = MINIMAP_GRID.to_rgb8();
    for gx in 0..=scene.width() {
        let (x0, y0) = to_px(DVec2::new(gx as f64, 0.0));
        let (x1, y1) = to_px(DVec2::new(gx as f64, grid_h));
        fb.draw_line(x0, y0, x1, y1, grid_rgb);
    }
    for gy in 0..=scene.height() {
        let (x0, y0) = to_px(DVec2::new(0.0, gy as f64));
        let (x1, y1) = to_px(DVec2::new(grid_w, gy as f64));
        fb.draw_line(x0, y0, x1, y1, grid_rgb);
    }

    /* ---- player box + field of view ----------------------------------- */
    let player_rgb = MINIMAP_PLAYER.to_rgb8();
    let half = DVec2::splat(PLAYER_SIZE * 0.5);
    let (px0, py0) = to_px(player.position - half);
    let (px1, py1) = to_px(player.position + half);
    fb.fill_rect(px0, py0, px1 - px0, py1 - py0, player_rgb);

    let (plx, ply) = to_px(player.position);
    let (flx, fly) = to_px(player.fov_left);
    let (frx, fry) = to_px(player.fov_right);
    fb.draw_line(flx, fly, frx, fry, player_rgb);
    fb.draw_line(plx, ply, flx, fly, player_rgb);
    fb.draw_line(plx, ply, frx, fry, player_rgb);

    /* ---- optional sprite markers -------------------------------------- */
    if let Some(pool) = sprites {
        for sprite in pool.iter() {
            let (sx, sy) = to_px(sprite.position);
            fb.fill_rect(sx - 1, sy - 1, 2, 2, [255, 0, 0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::Color;
    use glam::dvec2;

    #[test]
    fn player_cell_and_background_are_painted() {
        let scene = Scene::from_rows(&[
            vec![Tile::Solid(Color::new(0.0, 1.0, 0.0, 1.0)); 4],
            vec![Tile::Empty; 4],
        ]);
        let player = Player::new(dvec2(1.5, 1.5), 0.0);
        let mut display = Display::new(480, 270);

        render_minimap(&mut display, &scene, &player, None);

        let cell = 480.0 * MINIMAP_SCALE; // 14.4 px
        let ox = 480.0 * MINIMAP_SCALE;
        let oy = 270.0 * MINIMAP_SCALE;

        // Inside wall cell (0, 0): solid green fill.
        let x = (ox + 0.5 * cell) as usize;
        let y = (oy + 0.5 * cell) as usize;
        assert_eq!(display.back.get(x, y), [0, 255, 0]);

        // Player square centre: magenta.
        let x = (ox + 1.5 * cell) as usize;
        let y = (oy + 1.5 * cell) as usize;
        assert_eq!(display.back.get(x, y), [255, 0, 255]);

        // Far outside the minimap: untouched.
        assert_eq!(display.back.get(400, 200), [0, 0, 0]);
    }
}
