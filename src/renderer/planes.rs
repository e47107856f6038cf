//! Floor and ceiling pass.
//!
//! Each screen row below the horizon maps to one world-space distance;
//! its mirror row above the horizon samples the ceiling at the same
//! distance. Two world points at the row's screen edges are interpolated
//! per column, so the inner loop is a plain lerp plus a checker lookup.
//!
//! Shading multiplies the color by the world distance to the sample.
//! Far rows therefore brighten and saturate to white at the horizon.
//! That is the engine's look, not a bug; the u8 write clips.

use crate::defs::NEAR_CLIPPING_PLANE;
use crate::renderer::Display;
use crate::sim::Player;
use crate::world::Scene;

pub fn render_floor_and_ceiling(display: &mut Display, player: &Player) {
    let w = display.width();
    let h = display.height();
    let pz = h as f64 * 0.5;

    let to_left = player.fov_left - player.position;
    let to_right = player.fov_right - player.position;
    let bp = to_left.length();

    for y in h / 2..h {
        let sz = h - y - 1;
        let ap = pz - sz as f64;
        let b = (bp / ap) * pz / NEAR_CLIPPING_PLANE;

        let t1 = player.position + to_left.normalize_or_zero() * b;
        let t2 = player.position + to_right.normalize_or_zero() * b;

        for x in 0..w {
            let t = t1.lerp(t2, x as f64 / w as f64);
            let shade = player.position.distance(t);

            let floor = Scene::floor_at(t).scaled(shade);
            display.back.put(x, y, floor.to_rgb8());

            let ceiling = Scene::ceiling_at(t).scaled(shade);
            display.back.put(x, sz, ceiling.to_rgb8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{CEILING1, FLOOR1};
    use glam::dvec2;

    #[test]
    fn bottom_row_center_samples_one_unit_ahead() {
        // At the bottom row the sampled distance works out to
        // bp / NEAR = 1 / cos(FOV/2) along the edge rays, which is one
        // world unit straight ahead at the centre column.
        let player = Player::new(dvec2(3.5, 2.5), -std::f64::consts::FRAC_PI_2);
        let mut display = Display::new(480, 270);

        render_floor_and_ceiling(&mut display, &player);

        // Straight ahead one unit: cell (3, 1), checker even -> tone 1,
        // shaded by distance 1.0, i.e. the raw palette constant.
        assert_eq!(display.back.get(240, 269), FLOOR1.scaled(1.0).to_rgb8());
        assert_eq!(display.back.get(240, 0), CEILING1.scaled(1.0).to_rgb8());
    }

    #[test]
    fn both_halves_are_fully_painted() {
        let player = Player::new(dvec2(3.5, 2.5), 0.3);
        let mut display = Display::new(480, 270);

        render_floor_and_ceiling(&mut display, &player);

        // The dimmest palette channel times the shortest sampled
        // distance still lands above zero, so black means unpainted.
        for y in 0..270 {
            for x in [0, 123, 479] {
                assert_ne!(display.back.get(x, y), [0, 0, 0], "unpainted at {x},{y}");
            }
        }
    }
}
