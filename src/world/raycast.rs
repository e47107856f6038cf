//! Closed-form grid ray marching.
//!
//! Instead of a classic DDA accumulator the caster recomputes, from the
//! current segment `p1 → p2`, the nearest cell-boundary crossing past
//! `p2`. A small epsilon bias keeps the crossing on the far side of the
//! boundary so repeated steps never stall on a gridline.

use glam::DVec2;

use crate::defs::{EPS, FAR_CLIPPING_PLANE};
use crate::world::scene::Scene;

/// Three-valued sign. `f64::signum` maps `0.0` to `1.0`, which would
/// bias axis-parallel rays; the snap rules below need `sign(0) = 0`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Push `x` to the next integer in the direction of travel `dx`, biased
/// past the boundary by [`EPS`]. `dx = 0` leaves `x` where it is.
#[inline]
pub fn snap(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        (x + sign(dx) * EPS).ceil()
    } else if dx < 0.0 {
        (x + sign(dx) * EPS).floor()
    } else {
        x
    }
}

/// The integer cell a crossing at `p2` (reached from `p1`) belongs to,
/// biased to the forward side of the boundary on both axes.
#[inline]
pub fn hitting_cell(p1: DVec2, p2: DVec2) -> DVec2 {
    let d = p2 - p1;
    DVec2::new(
        (p2.x + sign(d.x) * EPS).floor(),
        (p2.y + sign(d.y) * EPS).floor(),
    )
}

/// Next cell-boundary crossing after `p2` on the ray `p1 → p2`.
///
/// Candidate crossings with the next vertical and (slope permitting)
/// horizontal gridline are compared by distance to `p2`; a vertical ray
/// steps in y only.
pub fn ray_step(p1: DVec2, p2: DVec2) -> DVec2 {
    let d = p2 - p1;
    if d.x != 0.0 {
        let k = d.y / d.x;
        let c = p1.y - k * p1.x;

        let x3 = snap(p2.x, d.x);
        let mut p3 = DVec2::new(x3, x3 * k + c);

        if k != 0.0 {
            let y3 = snap(p2.y, d.y);
            let cand = DVec2::new((y3 - c) / k, y3);
            if p2.distance_squared(cand) < p2.distance_squared(p3) {
                p3 = cand;
            }
        }
        p3
    } else {
        DVec2::new(p2.x, snap(p2.y, d.y))
    }
}

/// March the ray `p1 → p2` across the grid until the forward cell is a
/// wall or the travelled distance exceeds the far clipping plane.
/// Returns the final crossing point (which may lie past the far plane by
/// one step; callers treat anything at or beyond FAR as a miss).
pub fn cast_ray(scene: &Scene, mut p1: DVec2, mut p2: DVec2) -> DVec2 {
    let start = p1;
    while start.distance_squared(p1) < FAR_CLIPPING_PLANE * FAR_CLIPPING_PLANE {
        let cell = hitting_cell(p1, p2);
        if scene.is_wall(cell) {
            break;
        }
        let p3 = ray_step(p1, p2);
        p1 = p2;
        p2 = p3;
    }
    p2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::Color;
    use crate::world::scene::Tile;
    use glam::dvec2;

    fn walled_scene() -> Scene {
        // 7x7, walls at (2,0), (3,0), (4,0).
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

    #[test]
    fn normalize_then_rescale_roundtrips() {
        for v in [dvec2(3.0, -4.0), dvec2(0.1, 0.2), dvec2(-7.5, 0.0)] {
            let back = v.normalize_or_zero() * v.length();
            assert!((back - v).length() < 1e-9);
        }
    }

    #[test]
    fn normalizing_zero_stays_zero() {
        let z = DVec2::ZERO.normalize_or_zero();
        assert_eq!(z, DVec2::ZERO);
        assert!(!z.x.is_nan() && !z.y.is_nan());
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn step_crosses_the_nearer_gridline() {
        // 45-degree ray from (0.5, 0.5): both axes cross at (1, 1).
        let p = ray_step(dvec2(0.5, 0.5), dvec2(0.6, 0.6));
        assert!((p - dvec2(1.0, 1.0)).length() < 1e-9);

        // Shallow ray: vertical gridline comes first.
        let p = ray_step(dvec2(0.5, 0.5), dvec2(0.9, 0.6));
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!(p.y < 1.0);
    }

    #[test]
    fn vertical_ray_steps_y_only() {
        let p = ray_step(dvec2(2.5, 0.9), dvec2(2.5, 1.3));
        assert!((p - dvec2(2.5, 2.0)).length() < 1e-9);
        let p = ray_step(dvec2(2.5, 1.3), dvec2(2.5, 0.9));
        assert!((p - dvec2(2.5, 0.0)).length() < 1e-9);
    }

    #[test]
    fn horizontal_ray_keeps_its_row() {
        let p = ray_step(dvec2(0.5, 1.5), dvec2(0.75, 1.5));
        assert!((p - dvec2(1.0, 1.5)).length() < 1e-9);
    }

    #[test]
    fn hitting_cell_biases_forward_on_both_axes() {
        // Crossing exactly on the corner (2, 1), travelling down-right:
        // the forward cell is (2, 1).
        let cell = hitting_cell(dvec2(1.5, 0.5), dvec2(2.0, 1.0));
        assert_eq!(cell, dvec2(2.0, 1.0));
        // Same corner, travelling up-left: the forward cell is (1, 0).
        let cell = hitting_cell(dvec2(2.5, 1.5), dvec2(2.0, 1.0));
        assert_eq!(cell, dvec2(1.0, 0.0));
    }

    #[test]
    fn cast_ray_hits_the_wall_face() {
        let scene = walled_scene();
        // Straight north from (3.5, 1.5): wall cell (3, 0), face at y = 1.
        let hit = cast_ray(&scene, dvec2(3.5, 1.5), dvec2(3.5, 1.4));
        assert!((hit.x - 3.5).abs() < 1e-9);
        assert!((hit.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cast_ray_escaping_the_grid_runs_to_the_far_plane() {
        let scene = walled_scene();
        let start = dvec2(3.5, 3.5);
        let hit = cast_ray(&scene, start, dvec2(3.6, 3.5));
        assert!(start.distance(hit) >= FAR_CLIPPING_PLANE);
    }

    #[test]
    fn cast_ray_direction_sample_is_idempotent() {
        // Two samples along the same direction resolve to the same hit.
        let scene = walled_scene();
        let p = dvec2(3.5, 2.5);
        let d = dvec2(0.0, -1.0);
        let a = cast_ray(&scene, p, p + d * 1e-3);
        let b = cast_ray(&scene, p, p + d * 2e-3);
        assert!((a - b).length() < 1e-9);
    }
}
