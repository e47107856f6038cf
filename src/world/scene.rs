use glam::DVec2;

use crate::defs::{Color, CEILING1, CEILING2, FLOOR1, FLOOR2};
use crate::world::texture::TextureId;

/// One grid cell. A cell is a wall iff it is not [`Tile::Empty`].
///
/// Textured cells hold a bank handle rather than pixel storage, so tiles
/// stay `Copy` and the grid is a flat dense array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    Empty,
    Solid(Color),
    Textured(TextureId),
}

impl Tile {
    #[inline]
    pub fn is_wall(&self) -> bool {
        !matches!(self, Tile::Empty)
    }
}

/// Rectangular tile grid, stored row-major. Rows shorter than the widest
/// one are padded with [`Tile::Empty`].
pub struct Scene {
    width: usize,
    height: usize,
    walls: Vec<Tile>,
}

impl Scene {
    pub fn from_rows(rows: &[Vec<Tile>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut walls = Vec::with_capacity(width * height);
        for row in rows {
            walls.extend_from_slice(row);
            walls.extend(std::iter::repeat(Tile::Empty).take(width - row.len()));
        }
        Self {
            width,
            height,
            walls,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Does the cell under `p` lie inside the grid?
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        let (x, y) = (p.x.floor(), p.y.floor());
        0.0 <= x && x < self.width as f64 && 0.0 <= y && y < self.height as f64
    }

    /// Tile of the cell under `p`; [`Tile::Empty`] outside the grid.
    #[inline]
    pub fn tile_at(&self, p: DVec2) -> Tile {
        if !self.contains(p) {
            return Tile::Empty;
        }
        let (x, y) = (p.x.floor() as usize, p.y.floor() as usize);
        self.walls[y * self.width + x]
    }

    #[inline]
    pub fn is_wall(&self, p: DVec2) -> bool {
        self.tile_at(p).is_wall()
    }

    /// True when the axis-aligned box `size` centred on `center` overlaps
    /// no wall cell. Checks every integer cell the box touches.
    pub fn can_rectangle_fit(&self, center: DVec2, size: DVec2) -> bool {
        let x1 = (center.x - size.x * 0.5).floor() as i64;
        let x2 = (center.x + size.x * 0.5).floor() as i64;
        let y1 = (center.y - size.y * 0.5).floor() as i64;
        let y2 = (center.y + size.y * 0.5).floor() as i64;
        for y in y1..=y2 {
            for x in x1..=x2 {
                if self.is_wall(DVec2::new(x as f64, y as f64)) {
                    return false;
                }
            }
        }
        true
    }

    /// Floor color under `p`: a two-tone checker over the floored
    /// coordinates. Not stored per cell.
    #[inline]
    pub fn floor_at(p: DVec2) -> Color {
        if checker(p) {
            FLOOR1
        } else {
            FLOOR2
        }
    }

    /// Ceiling color above `p`, same checker rule as the floor.
    #[inline]
    pub fn ceiling_at(p: DVec2) -> Color {
        if checker(p) {
            CEILING1
        } else {
            CEILING2
        }
    }
}

#[inline]
fn checker(p: DVec2) -> bool {
    ((p.x.floor() + p.y.floor()) as i64).rem_euclid(2) == 0
}
