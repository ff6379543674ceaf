//! Exact hex/line intersection for line of sight
//!
//! Hex centres are mapped onto an integer lattice: column `x` lands at
//! `cx = 3x` and row `y` at `cy = 2y + (x & 1)`. On that lattice every
//! hexagon vertex is an integer point, and the true board is the lattice
//! scaled vertically by √3. Scaling does not change which side of a line
//! a point falls on, so the intersection test below is exact integer
//! arithmetic with no tolerance.

use std::cmp::Ordering;

use crate::board::coords::Coords;

/// A hexagon on the integer lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdealHex {
    pub cx: i64,
    pub cy: i64,
}

impl IdealHex {
    pub fn of(c: Coords) -> Self {
        Self {
            cx: 3 * c.x as i64,
            cy: 2 * c.y as i64 + (c.x & 1) as i64,
        }
    }

    /// Corners, starting east and running clockwise (screen y points down)
    pub fn vertices(&self) -> [(i64, i64); 6] {
        let (x, y) = (self.cx, self.cy);
        [
            (x + 2, y),
            (x + 1, y + 1),
            (x - 1, y + 1),
            (x - 2, y),
            (x - 1, y - 1),
            (x + 1, y - 1),
        ]
    }

    /// Offset to `other` in true board proportions
    pub fn real_offset_to(&self, other: &IdealHex) -> (f64, f64) {
        let dx = (other.cx - self.cx) as f64;
        let dy = (other.cy - self.cy) as f64 * 3f64.sqrt();
        (dx, dy)
    }

    /// Does the infinite line through (x0, y0) and (x1, y1) touch this hexagon?
    ///
    /// Touching a single vertex counts.
    pub fn is_intersected_by(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
        let corners = self.vertices();
        let first = side_of_line(x0, y0, x1, y1, corners[0].0, corners[0].1);
        if first == Ordering::Equal {
            return true;
        }
        corners[1..].iter().any(|&(px, py)| {
            let side = side_of_line(x0, y0, x1, y1, px, py);
            side == Ordering::Equal || side != first
        })
    }
}

/// Which side of the directed line (x0, y0) -> (x1, y1) the point is on
fn side_of_line(x0: i64, y0: i64, x1: i64, y1: i64, px: i64, py: i64) -> Ordering {
    ((x1 - x0) * (py - y0) - (px - x0) * (y1 - y0)).cmp(&0)
}

/// Does the line between the centres of `a` and `b` cross hex `c`?
pub fn hex_crosses_line(c: Coords, a: Coords, b: Coords) -> bool {
    let ha = IdealHex::of(a);
    let hb = IdealHex::of(b);
    IdealHex::of(c).is_intersected_by(ha.cx, ha.cy, hb.cx, hb.cy)
}

/// Every hex whose footprint is crossed by the line between the centres
/// of `a` and `b`, both endpoints included, in row-major scan order.
pub fn intervening(a: Coords, b: Coords) -> Vec<Coords> {
    let min_x = a.x.min(b.x);
    let mut min_y = a.y.min(b.y);
    let width = (a.x - b.x).abs() + 1;
    let mut height = (a.y - b.y).abs() + 1;

    // Along a row with matching column parity the line runs over hex
    // edges, so the rows above and below are candidates too.
    if a.y == b.y && (a.x & 1) == (b.x & 1) {
        height += 2;
        min_y -= 1;
    }

    let mut crossed = Vec::new();
    for dy in 0..height {
        for dx in 0..width {
            let c = Coords::new(min_x + dx, min_y + dy);
            if hex_crosses_line(c, a, b) {
                crossed.push(c);
            }
        }
    }
    crossed
}

/// Stable sort by distance from `root`. Equidistant hexes, such as the
/// two sides of a hex edge the line runs along, stay next to each other
/// in scan order.
pub fn to_line_order(hexes: &mut [Coords], root: Coords) {
    hexes.sort_by_key(|c| c.distance(&root));
}
