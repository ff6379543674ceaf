//! Hex coordinate system for boards (offset coordinates)
//!
//! Hexes are flat-topped and laid out in columns. Odd columns sit half a
//! hex lower than even ones. Directions run clockwise from north:
//! 0 = N, 1 = NE, 2 = SE, 3 = S, 4 = SW, 5 = NW.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::board::geometry::IdealHex;
use crate::core::constants::HEX_SIDES;

/// Offset hex coordinate on a board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_x_odd(&self) -> bool {
        self.x & 1 == 1
    }

    /// Column of the neighbor in `dir`
    pub fn x_in_dir(&self, dir: u8) -> i32 {
        match dir % HEX_SIDES {
            1 | 2 => self.x + 1,
            4 | 5 => self.x - 1,
            _ => self.x,
        }
    }

    /// Row of the neighbor in `dir`
    pub fn y_in_dir(&self, dir: u8) -> i32 {
        match dir % HEX_SIDES {
            0 => self.y - 1,
            1 | 5 => self.y - ((self.x + 1) & 1),
            2 | 4 => self.y + (self.x & 1),
            _ => self.y + 1,
        }
    }

    /// The adjacent hex in `dir`
    pub fn translated(&self, dir: u8) -> Coords {
        Coords::new(self.x_in_dir(dir), self.y_in_dir(dir))
    }

    /// All six neighbors, indexed by direction
    pub fn adjacent(&self) -> [Coords; 6] {
        [0, 1, 2, 3, 4, 5].map(|dir| self.translated(dir))
    }

    /// Cube coordinates (q, r); s is implied
    fn cube(&self) -> (i32, i32) {
        (self.x, self.y - self.x.div_euclid(2))
    }

    /// Hex distance
    pub fn distance(&self, other: &Coords) -> u32 {
        let (q1, r1) = self.cube();
        let (q2, r2) = other.cube();
        let dq = q1 - q2;
        let dr = r1 - r2;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// Bearing to `other` in radians, clockwise from north, in [0, 2π).
    /// A hex's bearing to itself is π.
    pub fn radian(&self, other: &Coords) -> f64 {
        let src = IdealHex::of(*self);
        let dst = IdealHex::of(*other);
        if src.cx == dst.cx {
            return if src.cy > dst.cy { 0.0 } else { PI };
        }
        let (dx, dy) = src.real_offset_to(&dst);
        let angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle + 2.0 * PI
        } else {
            angle
        }
    }

    /// Bearing to `other` in whole degrees, 0..360
    pub fn degree(&self, other: &Coords) -> i32 {
        (self.radian(other).to_degrees().round() as i32).rem_euclid(360)
    }

    /// Hexside direction that best matches the bearing to `other`
    pub fn direction(&self, other: &Coords) -> u8 {
        let sides = (self.radian(other) / (PI / 3.0)).round() as i32;
        sides.rem_euclid(HEX_SIDES as i32) as u8
    }

    /// Printed board number, e.g. "0102" for (0, 1)
    pub fn board_num(&self) -> String {
        format!("{:02}{:02}", self.x + 1, self.y + 1)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_even_column() {
        let c = Coords::new(2, 2);
        assert_eq!(c.translated(0), Coords::new(2, 1));
        assert_eq!(c.translated(1), Coords::new(3, 1));
        assert_eq!(c.translated(2), Coords::new(3, 2));
        assert_eq!(c.translated(3), Coords::new(2, 3));
        assert_eq!(c.translated(4), Coords::new(1, 2));
        assert_eq!(c.translated(5), Coords::new(1, 1));
    }

    #[test]
    fn test_translation_odd_column() {
        let c = Coords::new(3, 2);
        assert_eq!(c.translated(1), Coords::new(4, 2));
        assert_eq!(c.translated(2), Coords::new(4, 3));
        assert_eq!(c.translated(4), Coords::new(2, 3));
        assert_eq!(c.translated(5), Coords::new(2, 2));
    }

    #[test]
    fn test_neighbors_are_distance_one() {
        for c in [Coords::new(0, 0), Coords::new(5, 3), Coords::new(-3, -2)] {
            for n in c.adjacent() {
                assert_eq!(c.distance(&n), 1, "{} -> {}", c, n);
            }
        }
    }

    #[test]
    fn test_distance_same_and_far() {
        let a = Coords::new(0, 0);
        assert_eq!(a.distance(&a), 0);
        assert_eq!(a.distance(&Coords::new(0, 5)), 5);
        assert_eq!(a.distance(&Coords::new(4, 0)), 4);
        assert_eq!(a.distance(&Coords::new(4, 2)), 4);
        assert_eq!(a.distance(&Coords::new(4, 3)), 5);
    }

    #[test]
    fn test_direction_matches_translation() {
        let c = Coords::new(4, 4);
        for dir in 0..6 {
            assert_eq!(c.direction(&c.translated(dir)), dir);
            assert_eq!(c.degree(&c.translated(dir)), dir as i32 * 60);
        }
    }

    #[test]
    fn test_degree_on_vertex_lines() {
        // Two columns over, one row up from an even column is along the 30° line
        let a = Coords::new(0, 2);
        assert_eq!(a.degree(&Coords::new(2, 1)), 60);
        assert_eq!(a.degree(&Coords::new(1, 0)), 30);
        assert_eq!(a.degree(&Coords::new(2, 2)), 90);
    }

    #[test]
    fn test_degree_to_self_is_south() {
        let a = Coords::new(3, 3);
        assert_eq!(a.degree(&a), 180);
    }

    #[test]
    fn test_board_num() {
        assert_eq!(Coords::new(0, 1).board_num(), "0102");
    }
}
