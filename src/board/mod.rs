//! Board system - hex coordinates, terrain and exact line-of-sight geometry
//!
//! Everything in here is pure value math or plain data. No rules about
//! units live at this level.

pub mod arc;
pub mod coords;
pub mod geometry;
pub mod grid;
pub mod terrain;

pub use arc::{arc_contains, firing_angle, target_side_table, Arc, SideTable};
pub use coords::Coords;
pub use geometry::{hex_crosses_line, intervening, to_line_order, IdealHex};
pub use grid::Board;
pub use terrain::{Hex, Terrain, TerrainKind};
