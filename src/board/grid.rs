//! The playing board: a dense grid of hexes

use serde::{Deserialize, Serialize};

use crate::board::coords::Coords;
use crate::board::terrain::{Hex, Terrain, TerrainKind};
use crate::core::error::{EngineError, Result};

/// The full board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    hexes: Vec<Hex>,
}

impl Board {
    /// Create a flat, clear board
    pub fn new(width: u32, height: u32) -> Self {
        let mut hexes = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                hexes.push(Hex::new(Coords::new(x, y)));
            }
        }
        Self {
            width,
            height,
            hexes,
        }
    }

    fn index(&self, coords: Coords) -> Option<usize> {
        if self.contains(coords) {
            Some(coords.y as usize * self.width as usize + coords.x as usize)
        } else {
            None
        }
    }

    /// Check if coordinate is within board bounds
    pub fn contains(&self, coords: Coords) -> bool {
        coords.x >= 0
            && coords.y >= 0
            && coords.x < self.width as i32
            && coords.y < self.height as i32
    }

    pub fn hex(&self, coords: Coords) -> Option<&Hex> {
        self.index(coords).map(|i| &self.hexes[i])
    }

    pub fn hex_mut(&mut self, coords: Coords) -> Option<&mut Hex> {
        self.index(coords).map(move |i| &mut self.hexes[i])
    }

    /// Hex lookup for callers that cannot continue without it
    pub fn require_hex(&self, coords: Coords) -> Result<&Hex> {
        self.hex(coords).ok_or(EngineError::OffBoard(coords))
    }

    pub fn require_hex_mut(&mut self, coords: Coords) -> Result<&mut Hex> {
        self.hex_mut(coords).ok_or(EngineError::OffBoard(coords))
    }

    pub fn hexes(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    /// Set elevation at a coordinate
    pub fn set_elevation(&mut self, coords: Coords, elevation: i32) {
        if let Some(hex) = self.hex_mut(coords) {
            hex.elevation = elevation;
        }
    }

    /// Add a terrain feature at a coordinate
    pub fn add_terrain(&mut self, coords: Coords, terrain: Terrain) {
        if let Some(hex) = self.hex_mut(coords) {
            hex.add_terrain(terrain);
        }
    }

    /// Add a feature with no exits
    pub fn set_terrain(&mut self, coords: Coords, kind: TerrainKind, level: i32) {
        self.add_terrain(coords, Terrain::new(kind, level));
    }

    /// Is the hex on a board edge?
    pub fn is_edge(&self, coords: Coords) -> bool {
        self.contains(coords)
            && (coords.x == 0
                || coords.y == 0
                || coords.x == self.width as i32 - 1
                || coords.y == self.height as i32 - 1)
    }
}
