//! Terrain features and the hexes that carry them

use serde::{Deserialize, Serialize};

use crate::board::coords::Coords;

/// Kind of terrain feature a hex can carry
///
/// Structure metadata (construction factors, armor, basements) rides
/// along as terrain so a board fully describes its buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Woods,
    Water,
    Rough,
    Rubble,
    Building,
    Bridge,
    FuelTank,
    BuildingCf,
    BridgeCf,
    FuelTankCf,
    FuelTankMagnitude,
    BuildingArmor,
    BuildingClass,
    BasementType,
    BasementCollapsed,
}

/// One terrain feature: a level plus a six-bit mask of connecting hexsides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub kind: TerrainKind,
    pub level: i32,
    pub exits: u8,
}

impl Terrain {
    pub fn new(kind: TerrainKind, level: i32) -> Self {
        Self {
            kind,
            level,
            exits: 0,
        }
    }

    pub fn with_exits(kind: TerrainKind, level: i32, exits: u8) -> Self {
        Self { kind, level, exits }
    }

    pub fn has_exit(&self, dir: u8) -> bool {
        dir < 6 && self.exits & (1 << dir) != 0
    }
}

/// A single hex on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hex {
    pub coords: Coords,
    pub elevation: i32,
    terrains: Vec<Terrain>,
}

impl Hex {
    pub fn new(coords: Coords) -> Self {
        Self {
            coords,
            elevation: 0,
            terrains: Vec::new(),
        }
    }

    pub fn terrain(&self, kind: TerrainKind) -> Option<&Terrain> {
        self.terrains.iter().find(|t| t.kind == kind)
    }

    pub fn contains(&self, kind: TerrainKind) -> bool {
        self.terrain(kind).is_some()
    }

    /// Level of a feature, 0 when absent
    pub fn level_of(&self, kind: TerrainKind) -> i32 {
        self.terrain(kind).map(|t| t.level).unwrap_or(0)
    }

    pub fn contains_exit(&self, kind: TerrainKind, dir: u8) -> bool {
        self.terrain(kind).is_some_and(|t| t.has_exit(dir))
    }

    /// Add a feature, replacing any existing feature of the same kind
    pub fn add_terrain(&mut self, terrain: Terrain) {
        self.remove_terrain(terrain.kind);
        self.terrains.push(terrain);
    }

    pub fn remove_terrain(&mut self, kind: TerrainKind) {
        self.terrains.retain(|t| t.kind != kind);
    }

    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    /// Lowest point a unit can stand on (bottom of any water)
    pub fn floor(&self) -> i32 {
        self.elevation - self.level_of(TerrainKind::Water)
    }

    /// Top of the hex (water surface, if any)
    pub fn surface(&self) -> i32 {
        self.elevation
    }
}
