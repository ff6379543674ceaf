//! Per-hex state of a structure

use serde::{Deserialize, Serialize};

use crate::board::Coords;
use crate::structures::basement::BasementType;

/// Everything a structure tracks about one of its hexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSection {
    pub coords: Coords,
    pub basement: BasementType,
    /// Updated as soon as damage lands
    pub current_cf: u32,
    /// CF at the start of the phase. Damage this phase does not lower it.
    pub phase_cf: u32,
    pub armor: u32,
    pub basement_collapsed: bool,
    pub burning: bool,
}

impl BuildingSection {
    pub fn new(coords: Coords, cf: u32, armor: u32, basement: BasementType) -> Self {
        Self {
            coords,
            basement,
            current_cf: cf,
            phase_cf: cf,
            armor,
            basement_collapsed: false,
            burning: false,
        }
    }

    /// Damage soaked up before the rest passes through
    pub fn absorption(&self) -> u32 {
        self.phase_cf.div_ceil(10)
    }
}
