//! Demolition charges planted in structures

use serde::{Deserialize, Serialize};

use crate::board::Coords;
use crate::core::types::PlayerId;

/// A charge set by a player. Identical charges stay separate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemolitionCharge {
    pub player: PlayerId,
    pub damage: u32,
    pub coords: Coords,
}

impl DemolitionCharge {
    pub fn new(player: PlayerId, damage: u32, coords: Coords) -> Self {
        Self {
            player,
            damage,
            coords,
        }
    }
}
