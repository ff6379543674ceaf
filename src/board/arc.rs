//! Firing arcs and hit-location side tables

use serde::{Deserialize, Serialize};

use crate::board::coords::Coords;
use crate::core::constants::{DEGREES_PER_HEXSIDE, HEX_SIDES};

/// Angular firing zone relative to a unit's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arc {
    Full,
    Forward,
    LeftArm,
    RightArm,
    Rear,
    LeftSide,
    RightSide,
}

impl Arc {
    pub fn all() -> [Arc; 7] {
        [
            Arc::Full,
            Arc::Forward,
            Arc::LeftArm,
            Arc::RightArm,
            Arc::Rear,
            Arc::LeftSide,
            Arc::RightSide,
        ]
    }

    /// Is a firing angle (0..360, relative to facing) inside this arc?
    pub fn contains_angle(&self, fa: i32) -> bool {
        match self {
            Arc::Full => true,
            Arc::Forward => fa >= 300 || fa <= 60,
            Arc::RightArm => fa >= 300 || fa <= 120,
            Arc::LeftArm => fa >= 240 || fa <= 60,
            Arc::Rear => fa > 120 && fa < 240,
            Arc::RightSide => fa > 60 && fa <= 120,
            Arc::LeftSide => (240..300).contains(&fa),
        }
    }
}

/// Firing angle from `src` facing `facing` toward `dest`, in 0..360
pub fn firing_angle(src: Coords, facing: u8, dest: Coords) -> i32 {
    let facing = (facing % HEX_SIDES) as i32;
    (src.degree(&dest) - facing * DEGREES_PER_HEXSIDE).rem_euclid(360)
}

/// Is `dest` inside `arc` for a unit at `src` facing `facing`?
pub fn arc_contains(src: Coords, facing: u8, dest: Coords, arc: Arc) -> bool {
    arc.contains_angle(firing_angle(src, facing, dest))
}

/// Which side of the target an attack lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SideTable {
    #[default]
    Front,
    Left,
    Right,
    Rear,
}

/// Side of a target at `dest` facing `dest_facing` struck from `src`.
///
/// Vehicles have wider flanks than other units.
pub fn target_side_table(src: Coords, dest: Coords, dest_facing: u8, is_vehicle: bool) -> SideTable {
    let facing = (dest_facing % HEX_SIDES) as i32;
    let fa = (dest.degree(&src) + (6 - facing) * DEGREES_PER_HEXSIDE) % 360;

    if is_vehicle {
        if fa > 30 && fa <= 150 {
            SideTable::Right
        } else if fa > 150 && fa < 210 {
            SideTable::Rear
        } else if (210..330).contains(&fa) {
            SideTable::Left
        } else {
            SideTable::Front
        }
    } else if fa > 90 && fa <= 150 {
        SideTable::Right
    } else if fa > 150 && fa < 210 {
        SideTable::Rear
    } else if (210..270).contains(&fa) {
        SideTable::Left
    } else {
        SideTable::Front
    }
}
