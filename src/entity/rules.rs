//! Rules that depend on what kind of unit something is
//!
//! These are free functions over `Entity` so every unit-category branch is
//! visible in one place.

use crate::board::{Arc, Hex, TerrainKind};
use crate::core::constants::{MECH_MAX_ELEVATION_CHANGE, OTHER_MAX_ELEVATION_CHANGE};
use crate::entity::equipment::Weapon;
use crate::entity::unit::{Entity, Location, MovementMode, UnitClass};

/// Level the unit stands at in `hex`. Hover units ride on the water surface.
pub fn elevation_occupied(entity: &Entity, hex: &Hex) -> i32 {
    if entity.movement_mode == MovementMode::Hover {
        hex.surface()
    } else {
        hex.floor()
    }
}

/// How many levels the unit sticks up above its elevation
pub fn height(entity: &Entity) -> i32 {
    if entity.class.is_mech() && !entity.prone {
        1
    } else {
        0
    }
}

pub fn max_elevation_change(entity: &Entity) -> i32 {
    if entity.class.is_mech() {
        MECH_MAX_ELEVATION_CHANGE
    } else {
        OTHER_MAX_ELEVATION_CHANGE
    }
}

/// Terrain the unit's movement mode cannot enter at all
pub fn is_hex_prohibited(entity: &Entity, hex: &Hex) -> bool {
    let woods = hex.level_of(TerrainKind::Woods);
    let water = hex.level_of(TerrainKind::Water);
    match entity.movement_mode {
        MovementMode::Tracked => woods > 1 || water > 0,
        MovementMode::Wheeled => {
            woods > 0
                || hex.level_of(TerrainKind::Rough) > 0
                || hex.level_of(TerrainKind::Rubble) > 0
                || water > 0
        }
        MovementMode::Hover => woods > 0,
        MovementMode::Infantry => water > 0,
        MovementMode::Biped | MovementMode::Quad => false,
    }
}

/// Arc a weapon can fire into
pub fn weapon_arc(entity: &Entity, weapon: &Weapon) -> Arc {
    match entity.class {
        UnitClass::BipedMech | UnitClass::QuadMech => {
            if weapon.rear_mounted {
                return Arc::Rear;
            }
            if entity.class.is_quad() {
                return Arc::Forward;
            }
            match weapon.location {
                Location::LeftArm | Location::RightArm if entity.arms_flipped => Arc::Rear,
                Location::LeftArm => Arc::LeftArm,
                Location::RightArm => Arc::RightArm,
                _ => Arc::Forward,
            }
        }
        UnitClass::Tank => match weapon.location {
            Location::Front => Arc::Forward,
            Location::LeftSide => Arc::LeftSide,
            Location::RightSide => Arc::RightSide,
            Location::Rear => Arc::Rear,
            _ => Arc::Full,
        },
        UnitClass::Infantry => Arc::Full,
    }
}

/// Does the weapon aim along the torso twist or turret instead of the
/// unit's facing?
pub fn is_secondary_arc_weapon(entity: &Entity, weapon: &Weapon) -> bool {
    match entity.class {
        UnitClass::BipedMech | UnitClass::QuadMech => !weapon.location.is_leg(),
        UnitClass::Tank => weapon.location == Location::Turret,
        UnitClass::Infantry => false,
    }
}
