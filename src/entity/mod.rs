//! Entity system - unit records, equipment and per-category rules

pub mod equipment;
pub mod rules;
pub mod unit;

pub use equipment::{AmmoBin, AmmoKind, Club, ClubKind, Weapon, WeaponAttack, WeaponType};
pub use rules::{
    elevation_occupied, height, is_hex_prohibited, is_secondary_arc_weapon, max_elevation_change,
    weapon_arc,
};
pub use unit::{
    Crew, DisplacementAttack, DisplacementKind, Entity, Limb, Location, MechSystem, MoveType,
    MovementMode, SystemSlot, UnitClass,
};
