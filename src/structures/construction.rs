//! Construction types and building classes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How sturdily a structure is built. Stored on the board as the level of
/// the structure terrain (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionType {
    Light,
    Medium,
    Heavy,
    Hardened,
    Wall,
}

impl ConstructionType {
    pub fn all() -> [ConstructionType; 5] {
        [
            ConstructionType::Light,
            ConstructionType::Medium,
            ConstructionType::Heavy,
            ConstructionType::Hardened,
            ConstructionType::Wall,
        ]
    }

    pub fn id(&self) -> i32 {
        match self {
            ConstructionType::Light => 1,
            ConstructionType::Medium => 2,
            ConstructionType::Heavy => 3,
            ConstructionType::Hardened => 4,
            ConstructionType::Wall => 5,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::all().into_iter().find(|t| t.id() == id)
    }

    pub fn default_cf(&self) -> u32 {
        match self {
            ConstructionType::Light => 15,
            ConstructionType::Medium => 40,
            ConstructionType::Heavy => 90,
            ConstructionType::Hardened | ConstructionType::Wall => 120,
        }
    }

    /// Share of damage the building takes from attacks on infantry inside
    /// it made by other units inside it
    pub fn damage_reduction_from_inside(&self) -> f32 {
        match self {
            ConstructionType::Heavy => 0.5,
            ConstructionType::Hardened => 0.75,
            _ => 0.0,
        }
    }

    /// Share of a weapon's damage that reaches infantry inside
    pub fn damage_reduction_from_outside(&self) -> f32 {
        match self {
            ConstructionType::Light => 0.75,
            ConstructionType::Medium => 0.5,
            ConstructionType::Heavy => 0.25,
            _ => 0.0,
        }
    }

    /// Word used in a building's full name. Walls have none.
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstructionType::Light => "Light ",
            ConstructionType::Medium => "Medium ",
            ConstructionType::Heavy => "Heavy ",
            ConstructionType::Hardened => "Hardened ",
            ConstructionType::Wall => "",
        }
    }
}

impl fmt::Display for ConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Special building purpose. Stored as the building-class terrain level
/// (0..=3); hexes without one are standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildingClass {
    #[default]
    Standard,
    Hangar,
    Fortress,
    GunEmplacement,
}

impl BuildingClass {
    pub fn id(&self) -> i32 {
        match self {
            BuildingClass::Standard => 0,
            BuildingClass::Hangar => 1,
            BuildingClass::Fortress => 2,
            BuildingClass::GunEmplacement => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(BuildingClass::Standard),
            1 => Some(BuildingClass::Hangar),
            2 => Some(BuildingClass::Fortress),
            3 => Some(BuildingClass::GunEmplacement),
            _ => None,
        }
    }

    /// Multiplier on damage dealt by units inside
    pub fn damage_from_scale(&self) -> f64 {
        match self {
            BuildingClass::Hangar => 0.5,
            BuildingClass::Fortress => 2.0,
            _ => 1.0,
        }
    }

    /// Multiplier on damage dealt to the building
    pub fn damage_to_scale(&self) -> f64 {
        match self {
            BuildingClass::Fortress => 0.5,
            _ => 1.0,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            BuildingClass::Standard => "Standard ",
            BuildingClass::Hangar => "Hangar ",
            BuildingClass::Fortress => "Fortress ",
            BuildingClass::GunEmplacement => "Gun Emplacement ",
        }
    }
}

impl fmt::Display for BuildingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
