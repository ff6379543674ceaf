//! Basements under building hexes

use serde::{Deserialize, Serialize};

/// What lies under a building hex. Stored on the board as the basement
/// terrain level; an absent level means nobody has looked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BasementType {
    #[default]
    Unknown,
    None,
    TwoDeepFeet,
    OneDeepFeet,
    OneDeepNormal,
    OneDeepNormalInfantryOnly,
    OneDeepHead,
    TwoDeepHead,
}

impl BasementType {
    pub fn value(&self) -> i32 {
        match self {
            BasementType::Unknown => 0,
            BasementType::None => 1,
            BasementType::TwoDeepFeet => 2,
            BasementType::OneDeepFeet => 3,
            BasementType::OneDeepNormal => 4,
            BasementType::OneDeepNormalInfantryOnly => 5,
            BasementType::OneDeepHead => 6,
            BasementType::TwoDeepHead => 7,
        }
    }

    /// Unrecognised values read as unknown
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => BasementType::None,
            2 => BasementType::TwoDeepFeet,
            3 => BasementType::OneDeepFeet,
            4 => BasementType::OneDeepNormal,
            5 => BasementType::OneDeepNormalInfantryOnly,
            6 => BasementType::OneDeepHead,
            7 => BasementType::TwoDeepHead,
            _ => BasementType::Unknown,
        }
    }

    /// Basement found on a 2d6 roll
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            2 => BasementType::TwoDeepFeet,
            3 => BasementType::OneDeepFeet,
            4 | 10 => BasementType::OneDeepNormal,
            11 => BasementType::OneDeepHead,
            12 => BasementType::TwoDeepHead,
            _ => BasementType::None,
        }
    }

    /// Can a unit fall through into it?
    pub fn can_collapse(&self) -> bool {
        !matches!(
            self,
            BasementType::None | BasementType::OneDeepNormalInfantryOnly
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            BasementType::Unknown => "unknown",
            BasementType::None => "no basement",
            BasementType::TwoDeepFeet => "two levels deep, feet first",
            BasementType::OneDeepFeet => "one level deep, feet first",
            BasementType::OneDeepNormal => "one level deep",
            BasementType::OneDeepNormalInfantryOnly => "one level deep, infantry only",
            BasementType::OneDeepHead => "one level deep, head first",
            BasementType::TwoDeepHead => "two levels deep, head first",
        }
    }
}
