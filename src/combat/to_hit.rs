//! To-hit results
//!
//! Every attack resolves to a `ToHitData`: either a gated outcome with the
//! reason it was gated, or a base number plus a list of signed modifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::SideTable;

/// How the attack is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Roll 2d6 against the target number
    #[default]
    Roll,
    Impossible,
    AutomaticFail,
    AutomaticSuccess,
}

/// Which hit-location table the attack rolls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HitTable {
    #[default]
    Normal,
    Punch,
    Kick,
}

/// One signed adjustment and the reason for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub value: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToHitData {
    resolution: Resolution,
    modifiers: Vec<Modifier>,
    hit_table: HitTable,
    side_table: SideTable,
}

impl ToHitData {
    /// No modifiers at all. Used to collect modifiers before appending.
    pub fn new() -> Self {
        Self::default()
    }

    /// A roll starting from `value`
    pub fn base(value: i32, description: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.add_modifier(value, description);
        data
    }

    /// A gated outcome carrying a fixed value, as piloting rolls do
    pub fn with_resolution(resolution: Resolution, value: i32, description: impl Into<String>) -> Self {
        Self {
            resolution,
            ..Self::base(value, description)
        }
    }

    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::with_resolution(Resolution::Impossible, 0, reason)
    }

    pub fn automatic_fail(reason: impl Into<String>) -> Self {
        Self::with_resolution(Resolution::AutomaticFail, 0, reason)
    }

    pub fn automatic_success(reason: impl Into<String>) -> Self {
        Self::with_resolution(Resolution::AutomaticSuccess, 0, reason)
    }

    pub fn add_modifier(&mut self, value: i32, description: impl Into<String>) {
        self.modifiers.push(Modifier {
            value,
            description: description.into(),
        });
    }

    /// Take on `other`'s modifiers. A gated `other` gates this one too.
    pub fn append(&mut self, other: ToHitData) {
        if other.resolution != Resolution::Roll {
            self.resolution = other.resolution;
        }
        self.modifiers.extend(other.modifiers);
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_roll(&self) -> bool {
        self.resolution == Resolution::Roll
    }

    pub fn is_impossible(&self) -> bool {
        self.resolution == Resolution::Impossible
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Sum of every modifier, base included
    pub fn value(&self) -> i32 {
        self.modifiers.iter().map(|m| m.value).sum()
    }

    /// The number 2d6 has to reach, if the attack is rolled at all
    pub fn target_number(&self) -> Option<i32> {
        self.is_roll().then(|| self.value())
    }

    /// Human-readable breakdown, e.g. `gunnery skill 4, medium range +2`.
    /// For gated outcomes this is just the reason.
    pub fn description(&self) -> String {
        if !self.is_roll() {
            return self
                .modifiers
                .first()
                .map(|m| m.description.clone())
                .unwrap_or_default();
        }
        self.modifiers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                if i == 0 {
                    format!("{} {}", m.description, m.value)
                } else {
                    format!("{} {:+}", m.description, m.value)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn hit_table(&self) -> HitTable {
        self.hit_table
    }

    pub fn set_hit_table(&mut self, table: HitTable) {
        self.hit_table = table;
    }

    pub fn side_table(&self) -> SideTable {
        self.side_table
    }

    pub fn set_side_table(&mut self, table: SideTable) {
        self.side_table = table;
    }
}

impl fmt::Display for ToHitData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolution {
            Resolution::Roll => write!(f, "{} ({})", self.value(), self.description()),
            Resolution::Impossible => write!(f, "impossible: {}", self.description()),
            Resolution::AutomaticFail => write!(f, "automatic fail: {}", self.description()),
            Resolution::AutomaticSuccess => {
                write!(f, "automatic success: {}", self.description())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_sum() {
        let mut data = ToHitData::base(4, "gunnery skill");
        data.add_modifier(2, "medium range");
        data.add_modifier(-1, "target in water");
        assert_eq!(data.value(), 5);
        assert_eq!(data.target_number(), Some(5));
        assert_eq!(
            data.description(),
            "gunnery skill 4, medium range +2, target in water -1"
        );
    }

    #[test]
    fn test_append_keeps_order() {
        let mut data = ToHitData::base(5, "base");
        let mut movement = ToHitData::new();
        movement.add_modifier(1, "attacker walked");
        data.append(movement);
        data.append(ToHitData::new());
        assert_eq!(data.modifiers().len(), 2);
        assert_eq!(data.modifiers()[1].description, "attacker walked");
    }

    #[test]
    fn test_gated_has_no_target_number() {
        let data = ToHitData::impossible("Target not in arc");
        assert!(data.is_impossible());
        assert_eq!(data.target_number(), None);
        assert_eq!(data.description(), "Target not in arc");
        assert_eq!(data.to_string(), "impossible: Target not in arc");
    }

    #[test]
    fn test_append_gated_gates() {
        let mut data = ToHitData::base(4, "base");
        data.append(ToHitData::automatic_fail("Target out of range"));
        assert_eq!(data.resolution(), Resolution::AutomaticFail);
    }

    #[test]
    fn test_fixed_value_gated() {
        let data = ToHitData::with_resolution(Resolution::AutomaticFail, 3, "gyro destroyed");
        assert_eq!(data.value(), 3);
        assert_eq!(data.description(), "gyro destroyed");
    }
}
