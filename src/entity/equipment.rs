//! Weapons, ammunition and clubs
//!
//! Only the handful of stat blocks the rules need to exercise every branch
//! live here. Full equipment catalogues are data, not engine code.

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;
use crate::entity::unit::Location;

/// Ammunition family a weapon feeds from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoKind {
    Autocannon,
    Lrm,
    Srm,
    MachineGun,
}

/// Static stats for a kind of weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponType {
    pub name: String,
    /// Damage per hit (per missile for cluster weapons)
    pub damage: u32,
    pub minimum_range: u32,
    pub short_range: u32,
    pub medium_range: u32,
    pub long_range: u32,
    pub to_hit_modifier: i32,
    pub ammo: Option<AmmoKind>,
    pub flamer: bool,
    /// Missiles per volley, rolled on the cluster table
    pub cluster_size: Option<u32>,
}

impl WeaponType {
    fn energy(name: &str, damage: u32, short: u32, medium: u32, long: u32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            minimum_range: 0,
            short_range: short,
            medium_range: medium,
            long_range: long,
            to_hit_modifier: 0,
            ammo: None,
            flamer: false,
            cluster_size: None,
        }
    }

    pub fn small_laser() -> Self {
        Self::energy("Small Laser", 3, 1, 2, 3)
    }

    pub fn medium_laser() -> Self {
        Self::energy("Medium Laser", 5, 3, 6, 9)
    }

    pub fn large_laser() -> Self {
        Self::energy("Large Laser", 8, 5, 10, 15)
    }

    pub fn ppc() -> Self {
        Self {
            minimum_range: 3,
            ..Self::energy("PPC", 10, 6, 12, 18)
        }
    }

    pub fn flamer() -> Self {
        Self {
            flamer: true,
            ..Self::energy("Flamer", 2, 1, 2, 3)
        }
    }

    pub fn ac10() -> Self {
        Self {
            ammo: Some(AmmoKind::Autocannon),
            ..Self::energy("AC/10", 10, 5, 10, 15)
        }
    }

    pub fn machine_gun() -> Self {
        Self {
            ammo: Some(AmmoKind::MachineGun),
            ..Self::energy("Machine Gun", 2, 1, 2, 3)
        }
    }

    pub fn srm6() -> Self {
        Self {
            ammo: Some(AmmoKind::Srm),
            cluster_size: Some(6),
            ..Self::energy("SRM 6", 2, 3, 6, 9)
        }
    }

    pub fn lrm10() -> Self {
        Self {
            minimum_range: 6,
            ammo: Some(AmmoKind::Lrm),
            cluster_size: Some(10),
            ..Self::energy("LRM 10", 1, 7, 14, 21)
        }
    }

    pub fn lrm20() -> Self {
        Self {
            minimum_range: 6,
            ammo: Some(AmmoKind::Lrm),
            cluster_size: Some(20),
            ..Self::energy("LRM 20", 1, 7, 14, 21)
        }
    }

    pub fn uses_ammo(&self) -> bool {
        self.ammo.is_some()
    }
}

/// Ammunition linked to a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoBin {
    pub shots: u32,
    pub to_hit_modifier: i32,
}

/// A weapon mounted on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponType,
    pub location: Location,
    pub rear_mounted: bool,
    pub destroyed: bool,
    pub used_this_round: bool,
    pub ammo: Option<AmmoBin>,
}

impl Weapon {
    pub fn new(kind: WeaponType, location: Location) -> Self {
        Self {
            kind,
            location,
            rear_mounted: false,
            destroyed: false,
            used_this_round: false,
            ammo: None,
        }
    }

    pub fn rear(mut self) -> Self {
        self.rear_mounted = true;
        self
    }

    pub fn with_ammo(mut self, shots: u32) -> Self {
        self.ammo = Some(AmmoBin {
            shots,
            to_hit_modifier: 0,
        });
        self
    }

    /// Shots left in the linked bin, 0 when nothing is linked
    pub fn shots_left(&self) -> u32 {
        self.ammo.map(|a| a.shots).unwrap_or(0)
    }
}

/// What a mech is swinging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubKind {
    /// Tree trunk or girder, swung with both arms
    Improvised,
    /// Built into one arm
    Hatchet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub kind: ClubKind,
    /// Arm carrying it. Improvised clubs still record the arm that picked them up.
    pub location: Location,
    pub damaged: bool,
}

impl Club {
    pub fn improvised() -> Self {
        Self {
            kind: ClubKind::Improvised,
            location: Location::RightArm,
            damaged: false,
        }
    }

    pub fn hatchet(location: Location) -> Self {
        Self {
            kind: ClubKind::Hatchet,
            location,
            damaged: false,
        }
    }

    pub fn uses_both_arms(&self) -> bool {
        self.kind == ClubKind::Improvised
    }
}

/// A weapon attack declared earlier in the same phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponAttack {
    pub attacker: EntityId,
    pub target: EntityId,
    /// Index into the attacker's weapon list
    pub weapon: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_ranges() {
        let ml = WeaponType::medium_laser();
        assert_eq!((ml.short_range, ml.medium_range, ml.long_range), (3, 6, 9));
        assert!(!ml.uses_ammo());

        let lrm = WeaponType::lrm20();
        assert_eq!(lrm.minimum_range, 6);
        assert_eq!(lrm.cluster_size, Some(20));
        assert!(lrm.uses_ammo());
    }

    #[test]
    fn test_shots_left() {
        let gun = Weapon::new(WeaponType::ac10(), Location::RightTorso);
        assert_eq!(gun.shots_left(), 0);
        assert_eq!(gun.with_ammo(10).shots_left(), 10);
    }
}
