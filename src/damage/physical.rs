//! Damage formulas for physical and displacement attacks
//!
//! All of these scale with the attacker's tonnage. Each destroyed arm or
//! leg actuator halves punch or kick damage; a destroyed shoulder or hip
//! means the limb does nothing.

use crate::entity::{Entity, Limb, Location, MechSystem};

fn actuator_multiplier(entity: &Entity, systems: [MechSystem; 2], location: Location) -> f32 {
    systems
        .iter()
        .filter(|&&system| !entity.has_working_system(system, location))
        .fold(1.0, |m, _| m / 2.0)
}

pub fn punch_damage(entity: &Entity, arm: Limb) -> u32 {
    let location = arm.arm();
    if !entity.has_working_system(MechSystem::Shoulder, location) {
        return 0;
    }
    let damage = (entity.weight / 10.0).ceil();
    let multiplier = actuator_multiplier(
        entity,
        [MechSystem::UpperArm, MechSystem::LowerArm],
        location,
    );
    (damage * multiplier).floor() as u32
}

pub fn kick_damage(entity: &Entity, leg: Limb) -> u32 {
    let location = entity.kick_leg(leg);
    if !entity.has_working_system(MechSystem::Hip, location) {
        return 0;
    }
    let damage = (entity.weight / 5.0).floor();
    let multiplier = actuator_multiplier(
        entity,
        [MechSystem::UpperLeg, MechSystem::LowerLeg],
        location,
    );
    (damage * multiplier).floor() as u32
}

pub fn club_damage(entity: &Entity) -> u32 {
    (entity.weight / 5.0).floor() as u32
}

/// Charge damage after moving `hexes_moved` hexes. The first hex is free.
pub fn charge_damage(entity: &Entity, hexes_moved: u32) -> u32 {
    (entity.weight / 10.0 * hexes_moved.saturating_sub(1) as f32).ceil() as u32
}

/// Damage the charging unit takes from slamming into `target`
pub fn charge_damage_taken(target: &Entity) -> u32 {
    (target.weight / 10.0).ceil() as u32
}

pub fn dfa_damage(entity: &Entity) -> u32 {
    (entity.weight / 10.0 * 3.0).ceil() as u32
}

/// Damage to the attacker's legs after landing a death from above
pub fn dfa_damage_taken(entity: &Entity) -> u32 {
    (entity.weight / 5.0).ceil() as u32
}
