//! To-hit for punches, kicks, clubs and pushes

use crate::board::{arc_contains, target_side_table, Arc, SideTable, TerrainKind};
use crate::combat::modifiers::standard;
use crate::combat::to_hit::{HitTable, ToHitData};
use crate::core::constants::{
    CLUB_BASE_TO_HIT, KICK_BASE_TO_HIT, PUNCH_BASE_TO_HIT, PUSH_BASE_TO_HIT,
    TARGET_IMMOBILE_MODIFIER,
};
use crate::core::error::{EngineError, Result};
use crate::core::types::EntityId;
use crate::entity::{height, Club, Entity, Limb, Location, MechSystem, MovementMode};
use crate::game::Game;

fn gated(attacker: &Entity, attack: &str, data: ToHitData) -> Result<ToHitData> {
    tracing::debug!("{} cannot {}: {}", attacker.name, attack, data.description());
    Ok(data)
}

fn side_of(attacker: &Entity, target: &Entity) -> SideTable {
    target_side_table(
        attacker.position,
        target.position,
        target.facing,
        target.class.is_vehicle(),
    )
}

fn prone_and_immobile(to_hit: &mut ToHitData, target: &Entity) {
    if target.prone {
        to_hit.add_modifier(-2, "target prone and adjacent");
    }
    if target.immobile {
        to_hit.add_modifier(TARGET_IMMOBILE_MODIFIER, "target immobile");
    }
}

/// To-hit for a punch thrown with `arm`
pub fn to_hit_punch(game: &Game, attacker: EntityId, target: EntityId, arm: Limb) -> Result<ToHitData> {
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let arm_loc = arm.arm();
    let arm_arc = match arm {
        Limb::Left => Arc::LeftArm,
        Limb::Right => Arc::RightArm,
    };
    let attacker_height = game.abs_height_of(ae)?;
    let target_height = game.abs_height_of(te)?;
    let target_elevation = game.elevation_of(te)?;
    let gate = |reason: &str| gated(ae, "punch", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't punch");
    }
    if ae.class.is_quad() {
        return gate("Attacker is a quad");
    }
    if ae.arms_flipped {
        return gate("Arms are flipped to the rear. Can not punch.");
    }
    if ae.is_location_destroyed(arm_loc) {
        return gate("Arm missing");
    }
    if !ae.has_working_system(MechSystem::Shoulder, arm_loc) {
        return gate("Shoulder destroyed");
    }
    if ae.weapon_fired_from(arm_loc) {
        return gate("Weapons fired from arm this turn");
    }
    if ae.position.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if attacker_height < target_elevation || attacker_height > target_height {
        return gate("Target elevation not in range");
    }
    if te.is_making_dfa() {
        return gate("Target is making a DFA attack");
    }
    if !arc_contains(ae.position, ae.secondary_facing, te.position, arm_arc) {
        return gate("Target not in arc");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }

    let mut to_hit = ToHitData::base(PUNCH_BASE_TO_HIT, "base");
    to_hit.append(standard(game, ae, te, ae.moved)?);

    if !ae.has_working_system(MechSystem::UpperArm, arm_loc) {
        to_hit.add_modifier(2, "Upper arm actuator destroyed");
    }
    if !ae.has_working_system(MechSystem::LowerArm, arm_loc) {
        to_hit.add_modifier(2, "Lower arm actuator missing or destroyed");
    }
    if !ae.has_working_system(MechSystem::Hand, arm_loc) {
        to_hit.add_modifier(1, "Hand actuator missing or destroyed");
    }
    prone_and_immobile(&mut to_hit, te);

    if attacker_height == target_elevation {
        to_hit.set_hit_table(if height(te) == 0 {
            HitTable::Normal
        } else {
            HitTable::Kick
        });
    } else {
        to_hit.set_hit_table(HitTable::Punch);
    }
    to_hit.set_side_table(side_of(ae, te));
    Ok(to_hit)
}

/// To-hit for a kick with `leg`. Quads kick with their front legs, and
/// need every kicking leg and hip intact.
pub fn to_hit_kick(game: &Game, attacker: EntityId, target: EntityId, leg: Limb) -> Result<ToHitData> {
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let kick_legs = [ae.kick_leg(Limb::Right), ae.kick_leg(Limb::Left)];
    let leg_loc = ae.kick_leg(leg);
    let attacker_elevation = game.elevation_of(ae)?;
    let target_height = game.abs_height_of(te)?;
    let target_elevation = game.elevation_of(te)?;
    let gate = |reason: &str| gated(ae, "kick", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't kick");
    }
    if kick_legs.iter().any(|&loc| ae.is_location_destroyed(loc)) {
        return gate("Leg missing");
    }
    if kick_legs
        .iter()
        .any(|&loc| !ae.has_working_system(MechSystem::Hip, loc))
    {
        return gate("Hip destroyed");
    }
    if ae.weapon_fired_from(leg_loc) {
        return gate("Weapons fired from leg this turn");
    }
    if ae.position.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if attacker_elevation < target_elevation || attacker_elevation > target_height {
        return gate("Target elevation not in range");
    }
    if te.is_making_dfa() {
        return gate("Target is making a DFA attack");
    }
    if !arc_contains(ae.position, ae.facing, te.position, Arc::Forward) {
        return gate("Target not in arc");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }

    let mut to_hit = ToHitData::base(KICK_BASE_TO_HIT, "base");
    to_hit.append(standard(game, ae, te, ae.moved)?);

    if !ae.has_working_system(MechSystem::UpperLeg, leg_loc) {
        to_hit.add_modifier(2, "Upper leg actuator destroyed");
    }
    if !ae.has_working_system(MechSystem::LowerLeg, leg_loc) {
        to_hit.add_modifier(2, "Lower leg actuator destroyed");
    }
    if !ae.has_working_system(MechSystem::Foot, leg_loc) {
        to_hit.add_modifier(1, "Foot actuator destroyed");
    }
    prone_and_immobile(&mut to_hit, te);

    if attacker_elevation < target_height {
        to_hit.set_hit_table(HitTable::Kick);
    } else if height(te) > 0 {
        to_hit.set_hit_table(HitTable::Punch);
    } else {
        to_hit.set_hit_table(HitTable::Normal);
    }
    to_hit.set_side_table(side_of(ae, te));
    Ok(to_hit)
}

/// To-hit for swinging the club the attacker carries
pub fn to_hit_club(game: &Game, attacker: EntityId, target: EntityId) -> Result<ToHitData> {
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let attacker_elevation = game.elevation_of(ae)?;
    let attacker_height = game.abs_height_of(ae)?;
    let target_height = game.abs_height_of(te)?;
    let target_elevation = game.elevation_of(te)?;
    let gate = |reason: &str| gated(ae, "club", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't club");
    }
    if ae.class.is_quad() {
        return gate("Attacker is a quad");
    }
    let Some(club) = club_mech_has(ae) else {
        return gate("Attacker has no club");
    };
    let both_arms = club.uses_both_arms();
    let arms: &[Location] = if both_arms {
        &[Location::RightArm, Location::LeftArm]
    } else {
        std::slice::from_ref(&club.location)
    };

    if arms.iter().any(|&arm| ae.is_location_destroyed(arm)) {
        return gate("Arm missing");
    }
    if arms.iter().any(|&arm| ae.weapon_fired_from(arm)) {
        return gate("Weapons fired from arm this turn");
    }
    if arms
        .iter()
        .any(|&arm| !ae.has_working_system(MechSystem::Shoulder, arm))
    {
        return gate("Shoulder actuator destroyed");
    }
    if arms
        .iter()
        .any(|&arm| !ae.has_working_system(MechSystem::Hand, arm))
    {
        return gate("Hand actuator destroyed");
    }
    if club.damaged {
        return gate("Club is damaged");
    }
    if ae.position.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if target_height < attacker_elevation || target_elevation > attacker_height {
        return gate("Target elevation not in range");
    }
    if te.is_making_dfa() {
        return gate("Target is making a DFA attack");
    }
    let club_arc = match (both_arms, club.location) {
        (true, _) => Arc::Forward,
        (false, Location::LeftArm) => Arc::LeftArm,
        (false, _) => Arc::RightArm,
    };
    if !arc_contains(ae.position, ae.secondary_facing, te.position, club_arc) {
        return gate("Target not in arc");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }

    let mut to_hit = ToHitData::base(CLUB_BASE_TO_HIT, "base");
    to_hit.append(standard(game, ae, te, ae.moved)?);

    for &arm in arms {
        if !ae.has_working_system(MechSystem::UpperArm, arm) {
            to_hit.add_modifier(2, "Upper arm actuator destroyed");
        }
    }
    for &arm in arms {
        if !ae.has_working_system(MechSystem::LowerArm, arm) {
            to_hit.add_modifier(2, "Lower arm actuator missing or destroyed");
        }
    }
    prone_and_immobile(&mut to_hit, te);

    if attacker_elevation == target_elevation {
        to_hit.set_hit_table(HitTable::Normal);
    } else if attacker_elevation < target_elevation {
        to_hit.set_hit_table(if height(te) == 0 {
            HitTable::Normal
        } else {
            HitTable::Kick
        });
    } else {
        to_hit.set_hit_table(HitTable::Punch);
    }
    to_hit.set_side_table(side_of(ae, te));
    Ok(to_hit)
}

/// To-hit for shoving the mech directly ahead. Pushes ignore side and
/// elevation tables.
pub fn to_hit_push(game: &Game, attacker: EntityId, target: EntityId) -> Result<ToHitData> {
    if attacker == target {
        return Err(EngineError::InvalidArgument(
            "a unit cannot push itself".to_string(),
        ));
    }
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let gate = |reason: &str| gated(ae, "push", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't push");
    }
    if ae.class.is_quad() {
        return gate("Attacker is a quad");
    }
    if !te.class.is_mech() {
        return gate("Target is not a mech");
    }
    if ae.arms_flipped {
        return gate("Arms are flipped to the rear. Can not push.");
    }
    if ae.is_location_destroyed(Location::RightArm) || ae.is_location_destroyed(Location::LeftArm) {
        return gate("Arm missing");
    }
    if ae.weapon_fired_from(Location::RightArm) || ae.weapon_fired_from(Location::LeftArm) {
        return gate("Weapons fired from arm this turn");
    }
    if ae.position.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if game.elevation_of(ae)? != game.elevation_of(te)? {
        return gate("Target not at same elevation");
    }
    if te.has_displacement_attack() && !te.is_pushing() {
        return gate("Target is making a charge/DFA attack");
    }
    if te.is_pushing()
        && te
            .displacement_attack
            .is_some_and(|push| push.target != ae.id)
    {
        return gate("Target is pushing another mech");
    }
    // Only a counter-push is allowed against whoever is displacing us
    if game
        .displacement_attacker_of(ae.id)
        .is_some_and(|other| other.id != te.id)
    {
        return gate("Attacker is the target of another push/charge/DFA");
    }
    if game
        .displacement_attacker_of(te.id)
        .is_some_and(|other| other.id != ae.id)
    {
        return gate("Target is the target of another push/charge/DFA");
    }
    if te.position != ae.position.translated(ae.facing) {
        return gate("Target not directly ahead of feet");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }
    if te.prone {
        return gate("Target is prone");
    }

    let mut to_hit = ToHitData::base(PUSH_BASE_TO_HIT, "base");
    to_hit.append(standard(game, ae, te, ae.moved)?);

    if !ae.has_working_system(MechSystem::Shoulder, Location::RightArm) {
        to_hit.add_modifier(2, "Right Shoulder destroyed");
    }
    if !ae.has_working_system(MechSystem::Shoulder, Location::LeftArm) {
        to_hit.add_modifier(2, "Left Shoulder destroyed");
    }
    if te.immobile {
        to_hit.add_modifier(TARGET_IMMOBILE_MODIFIER, "target immobile");
    }
    Ok(to_hit)
}

/// Could the mech pull up a tree to swing? Needs a biped standing in
/// woods with both shoulders and hands working and no club already.
pub fn can_mech_find_club(game: &Game, entity_id: EntityId) -> Result<bool> {
    let entity = game.entity(entity_id)?;
    let hex = game.board.require_hex(entity.position)?;

    if entity.movement_mode != MovementMode::Biped {
        return Ok(false);
    }
    if hex.level_of(TerrainKind::Woods) < 1 {
        return Ok(false);
    }
    let arms_work = [Location::RightArm, Location::LeftArm].iter().all(|&arm| {
        entity.has_working_system(MechSystem::Shoulder, arm)
            && entity.has_working_system(MechSystem::Hand, arm)
    });
    Ok(arms_work && club_mech_has(entity).is_none())
}

pub fn club_mech_has(entity: &Entity) -> Option<&Club> {
    entity.club.as_ref()
}
