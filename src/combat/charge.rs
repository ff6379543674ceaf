//! To-hit for charges and death-from-above attacks
//!
//! Both come in two forms: one that takes the planned path and checks that
//! it actually reaches the target, and one that assumes movement is done
//! and works from where the attacker ended up.

use crate::board::{target_side_table, Coords, SideTable};
use crate::combat::modifiers::{attacker_movement, standard, target_movement_of};
use crate::combat::to_hit::{HitTable, ToHitData};
use crate::core::constants::{CHARGE_BASE_TO_HIT, DFA_BASE_TO_HIT, TARGET_IMMOBILE_MODIFIER};
use crate::core::error::{EngineError, Result};
use crate::core::types::EntityId;
use crate::entity::{elevation_occupied, height, Entity, MoveType};
use crate::game::Game;
use crate::movement::{compile, MovementPath, StepType};

fn gated(attacker: &Entity, attack: &str, data: ToHitData) -> Result<ToHitData> {
    tracing::debug!("{} cannot {}: {}", attacker.name, attack, data.description());
    Ok(data)
}

fn distinct(attacker: EntityId, target: EntityId) -> Result<()> {
    if attacker == target {
        return Err(EngineError::InvalidArgument(
            "attacker and target are the same unit".to_string(),
        ));
    }
    Ok(())
}

/// Where the legal part of `path` leaves the attacker: the hex it launches
/// from and the hex the `finisher` step lands in
fn launch_and_landing(
    game: &Game,
    attacker: EntityId,
    path: &mut MovementPath,
    finisher: StepType,
) -> Result<(Coords, Option<Coords>)> {
    compile(game, attacker, path)?;
    let mut src = game.entity(attacker)?.position;
    let mut landing = None;
    for step in path.steps() {
        if !step.is_legal() {
            break;
        }
        if step.step_type() == finisher {
            landing = Some(step.position());
        } else {
            src = step.position();
        }
    }
    Ok((src, landing))
}

/// Someone other than `attacker` already has `target` in a displacement attack
fn engaged_by_another(game: &Game, target: &Entity, attacker: &Entity) -> bool {
    game.displacement_attacker_of(target.id)
        .is_some_and(|other| other.id != attacker.id)
}

fn piloting_differential(to_hit: &mut ToHitData, ae: &Entity, te: &Entity) {
    if ae.crew.piloting != te.crew.piloting {
        to_hit.add_modifier(
            ae.crew.piloting - te.crew.piloting,
            "piloting skill differential",
        );
    }
}

/// To-hit for charging along `path`. The path is compiled on a copy; the
/// caller's path is left alone.
pub fn to_hit_charge(
    game: &Game,
    attacker: EntityId,
    target: EntityId,
    path: &MovementPath,
) -> Result<ToHitData> {
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let gate = |reason: &str| gated(ae, "charge", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't charge");
    }
    if !path.contains(StepType::Charge) {
        return gate("Charge action not found in movement path");
    }
    if path.contains(StepType::StartJump) {
        return gate("No jumping allowed while charging");
    }
    if path.contains_backwards() {
        return gate("No backwards movement allowed while charging");
    }

    let mut path = path.clone();
    let (src, landing) = launch_and_landing(game, attacker, &mut path, StepType::Charge)?;
    if landing != Some(te.position) {
        return gate("Could not reach target with movement");
    }
    if te.ready {
        return gate("Target must be done with movement");
    }

    let movement = if path.mp_used() > ae.walk_mp {
        MoveType::Run
    } else {
        MoveType::Walk
    };
    to_hit_charge_from(game, attacker, target, src, movement)
}

/// To-hit for a charge from `src`, movement already resolved as `movement`
pub fn to_hit_charge_from(
    game: &Game,
    attacker: EntityId,
    target: EntityId,
    src: Coords,
    movement: MoveType,
) -> Result<ToHitData> {
    distinct(attacker, target)?;
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let attacker_elevation = elevation_occupied(ae, game.board.require_hex(src)?);
    let attacker_height = attacker_elevation + height(ae);
    let target_elevation = game.elevation_of(te)?;
    let target_height = game.abs_height_of(te)?;
    let gate = |reason: &str| gated(ae, "charge", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't charge");
    }
    if src.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if ae.class.is_mech() {
        if !te.class.is_mech() {
            return gate("Target is not a mech");
        }
        if te.prone {
            return gate("Target is prone");
        }
    }
    if attacker_elevation > target_height || attacker_height < target_elevation {
        return gate("Target must be within 1 elevation level");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }
    if te.has_displacement_attack() {
        return gate("Target is already making a charge/DFA attack");
    }
    if engaged_by_another(game, te, ae) {
        return gate("Target is the target of another charge/DFA");
    }

    let mut to_hit = ToHitData::base(CHARGE_BASE_TO_HIT, "base");
    to_hit.append(standard(game, ae, te, movement)?);
    piloting_differential(&mut to_hit, ae, te);
    if te.prone {
        to_hit.add_modifier(-2, "target prone and adjacent");
    }
    if te.immobile {
        to_hit.add_modifier(TARGET_IMMOBILE_MODIFIER, "target immobile");
    }

    to_hit.set_side_table(target_side_table(
        src,
        te.position,
        te.facing,
        te.class.is_vehicle(),
    ));
    if attacker_height == target_height || te.prone {
        to_hit.set_hit_table(HitTable::Normal);
    } else if attacker_height < target_height {
        to_hit.set_hit_table(HitTable::Kick);
    } else {
        to_hit.set_hit_table(HitTable::Punch);
    }
    Ok(to_hit)
}

/// To-hit for a death-from-above along `path`, compiled on a copy
pub fn to_hit_dfa(
    game: &Game,
    attacker: EntityId,
    target: EntityId,
    path: &MovementPath,
) -> Result<ToHitData> {
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let gate = |reason: &str| gated(ae, "DFA", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't D.F.A.");
    }
    if !path.contains(StepType::Dfa) {
        return gate("D.F.A. action not found in movement path");
    }
    if !path.contains(StepType::StartJump) {
        return gate("D.F.A. must involve jumping");
    }

    let mut path = path.clone();
    let (src, landing) = launch_and_landing(game, attacker, &mut path, StepType::Dfa)?;
    if landing != Some(te.position) {
        return gate("Could not reach target with movement");
    }
    if te.ready {
        return gate("Target must be done with movement");
    }
    to_hit_dfa_from(game, attacker, target, src)
}

/// To-hit for a death-from-above launched from `src`
pub fn to_hit_dfa_from(
    game: &Game,
    attacker: EntityId,
    target: EntityId,
    src: Coords,
) -> Result<ToHitData> {
    distinct(attacker, target)?;
    let ae = game.entity(attacker)?;
    let te = game.entity(target)?;
    let gate = |reason: &str| gated(ae, "DFA", ToHitData::impossible(reason));

    if ae.class.is_infantry() {
        return gate("Infantry can't D.F.A.");
    }
    if src.distance(&te.position) > 1 {
        return gate("Target not in range");
    }
    if ae.prone {
        return gate("Attacker is prone");
    }
    if te.has_displacement_attack() {
        return gate("Target is already making a charge/DFA attack");
    }
    if engaged_by_another(game, te, ae) {
        return gate("Target is the target of another charge/DFA");
    }

    let mut to_hit = ToHitData::base(DFA_BASE_TO_HIT, "base");
    to_hit.append(attacker_movement(MoveType::Jump));
    to_hit.append(target_movement_of(te));
    piloting_differential(&mut to_hit, ae, te);
    if te.prone {
        to_hit.add_modifier(-2, "target prone and adjacent");
    }
    if te.immobile {
        to_hit.add_modifier(TARGET_IMMOBILE_MODIFIER, "target immobile");
    }

    if te.class.is_vehicle() {
        to_hit.set_side_table(SideTable::Front);
        to_hit.set_hit_table(HitTable::Normal);
    } else if te.prone {
        to_hit.set_side_table(SideTable::Rear);
        to_hit.set_hit_table(HitTable::Normal);
    } else {
        to_hit.set_side_table(target_side_table(src, te.position, te.facing, false));
        to_hit.set_hit_table(HitTable::Punch);
    }
    Ok(to_hit)
}
