//! Path compilation
//!
//! `compile` walks a step list from the unit's current state and annotates
//! every step with where it ends up, what it costs and whether it is legal.
//! Running it twice on the same path and unit gives the same annotations.

use crate::board::{Coords, TerrainKind};
use crate::core::constants::LATERAL_SHIFT_COST;
use crate::core::error::{EngineError, Result};
use crate::core::types::EntityId;
use crate::entity::{Entity, Location, MechSystem, MoveType, MovementMode};
use crate::game::Game;
use crate::movement::cost::{is_movement_possible, is_piloting_needed, movement_cost};
use crate::movement::step::{
    adjusted_facing, turn_for_lateral_shift, turn_for_lateral_shift_backwards, MovementPath,
    StepType,
};

/// Annotate `path` for the unit `entity_id`
pub fn compile(game: &Game, entity_id: EntityId, path: &mut MovementPath) -> Result<()> {
    let entity = game.entity(entity_id)?;
    if !game.board.contains(entity.position) {
        return Err(EngineError::BoardInconsistency(format!(
            "{} stands off the board at {}",
            entity.name, entity.position
        )));
    }

    for step in path.steps_mut() {
        step.clear_annotations();
    }

    let is_jumping = path.contains(StepType::StartJump);
    if entity.class.is_quad() && !is_jumping {
        path.transform_lateral_shifts();
    }

    let mut gear = if is_jumping {
        MoveType::Jump
    } else {
        MoveType::Walk
    };
    let mut run_prohibited = path.contains_backwards();

    apply_steps(game, entity, path, &mut gear, &mut run_prohibited)?;

    let gyro_hit = entity.destroyed_criticals(MechSystem::Gyro, Location::CenterTorso) > 0;
    if !run_prohibited && gear == MoveType::Run && (gyro_hit || entity.has_hip_crit()) {
        if let Some(first) = path.steps_mut().first_mut() {
            first.danger = true;
        }
    }

    classify_steps(game, entity, path, gear, run_prohibited)?;
    mark_stacking_violations(game, entity, path);
    if is_jumping {
        check_jump(entity, path);
    }

    path.gear = gear;
    path.compiled = true;

    tracing::debug!(
        "Compiled {} steps for {}: gear {:?}, {} MP, last legal step {:?}",
        path.len(),
        entity.name,
        gear,
        path.mp_used(),
        path.last_legal_step().map(|s| s.position())
    );
    Ok(())
}

fn water_at(game: &Game, coords: Coords) -> i32 {
    game.board
        .hex(coords)
        .map_or(0, |hex| hex.level_of(TerrainKind::Water))
}

/// Cost of entering `dest`. Steps that wander off the board are charged a
/// nominal point; classification marks them illegal.
fn step_cost(game: &Game, entity: &Entity, src: Coords, dest: Coords, gear: MoveType) -> Result<u32> {
    if !game.board.contains(src) || !game.board.contains(dest) {
        return Ok(1);
    }
    movement_cost(game, entity, src, dest, gear)
}

/// First pass: position, facing, MP and distance for every step, and the
/// overall gear
fn apply_steps(
    game: &Game,
    entity: &Entity,
    path: &mut MovementPath,
    gear: &mut MoveType,
    run_prohibited: &mut bool,
) -> Result<()> {
    let is_jumping = *gear == MoveType::Jump;
    let is_hover = entity.movement_mode == MovementMode::Hover;
    let mut facing = entity.facing;
    let mut pos = entity.position;
    let mut mp_used = entity.mp_used;
    let mut distance = entity.delta_distance;
    let mut has_just_stood = false;
    let mut last_was_backwards = false;

    for step in path.steps_mut() {
        let last_pos = pos;
        let mut this_backwards = last_was_backwards;

        let step_mp = match step.step_type() {
            t @ (StepType::TurnLeft | StepType::TurnRight) => {
                facing = adjusted_facing(facing, t);
                if is_jumping || has_just_stood || entity.class.is_infantry() {
                    0
                } else {
                    1
                }
            }
            t @ (StepType::Forwards | StepType::Backwards | StepType::Charge | StepType::Dfa) => {
                this_backwards = t == StepType::Backwards;
                pos = if this_backwards {
                    pos.translated((facing + 3) % 6)
                } else {
                    pos.translated(facing)
                };
                let mp = step_cost(game, entity, last_pos, pos, *gear)?;
                if water_at(game, pos) > 0 && !is_hover {
                    *run_prohibited = true;
                }
                has_just_stood = false;
                if last_was_backwards != this_backwards {
                    distance = 0;
                }
                distance += 1;
                mp
            }
            t @ (StepType::LateralLeft
            | StepType::LateralRight
            | StepType::LateralLeftBackwards
            | StepType::LateralRightBackwards) => {
                this_backwards = t.is_backwards();
                pos = if let Some(turn) = turn_for_lateral_shift_backwards(t) {
                    pos.translated((adjusted_facing(facing, turn) + 3) % 6)
                } else if let Some(turn) = turn_for_lateral_shift(t) {
                    pos.translated(adjusted_facing(facing, turn))
                } else {
                    pos
                };
                let mp = step_cost(game, entity, last_pos, pos, *gear)? + LATERAL_SHIFT_COST;
                if water_at(game, pos) > 0 && !is_hover {
                    *run_prohibited = true;
                }
                has_just_stood = false;
                if last_was_backwards != this_backwards {
                    distance = 0;
                }
                distance += 1;
                mp
            }
            StepType::GetUp => {
                has_just_stood = true;
                if entity.walk_mp == 1 {
                    1
                } else {
                    2
                }
            }
            StepType::StartJump => 0,
        };

        mp_used += step_mp;
        if *gear == MoveType::Walk && mp_used > entity.walk_mp {
            *gear = MoveType::Run;
        }

        step.position = pos;
        step.facing = facing;
        step.mp_used = mp_used;
        step.distance = distance;
        last_was_backwards = this_backwards;
    }
    Ok(())
}

/// Second pass: move type, legality and danger for every step
fn classify_steps(
    game: &Game,
    entity: &Entity,
    path: &mut MovementPath,
    gear: MoveType,
    run_prohibited: bool,
) -> Result<()> {
    let has_get_up = path.contains(StepType::GetUp);
    let run_mp = entity.run_mp();
    let mut pos = entity.position;
    let mut legal = true;
    let mut past_danger = false;
    let mut first_step = true;

    for step in path.steps_mut() {
        let last_pos = pos;
        pos = step.position;
        let step_type = step.step_type();

        let mut move_type = MoveType::Illegal;
        if gear == MoveType::Jump && step.mp_used <= entity.jump_mp && !entity.prone {
            move_type = MoveType::Jump;
        }
        if matches!(gear, MoveType::Walk | MoveType::Run)
            && (!entity.prone || has_get_up || step_type.is_turn())
        {
            if step.mp_used <= entity.walk_mp {
                move_type = MoveType::Walk;
            } else if step.mp_used <= run_mp && !run_prohibited {
                move_type = MoveType::Run;
            }
        }
        if step_type == StepType::GetUp && entity.walk_mp == 1 {
            move_type = MoveType::Run;
        }
        // A unit that can move at all may always take one step forwards
        if first_step
            && move_type == MoveType::Illegal
            && entity.walk_mp > 0
            && !entity.prone
            && step_type == StepType::Forwards
        {
            move_type = MoveType::Run;
        }

        if !is_movement_possible(game, entity, last_pos, pos, move_type, step_type, first_step)? {
            move_type = MoveType::Illegal;
        }
        if move_type == MoveType::Illegal {
            legal = false;
        }

        let danger = step.danger
            || is_piloting_needed(game, entity, last_pos, pos, move_type)?
            || step_type == StepType::GetUp;

        step.danger = danger;
        step.past_danger = past_danger;
        step.move_type = if legal { move_type } else { MoveType::Illegal };
        past_danger |= danger;

        // Infantry get a fresh free step every time they stand still
        first_step = entity.class.is_infantry() && step.mp_used == 0;
    }
    Ok(())
}

/// Walk back from the end; the last legal step may not end in an
/// overstacked hex, so peel steps off until one doesn't
fn mark_stacking_violations(game: &Game, entity: &Entity, path: &mut MovementPath) {
    for step in path.steps_mut().iter_mut().rev() {
        if !step.is_legal() {
            continue;
        }
        let violation = stacking_violation(game, entity, step.position);
        if violation.is_some() && !step.step_type().is_displacement() {
            step.move_type = MoveType::Illegal;
        } else {
            break;
        }
    }
}

/// A jump has to go somewhere, by the shortest route
fn check_jump(entity: &Entity, path: &mut MovementPath) {
    let Some(last) = path.last_step() else {
        return;
    };
    let distance = entity.position.distance(&last.position());
    let mp = last.mp_used();
    if distance < 1 || mp > distance {
        for step in path.steps_mut() {
            step.move_type = MoveType::Illegal;
        }
    }
}

/// The unit that `entering` would overstack with in `coords`, if any.
///
/// Mechs never share a hex with another mech. Otherwise a player may have
/// at most two units in a hex.
pub fn stacking_violation<'a>(game: &'a Game, entering: &Entity, coords: Coords) -> Option<&'a Entity> {
    if entering.class.is_mech() {
        if let Some(mech) = game
            .entities_at(coords)
            .find(|e| e.class.is_mech() && e.id != entering.id)
        {
            return Some(mech);
        }
    }

    let mut friends = game
        .entities_at(coords)
        .filter(|e| e.owner.player == entering.owner.player && e.id != entering.id);
    let first = friends.next()?;
    friends.next().map(|_| first)
}

/// Move the unit to the end of the legal part of a compiled path
pub fn apply_path(game: &mut Game, entity_id: EntityId, path: &MovementPath) -> Result<()> {
    if !path.is_compiled() {
        return Err(EngineError::InvalidArgument(
            "path must be compiled before it is applied".to_string(),
        ));
    }
    let stood_up = path
        .steps()
        .iter()
        .any(|s| s.step_type() == StepType::GetUp && s.is_legal());
    let Some(last) = path.last_legal_step().cloned() else {
        let entity = game.entity_mut(entity_id)?;
        entity.ready = false;
        tracing::debug!("{} stays put", entity.name);
        return Ok(());
    };

    let entity = game.entity_mut(entity_id)?;
    entity.position = last.position();
    entity.facing = last.facing();
    entity.secondary_facing = last.facing();
    entity.mp_used = last.mp_used();
    entity.delta_distance = last.distance();
    entity.moved = last.move_type();
    entity.ready = false;
    if stood_up {
        entity.prone = false;
    }
    tracing::info!(
        "{} moves to {} ({:?}, {} MP)",
        entity.name,
        entity.position,
        entity.moved,
        entity.mp_used
    );
    Ok(())
}
