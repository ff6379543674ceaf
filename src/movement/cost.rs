//! Per-step movement rules: MP cost, legality and piloting checks

use crate::board::{Coords, TerrainKind};
use crate::core::error::{EngineError, Result};
use crate::entity::{
    elevation_occupied, is_hex_prohibited, max_elevation_change, Entity, MoveType, MovementMode,
};
use crate::game::Game;
use crate::movement::step::StepType;

fn require_adjacent(src: Coords, dest: Coords) -> Result<()> {
    if src.distance(&dest) > 1 {
        return Err(EngineError::NotAdjacent {
            from: src,
            to: dest,
        });
    }
    Ok(())
}

/// MP needed to move `entity` from `src` into the adjacent `dest`
pub fn movement_cost(
    game: &Game,
    entity: &Entity,
    src: Coords,
    dest: Coords,
    move_type: MoveType,
) -> Result<u32> {
    require_adjacent(src, dest)?;
    let src_hex = game.board.require_hex(src)?;
    let dest_hex = game.board.require_hex(dest)?;

    if move_type == MoveType::Jump {
        return Ok(1);
    }

    let mut mp = 1;
    if dest_hex.level_of(TerrainKind::Rough) > 0 {
        mp += 1;
    }
    if dest_hex.level_of(TerrainKind::Rubble) > 0 {
        mp += 1;
    }
    match dest_hex.level_of(TerrainKind::Woods) {
        1 => mp += 1,
        w if w > 1 => mp += 2,
        _ => {}
    }
    if entity.movement_mode != MovementMode::Hover {
        match dest_hex.level_of(TerrainKind::Water) {
            1 => mp += 1,
            w if w > 1 => mp += 3,
            _ => {}
        }
    }

    let climb = (elevation_occupied(entity, src_hex) - elevation_occupied(entity, dest_hex))
        .unsigned_abs();
    if climb > 0 {
        // Infantry pay the flat rate whatever they ride in
        if !entity.class.is_infantry() && entity.movement_mode.is_ground_vehicle() {
            mp += climb * 2;
        } else {
            mp += climb;
        }
    }
    Ok(mp)
}

/// Can `entity`, which started its move at its recorded position, step
/// from `src` into `dest`?
pub fn is_movement_possible(
    game: &Game,
    entity: &Entity,
    src: Coords,
    dest: Coords,
    move_type: MoveType,
    step_type: StepType,
    first_step: bool,
) -> Result<bool> {
    require_adjacent(src, dest)?;
    if move_type == MoveType::Illegal {
        return Ok(false);
    }
    let (Some(src_hex), Some(dest_hex)) = (game.board.hex(src), game.board.hex(dest)) else {
        return Ok(false);
    };

    let src_el = elevation_occupied(entity, src_hex);
    let dest_el = elevation_occupied(entity, dest_hex);
    if move_type != MoveType::Jump && (src_el - dest_el).abs() > max_elevation_change(entity) {
        return Ok(false);
    }
    if step_type.is_backwards() && src_el != dest_el {
        return Ok(false);
    }
    if move_type == MoveType::Run
        && entity.movement_mode != MovementMode::Hover
        && dest_hex.level_of(TerrainKind::Water) > 0
        && !first_step
    {
        return Ok(false);
    }

    if move_type != MoveType::Jump && !step_type.is_displacement() {
        if entity.class.is_mech() && game.is_enemy_mech_in(entity, dest) {
            return Ok(false);
        }
        if src != entity.position && game.is_enemy_unit_in(entity, src) {
            return Ok(false);
        }
    }

    if move_type == MoveType::Jump
        && dest_hex.elevation > game.elevation_of(entity)? + entity.jump_mp as i32
    {
        return Ok(false);
    }

    Ok(!is_hex_prohibited(entity, dest_hex))
}

/// Does moving from `src` into `dest` call for a piloting roll?
pub fn is_piloting_needed(
    game: &Game,
    entity: &Entity,
    src: Coords,
    dest: Coords,
    move_type: MoveType,
) -> Result<bool> {
    require_adjacent(src, dest)?;
    if src == dest || move_type == MoveType::Jump {
        return Ok(false);
    }
    let Some(dest_hex) = game.board.hex(dest) else {
        return Ok(false);
    };
    if dest_hex.level_of(TerrainKind::Rubble) > 0 {
        return Ok(true);
    }
    Ok(entity.movement_mode != MovementMode::Hover && dest_hex.level_of(TerrainKind::Water) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Terrain};
    use crate::core::types::Owner;

    fn setup() -> (Game, Entity) {
        let mut board = Board::new(8, 8);
        board.add_terrain(Coords::new(3, 3), Terrain::new(TerrainKind::Woods, 2));
        board.add_terrain(Coords::new(3, 4), Terrain::new(TerrainKind::Water, 2));
        board.add_terrain(Coords::new(3, 2), Terrain::new(TerrainKind::Rubble, 1));
        board.set_elevation(Coords::new(5, 5), 2);
        let game = Game::new(board).unwrap();
        let mech = Entity::biped_mech("Phoenix Hawk", Owner::new(1, 1), 45.0, 6, 6)
            .at(Coords::new(3, 5), 0);
        (game, mech)
    }

    #[test]
    fn test_terrain_costs() {
        let (game, mech) = setup();
        let cost = |src, dest| movement_cost(&game, &mech, src, dest, MoveType::Walk).unwrap();
        assert_eq!(cost(Coords::new(3, 2), Coords::new(3, 3)), 3);
        assert_eq!(cost(Coords::new(3, 3), Coords::new(3, 2)), 2);
        // Heavy water plus the two-level drop to the bottom
        assert_eq!(cost(Coords::new(3, 5), Coords::new(3, 4)), 6);
        assert_eq!(
            movement_cost(&game, &mech, Coords::new(3, 5), Coords::new(3, 4), MoveType::Jump)
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_ground_vehicles_pay_double_to_climb() {
        let (game, _) = setup();
        let tank = Entity::tank("Vedette", Owner::new(1, 1), 50.0, MovementMode::Wheeled, 5);
        let mech = Entity::biped_mech("Wasp", Owner::new(1, 1), 20.0, 6, 6);
        let (src, dest) = (Coords::new(5, 6), Coords::new(5, 5));
        assert_eq!(movement_cost(&game, &tank, src, dest, MoveType::Walk).unwrap(), 5);
        assert_eq!(movement_cost(&game, &mech, src, dest, MoveType::Walk).unwrap(), 3);
    }

    #[test]
    fn test_cost_argument_errors() {
        let (game, mech) = setup();
        assert!(matches!(
            movement_cost(&game, &mech, Coords::new(0, 0), Coords::new(4, 4), MoveType::Walk),
            Err(EngineError::NotAdjacent { .. })
        ));
        assert!(matches!(
            movement_cost(&game, &mech, Coords::new(0, 0), Coords::new(0, -1), MoveType::Walk),
            Err(EngineError::OffBoard(_))
        ));
    }

    #[test]
    fn test_cannot_climb_too_far() {
        let mut board = Board::new(4, 4);
        board.set_elevation(Coords::new(1, 1), 3);
        let game = Game::new(board).unwrap();
        let mech = Entity::biped_mech("Wasp", Owner::new(1, 1), 20.0, 6, 6).at(Coords::new(1, 2), 0);
        let src = Coords::new(1, 2);
        let hill = Coords::new(1, 1);
        assert!(!is_movement_possible(&game, &mech, src, hill, MoveType::Walk, StepType::Forwards, false).unwrap());
        assert!(is_movement_possible(&game, &mech, src, hill, MoveType::Jump, StepType::Forwards, false).unwrap());
        assert!(!is_movement_possible(&game, &mech, Coords::new(1, 3), Coords::new(1, 4), MoveType::Walk, StepType::Forwards, false).unwrap());
        assert!(!is_movement_possible(&game, &mech, src, hill, MoveType::Illegal, StepType::Forwards, true).unwrap());
    }

    #[test]
    fn test_backwards_must_stay_level() {
        let (game, mech) = setup();
        let src = Coords::new(5, 6);
        let up = Coords::new(5, 5);
        assert!(is_movement_possible(&game, &mech, src, up, MoveType::Walk, StepType::Forwards, false).unwrap());
        assert!(!is_movement_possible(&game, &mech, src, up, MoveType::Walk, StepType::Backwards, false).unwrap());
    }

    #[test]
    fn test_no_running_into_water_after_first_step() {
        let mut board = Board::new(4, 4);
        board.set_terrain(Coords::new(1, 1), TerrainKind::Water, 1);
        let game = Game::new(board).unwrap();
        let mech = Entity::biped_mech("Wasp", Owner::new(1, 1), 20.0, 6, 6).at(Coords::new(1, 3), 0);
        let (src, dest) = (Coords::new(1, 2), Coords::new(1, 1));
        assert!(!is_movement_possible(&game, &mech, src, dest, MoveType::Run, StepType::Forwards, false).unwrap());
        assert!(is_movement_possible(&game, &mech, src, dest, MoveType::Run, StepType::Forwards, true).unwrap());
        assert!(is_movement_possible(&game, &mech, src, dest, MoveType::Walk, StepType::Forwards, false).unwrap());
    }

    #[test]
    fn test_enemy_mech_blocks_unless_charging() {
        let (mut game, mech) = setup();
        game.add_entity(
            Entity::biped_mech("Enemy", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(2, 2), 0),
        );
        let (src, dest) = (Coords::new(2, 3), Coords::new(2, 2));
        assert!(!is_movement_possible(&game, &mech, src, dest, MoveType::Walk, StepType::Forwards, false).unwrap());
        assert!(is_movement_possible(&game, &mech, src, dest, MoveType::Walk, StepType::Charge, false).unwrap());
        assert!(is_movement_possible(&game, &mech, src, dest, MoveType::Jump, StepType::Forwards, false).unwrap());
    }

    #[test]
    fn test_prohibited_terrain() {
        let (game, _) = setup();
        let tank = Entity::tank("Hunter", Owner::new(1, 1), 35.0, MovementMode::Tracked, 4);
        assert!(!is_movement_possible(&game, &tank, Coords::new(3, 2), Coords::new(3, 3), MoveType::Walk, StepType::Forwards, false).unwrap());
    }

    #[test]
    fn test_piloting_needed() {
        let (game, mech) = setup();
        assert!(is_piloting_needed(&game, &mech, Coords::new(3, 3), Coords::new(3, 2), MoveType::Walk).unwrap());
        assert!(!is_piloting_needed(&game, &mech, Coords::new(3, 3), Coords::new(3, 2), MoveType::Jump).unwrap());
        assert!(is_piloting_needed(&game, &mech, Coords::new(3, 5), Coords::new(3, 4), MoveType::Run).unwrap());
        assert!(!is_piloting_needed(&game, &mech, Coords::new(3, 3), Coords::new(3, 3), MoveType::Walk).unwrap());
        let hover = Entity::tank("Pegasus", Owner::new(1, 1), 35.0, MovementMode::Hover, 8);
        assert!(!is_piloting_needed(&game, &hover, Coords::new(3, 5), Coords::new(3, 4), MoveType::Walk).unwrap());
    }
}
