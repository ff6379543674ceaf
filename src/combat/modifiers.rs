//! Modifiers every attack type shares: movement and terrain

use crate::board::TerrainKind;
use crate::combat::to_hit::ToHitData;
use crate::core::error::Result;
use crate::entity::{Entity, MoveType, MovementMode};
use crate::game::Game;

pub fn attacker_movement(movement: MoveType) -> ToHitData {
    let mut data = ToHitData::new();
    match movement {
        MoveType::Walk => data.add_modifier(1, "attacker walked"),
        MoveType::Run => data.add_modifier(2, "attacker ran"),
        MoveType::Jump => data.add_modifier(3, "attacker jumped"),
        MoveType::None | MoveType::Illegal => {}
    }
    data
}

/// Modifier for a target that moved `distance` hexes this turn
pub fn target_movement(distance: u32, jumped: bool) -> ToHitData {
    let mut data = ToHitData::new();
    match distance {
        3..=4 => data.add_modifier(1, "target moved 3-4 hexes"),
        5..=6 => data.add_modifier(2, "target moved 5-6 hexes"),
        7..=9 => data.add_modifier(3, "target moved 7-9 hexes"),
        d if d >= 10 => data.add_modifier(4, "target moved 10+ hexes"),
        _ => {}
    }
    if jumped {
        data.add_modifier(1, "target jumped");
    }
    data
}

pub fn target_movement_of(target: &Entity) -> ToHitData {
    target_movement(target.delta_distance, target.moved == MoveType::Jump)
}

pub fn attacker_terrain(game: &Game, attacker: &Entity) -> Result<ToHitData> {
    let hex = game.board.require_hex(attacker.position)?;
    let mut data = ToHitData::new();
    if hex.level_of(TerrainKind::Water) > 0 && attacker.movement_mode != MovementMode::Hover {
        data.add_modifier(1, "attacker in water");
    }
    Ok(data)
}

/// Terrain modifiers for the target's hex. A unit coming down in a DFA is
/// in midair and gets none.
pub fn target_terrain(game: &Game, target: &Entity) -> Result<ToHitData> {
    let hex = game.board.require_hex(target.position)?;
    let mut data = ToHitData::new();
    if target.is_making_dfa() {
        return Ok(data);
    }
    if hex.level_of(TerrainKind::Water) > 0 && target.movement_mode != MovementMode::Hover {
        data.add_modifier(-1, "target in water");
    }
    match hex.level_of(TerrainKind::Woods) {
        1 => data.add_modifier(1, "target in light woods"),
        w if w > 1 => data.add_modifier(2, "target in heavy woods"),
        _ => {}
    }
    Ok(data)
}

/// The four movement and terrain blocks, in the order every attack adds them
pub(crate) fn standard(
    game: &Game,
    attacker: &Entity,
    target: &Entity,
    movement: MoveType,
) -> Result<ToHitData> {
    let mut data = attacker_movement(movement);
    data.append(target_movement_of(target));
    data.append(attacker_terrain(game, attacker)?);
    data.append(target_terrain(game, target)?);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coords};
    use crate::core::types::Owner;
    use crate::entity::DisplacementKind;

    #[test]
    fn test_attacker_movement() {
        assert_eq!(attacker_movement(MoveType::None).value(), 0);
        assert_eq!(attacker_movement(MoveType::Walk).value(), 1);
        assert_eq!(attacker_movement(MoveType::Run).value(), 2);
        assert_eq!(attacker_movement(MoveType::Jump).value(), 3);
    }

    #[test]
    fn test_target_movement_buckets() {
        assert_eq!(target_movement(2, false).value(), 0);
        assert_eq!(target_movement(3, false).value(), 1);
        assert_eq!(target_movement(6, false).value(), 2);
        assert_eq!(target_movement(9, false).value(), 3);
        assert_eq!(target_movement(14, true).value(), 5);
        assert_eq!(
            target_movement(4, false).modifiers()[0].description,
            "target moved 3-4 hexes"
        );
    }

    #[test]
    fn test_terrain() {
        let mut board = Board::new(6, 6);
        board.set_terrain(Coords::new(1, 1), TerrainKind::Water, 1);
        board.set_terrain(Coords::new(2, 2), TerrainKind::Woods, 2);
        let mut game = Game::new(board).unwrap();
        let wet = game.add_entity(
            Entity::biped_mech("Wet", Owner::new(1, 1), 50.0, 4, 0).at(Coords::new(1, 1), 0),
        );
        let hidden = game.add_entity(
            Entity::biped_mech("Hidden", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(2, 2), 0),
        );
        let hover = Entity::tank("Skimmer", Owner::new(1, 1), 30.0, MovementMode::Hover, 8)
            .at(Coords::new(1, 1), 0);

        let wet_mech = game.entity(wet).unwrap();
        assert_eq!(attacker_terrain(&game, wet_mech).unwrap().value(), 1);
        assert_eq!(target_terrain(&game, wet_mech).unwrap().value(), -1);
        assert_eq!(attacker_terrain(&game, &hover).unwrap().value(), 0);
        assert_eq!(target_terrain(&game, game.entity(hidden).unwrap()).unwrap().value(), 2);

        game.declare_displacement(hidden, DisplacementKind::Dfa, wet).unwrap();
        assert!(target_terrain(&game, game.entity(hidden).unwrap())
            .unwrap()
            .modifiers()
            .is_empty());
    }
}
