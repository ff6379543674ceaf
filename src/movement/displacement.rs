//! Where units end up when they are shoved out of their hex

use crate::board::{intervening, Coords};
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::damage::Dice;
use crate::entity::elevation_occupied;
use crate::game::Game;

/// Order in which neighbouring directions are tried, relative to the push
const SEARCH_ORDER: [u8; 6] = [0, 1, 5, 2, 4, 3];

/// Can `entity_id` be displaced from `src` one hex in `direction`?
///
/// A unit already in the way has to be displaceable in turn, in the same
/// direction.
pub fn is_valid_displacement(game: &Game, entity_id: EntityId, src: Coords, direction: u8) -> Result<bool> {
    let entity = game.entity(entity_id)?;
    let dest = src.translated(direction);
    if !game.board.contains(dest) {
        return Ok(false);
    }
    let src_el = elevation_occupied(entity, game.board.require_hex(src)?);

    for coords in intervening(src, dest) {
        if let Some(hex) = game.board.hex(coords) {
            if elevation_occupied(entity, hex) - src_el > 1 {
                return Ok(false);
            }
        }
    }

    match game.first_entity_at(dest) {
        Some(in_the_way) if in_the_way.id != entity_id => {
            is_valid_displacement(game, in_the_way.id, in_the_way.position, direction)
        }
        _ => Ok(true),
    }
}

/// Nearest valid hex to displace into, trying `direction` first and
/// working round to the opposite side
pub fn valid_displacement(game: &Game, entity_id: EntityId, src: Coords, direction: u8) -> Result<Option<Coords>> {
    for offset in SEARCH_ORDER {
        let dir = (direction + offset) % 6;
        if is_valid_displacement(game, entity_id, src, dir)? {
            return Ok(Some(src.translated(dir)));
        }
    }
    Ok(None)
}

/// Hex a unit would choose to be displaced into
pub fn preferred_displacement(game: &Game, entity_id: EntityId, src: Coords, direction: u8) -> Result<Option<Coords>> {
    valid_displacement(game, entity_id, src, direction)
}

/// Where a charger that missed ends up: one of the two hexes flanking
/// the charge direction, the higher one first, otherwise its own hex
pub fn missed_charge_displacement(
    game: &Game,
    entity_id: EntityId,
    src: Coords,
    direction: u8,
    dice: &mut Dice,
) -> Result<Coords> {
    let entity = game.entity(entity_id)?;
    let mut first = src.translated((direction + 1) % 6);
    let mut second = src.translated((direction + 5) % 6);

    if let (Some(first_hex), Some(second_hex)) = (game.board.hex(first), game.board.hex(second)) {
        let first_el = elevation_occupied(entity, first_hex);
        let second_el = elevation_occupied(entity, second_hex);
        if first_el < second_el || (first_el == second_el && dice.coin_flip()) {
            std::mem::swap(&mut first, &mut second);
        }
    }

    for candidate in [first, second] {
        if is_valid_displacement(game, entity_id, src, src.direction(&candidate))? {
            return Ok(candidate);
        }
    }
    Ok(src)
}

/// Can the unit leave the battle by walking off its board edge?
pub fn can_entity_flee(game: &Game, entity_id: EntityId) -> Result<bool> {
    let entity = game.entity(entity_id)?;
    Ok(entity.walk_mp > 0 && !entity.prone && game.board.is_edge(entity.position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::types::Owner;
    use crate::entity::Entity;

    fn setup() -> (Game, EntityId) {
        let mut board = Board::new(8, 8);
        board.set_elevation(Coords::new(4, 3), 2);
        let mut game = Game::new(board).unwrap();
        let id = game.add_entity(
            Entity::biped_mech("Target", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(4, 4), 0),
        );
        (game, id)
    }

    #[test]
    fn test_cannot_be_pushed_up_a_cliff() {
        let (game, id) = setup();
        let src = Coords::new(4, 4);
        assert!(!is_valid_displacement(&game, id, src, 0).unwrap());
        assert!(is_valid_displacement(&game, id, src, 3).unwrap());
    }

    #[test]
    fn test_off_board_is_invalid() {
        let (mut game, id) = setup();
        game.entity_mut(id).unwrap().position = Coords::new(0, 0);
        assert!(!is_valid_displacement(&game, id, Coords::new(0, 0), 0).unwrap());
    }

    #[test]
    fn test_search_order_prefers_right() {
        let (game, id) = setup();
        let found = valid_displacement(&game, id, Coords::new(4, 4), 0).unwrap();
        assert_eq!(found, Some(Coords::new(4, 4).translated(1)));
        assert_eq!(
            preferred_displacement(&game, id, Coords::new(4, 4), 3).unwrap(),
            Some(Coords::new(4, 5))
        );
    }

    #[test]
    fn test_chain_displacement() {
        let (mut game, id) = setup();
        let blocker = game.add_entity(
            Entity::biped_mech("Blocker", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(4, 5), 0),
        );
        assert!(is_valid_displacement(&game, id, Coords::new(4, 4), 3).unwrap());
        // Pin the blocker against the board edge
        game.entity_mut(blocker).unwrap().position = Coords::new(4, 7);
        game.entity_mut(id).unwrap().position = Coords::new(4, 6);
        assert!(!is_valid_displacement(&game, id, Coords::new(4, 6), 3).unwrap());
    }

    #[test]
    fn test_missed_charge_prefers_higher_hex() {
        let mut board = Board::new(8, 8);
        let src = Coords::new(4, 4);
        board.set_elevation(src.translated(5), 1);
        let mut game = Game::new(board).unwrap();
        let id = game.add_entity(
            Entity::biped_mech("Charger", Owner::new(1, 1), 50.0, 4, 0).at(src, 0),
        );
        let mut dice = Dice::new(1);
        for _ in 0..5 {
            let landed = missed_charge_displacement(&game, id, src, 0, &mut dice).unwrap();
            assert_eq!(landed, src.translated(5));
        }
    }

    #[test]
    fn test_missed_charge_tie_is_one_of_the_flanks() {
        let (game, _) = setup();
        let src = Coords::new(2, 4);
        let mut game = game;
        let id = game.add_entity(Entity::biped_mech("Charger", Owner::new(1, 1), 50.0, 4, 0).at(src, 0));
        let mut dice = Dice::new(9);
        let landed = missed_charge_displacement(&game, id, src, 0, &mut dice).unwrap();
        assert!(landed == src.translated(1) || landed == src.translated(5));
    }

    #[test]
    fn test_flee_from_edge() {
        let (mut game, id) = setup();
        assert!(!can_entity_flee(&game, id).unwrap());
        game.entity_mut(id).unwrap().position = Coords::new(0, 4);
        assert!(can_entity_flee(&game, id).unwrap());
        game.entity_mut(id).unwrap().prone = true;
        assert!(!can_entity_flee(&game, id).unwrap());
    }
}
