//! Structure integration tests
//!
//! Structures are discovered when a game starts and take damage through
//! the game's board.

use mech_rules::board::{Board, Coords, Terrain, TerrainKind};
use mech_rules::core::error::EngineError;
use mech_rules::core::types::PlayerId;
use mech_rules::damage::Dice;
use mech_rules::game::Game;
use mech_rules::structures::{
    BasementType, BuildingClass, ConstructionType, DemolitionCharge, StructureKind,
};

/// A two-hex medium building at (2,1)-(2,2) and a one-hex bridge at (5,4)
fn town() -> Board {
    let mut board = Board::new(8, 8);
    board.add_terrain(Coords::new(2, 1), Terrain::with_exits(TerrainKind::Building, 2, 0b001000));
    board.add_terrain(Coords::new(2, 2), Terrain::with_exits(TerrainKind::Building, 2, 0b000001));
    board.set_terrain(Coords::new(2, 2), TerrainKind::BasementType, 2);
    board.add_terrain(Coords::new(5, 4), Terrain::new(TerrainKind::Bridge, 1));
    board.set_terrain(Coords::new(5, 4), TerrainKind::BridgeCf, 30);
    board
}

#[test]
fn test_game_discovers_structures() {
    let game = Game::new(town()).unwrap();
    assert_eq!(game.structures.len(), 2);

    let building = game.structure_at(Coords::new(2, 2)).unwrap();
    assert_eq!(building.kind(), StructureKind::Building);
    assert_eq!(building.construction_type(), ConstructionType::Medium);
    assert_eq!(building.building_class(), BuildingClass::Standard);
    assert_eq!(building.hex_count(), 2);
    assert_eq!(building.to_string(), format!("Medium Standard {}", building.name()));

    let bridge = game.structure_at(Coords::new(5, 4)).unwrap();
    assert_eq!(bridge.kind(), StructureKind::Bridge);
    assert_eq!(bridge.current_cf(Coords::new(5, 4)).unwrap(), 30);

    assert!(game.structure_at(Coords::new(0, 0)).is_none());
}

#[test]
fn test_damage_over_a_phase() {
    let mut game = Game::new(town()).unwrap();
    let hex = Coords::new(2, 1);
    let building = game.structure_at_mut(hex).unwrap();

    assert_eq!(building.absorption(hex).unwrap(), 4);
    assert_eq!(building.absorb_damage(hex, 25).unwrap(), 21);
    assert_eq!(building.current_cf(hex).unwrap(), 15);
    assert_eq!(building.phase_cf(hex).unwrap(), 40);

    // Still soaks up as much until the phase ends
    assert_eq!(building.absorb_damage(hex, 3).unwrap(), 0);
    assert_eq!(building.current_cf(hex).unwrap(), 12);

    game.end_phase();
    let building = game.structure_at(hex).unwrap();
    assert_eq!(building.phase_cf(hex).unwrap(), 12);
    assert_eq!(building.absorption(hex).unwrap(), 2);
}

#[test]
fn test_fortress_takes_half() {
    let mut board = Board::new(4, 4);
    board.add_terrain(Coords::new(1, 1), Terrain::new(TerrainKind::Building, 3));
    board.set_terrain(Coords::new(1, 1), TerrainKind::BuildingClass, 2);
    let mut game = Game::new(board).unwrap();
    let building = game.structure_at_mut(Coords::new(1, 1)).unwrap();

    assert_eq!(building.building_class(), BuildingClass::Fortress);
    assert_eq!(building.current_cf(Coords::new(1, 1)).unwrap(), 90);
    building.absorb_damage(Coords::new(1, 1), 20).unwrap();
    assert_eq!(building.current_cf(Coords::new(1, 1)).unwrap(), 80);
}

#[test]
fn test_basement_roll_and_collapse() {
    let mut game = Game::new(town()).unwrap();
    let mut dice = Dice::new(99);
    let unknown = Coords::new(2, 1);
    let known = Coords::new(2, 2);

    assert!(game.roll_basement(unknown, &mut dice).unwrap());
    let rolled = game.structure_at(unknown).unwrap().basement(unknown).unwrap();
    assert_ne!(rolled, BasementType::Unknown);
    assert_eq!(
        game.board.hex(unknown).unwrap().level_of(TerrainKind::BasementType),
        rolled.value()
    );
    // Once known it stays put
    assert!(!game.roll_basement(unknown, &mut dice).unwrap());

    assert!(!game.roll_basement(known, &mut dice).unwrap());
    assert!(game.collapse_basement(known).unwrap());
    assert_eq!(
        game.board.hex(known).unwrap().level_of(TerrainKind::BasementCollapsed),
        1
    );
    assert!(game.structure_at(known).unwrap().is_basement_collapsed(known).unwrap());
    assert!(!game.collapse_basement(known).unwrap());
}

#[test]
fn test_no_structure_there() {
    let mut game = Game::new(town()).unwrap();
    let mut dice = Dice::new(1);
    assert!(matches!(
        game.roll_basement(Coords::new(6, 6), &mut dice),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(game.collapse_basement(Coords::new(6, 6)).is_err());
}

#[test]
fn test_mismatched_construction_is_an_inconsistency() {
    let mut board = town();
    board.add_terrain(Coords::new(2, 2), Terrain::with_exits(TerrainKind::Building, 3, 0b000001));
    let err = Game::new(board).unwrap_err();
    assert!(matches!(err, EngineError::ConstructionMismatch { .. }));
    assert!(err.is_inconsistency());
}

#[test]
fn test_demolition_charges() {
    let mut game = Game::new(town()).unwrap();
    let building = game.structure_at_mut(Coords::new(2, 1)).unwrap();
    let player = PlayerId(1);

    building.add_demolition_charge(player, 20, Coords::new(2, 1)).unwrap();
    building.add_demolition_charge(player, 20, Coords::new(2, 1)).unwrap();
    assert!(building.add_demolition_charge(player, 20, Coords::new(4, 4)).is_err());
    assert_eq!(building.demolition_charges().len(), 2);

    let charge = DemolitionCharge::new(player, 20, Coords::new(2, 1));
    assert!(building.remove_demolition_charge(&charge));
    assert_eq!(building.demolition_charges().len(), 1);

    let stray = DemolitionCharge::new(player, 5, Coords::new(5, 4));
    assert!(building.set_demolition_charges(vec![stray]).is_err());
}

#[test]
fn test_losing_hexes() {
    let mut game = Game::new(town()).unwrap();
    let building = game.structure_at_mut(Coords::new(2, 1)).unwrap();

    assert!(building.remove_hex(Coords::new(2, 1)));
    assert!(!building.remove_hex(Coords::new(2, 1)));
    assert_eq!(building.hex_count(), 1);
    assert_eq!(building.original_hex_count(), 2);
    assert_eq!(building.collapsed_hex_count(), 1);
}
