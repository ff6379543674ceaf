//! Property tests for board geometry and path compilation

use std::collections::BTreeSet;

use proptest::prelude::*;

use mech_rules::board::{arc_contains, intervening, Arc, Board, Coords};
use mech_rules::core::types::Owner;
use mech_rules::entity::Entity;
use mech_rules::game::Game;
use mech_rules::movement::{compile, MovementPath, StepType};

const WIDTH: i32 = 16;
const HEIGHT: i32 = 17;

fn coords() -> impl Strategy<Value = Coords> {
    (0..WIDTH, 0..HEIGHT).prop_map(|(x, y)| Coords::new(x, y))
}

fn step_type() -> impl Strategy<Value = StepType> {
    prop_oneof![
        Just(StepType::Forwards),
        Just(StepType::Forwards),
        Just(StepType::Backwards),
        Just(StepType::TurnLeft),
        Just(StepType::TurnRight),
        Just(StepType::LateralLeft),
        Just(StepType::LateralRight),
    ]
}

proptest! {
    #[test]
    fn intervening_is_symmetric(a in coords(), b in coords()) {
        let forward: BTreeSet<_> = intervening(a, b).into_iter().collect();
        let backward: BTreeSet<_> = intervening(b, a).into_iter().collect();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn intervening_includes_endpoints(a in coords(), b in coords()) {
        let hexes = intervening(a, b);
        prop_assert!(hexes.contains(&a));
        prop_assert!(hexes.contains(&b));
    }

    #[test]
    fn side_arcs_partition_the_circle(src in coords(), dest in coords(), facing in 0u8..6) {
        prop_assume!(src != dest);
        let inside = [Arc::Forward, Arc::LeftSide, Arc::RightSide, Arc::Rear]
            .into_iter()
            .filter(|&arc| arc_contains(src, facing, dest, arc))
            .count();
        prop_assert_eq!(inside, 1);
        prop_assert!(arc_contains(src, facing, dest, Arc::Full));
    }

    #[test]
    fn arm_arcs_cover_forward(src in coords(), dest in coords(), facing in 0u8..6) {
        prop_assume!(src != dest);
        if arc_contains(src, facing, dest, Arc::Forward) {
            prop_assert!(arc_contains(src, facing, dest, Arc::LeftArm));
            prop_assert!(arc_contains(src, facing, dest, Arc::RightArm));
        }
    }

    #[test]
    fn compile_is_idempotent(
        start in coords(),
        facing in 0u8..6,
        steps in prop::collection::vec(step_type(), 0..12),
    ) {
        let mut game = Game::new(Board::new(WIDTH as u32, HEIGHT as u32)).unwrap();
        let mech = game.add_entity(
            Entity::biped_mech("Walker", Owner::new(1, 1), 50.0, 5, 0).at(start, facing),
        );

        let mut path = MovementPath::from_steps(&steps);
        compile(&game, mech, &mut path).unwrap();
        let first = path.clone();
        compile(&game, mech, &mut path).unwrap();
        prop_assert_eq!(first, path);
    }

    #[test]
    fn nothing_legal_follows_an_illegal_step(
        start in coords(),
        facing in 0u8..6,
        steps in prop::collection::vec(step_type(), 0..12),
    ) {
        let mut game = Game::new(Board::new(WIDTH as u32, HEIGHT as u32)).unwrap();
        let mech = game.add_entity(
            Entity::biped_mech("Walker", Owner::new(1, 1), 50.0, 5, 0).at(start, facing),
        );

        let mut path = MovementPath::from_steps(&steps);
        compile(&game, mech, &mut path).unwrap();
        let mut seen_illegal = false;
        for step in path.steps() {
            if seen_illegal {
                prop_assert!(!step.is_legal());
            }
            seen_illegal |= !step.is_legal();
        }
    }
}
