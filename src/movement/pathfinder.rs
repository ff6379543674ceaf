//! Quick path builders
//!
//! These only lay out steps. Whether the unit can actually take them is up
//! to `compile`.

use crate::board::Coords;
use crate::movement::step::{adjusted_facing, turn_direction, MovementPath, StepType};

/// Turn in place from `facing` to `dest_facing` the short way
pub fn rotate(facing: u8, dest_facing: u8) -> MovementPath {
    let mut path = MovementPath::new();
    let mut facing = facing % 6;
    let dest_facing = dest_facing % 6;
    while facing != dest_facing {
        let turn = turn_direction(facing, dest_facing);
        path.add_step(turn);
        facing = adjusted_facing(facing, turn);
    }
    path
}

/// Walk forwards toward `dest`, turning to face each next hex
pub fn lazy(src: Coords, facing: u8, dest: Coords) -> MovementPath {
    let (path, _) = forwards_to(src, facing, dest);
    path
}

/// Back up to `dest`. Lays out steps even where backing is not allowed.
pub fn backwards_lazy(src: Coords, facing: u8, dest: Coords) -> MovementPath {
    let mut path = MovementPath::new();
    let mut facing = facing % 6;
    let mut pos = src;
    while pos != dest {
        let dest_facing = (pos.direction(&dest) + 3) % 6;
        path.append(rotate(facing, dest_facing));
        path.add_step(StepType::Backwards);
        facing = dest_facing;
        pos = pos.translated((dest_facing + 3) % 6);
    }
    path
}

/// Walk to the hex in front of the target, face it, and charge
pub fn charge_lazy(src: Coords, facing: u8, dest: Coords) -> MovementPath {
    let mut path = approach(src, facing, dest);
    path.add_step(StepType::Charge);
    path
}

/// Jump to the hex in front of the target, face it, and come down on it
pub fn dfa_lazy(src: Coords, facing: u8, dest: Coords) -> MovementPath {
    let mut path = MovementPath::from_steps(&[StepType::StartJump]);
    path.append(approach(src, facing, dest));
    path.add_step(StepType::Dfa);
    path
}

fn approach(src: Coords, facing: u8, dest: Coords) -> MovementPath {
    let sub_dest = dest.translated(dest.direction(&src));
    let (mut path, (pos, facing)) = forwards_to(src, facing, sub_dest);
    path.append(rotate(facing, pos.direction(&dest)));
    path
}

fn forwards_to(src: Coords, facing: u8, dest: Coords) -> (MovementPath, (Coords, u8)) {
    let mut path = MovementPath::new();
    let mut facing = facing % 6;
    let mut pos = src;
    while pos != dest {
        let dir = pos.direction(&dest);
        path.append(rotate(facing, dir));
        path.add_step(StepType::Forwards);
        facing = dir;
        pos = pos.translated(dir);
    }
    (path, (pos, facing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(path: &MovementPath) -> Vec<StepType> {
        path.step_types().collect()
    }

    #[test]
    fn test_rotate_shortest_way() {
        assert_eq!(types(&rotate(0, 1)), vec![StepType::TurnRight]);
        assert_eq!(types(&rotate(0, 5)), vec![StepType::TurnLeft]);
        assert_eq!(
            types(&rotate(0, 3)),
            vec![StepType::TurnLeft, StepType::TurnLeft, StepType::TurnLeft]
        );
        assert!(rotate(4, 4).is_empty());
    }

    #[test]
    fn test_lazy_straight_line() {
        let path = lazy(Coords::new(3, 5), 0, Coords::new(3, 2));
        assert_eq!(types(&path), vec![StepType::Forwards; 3]);
    }

    #[test]
    fn test_backwards_lazy() {
        let path = backwards_lazy(Coords::new(3, 2), 0, Coords::new(3, 4));
        assert_eq!(types(&path), vec![StepType::Backwards; 2]);
    }

    #[test]
    fn test_charge_ends_in_target_hex() {
        let path = charge_lazy(Coords::new(3, 6), 0, Coords::new(3, 2));
        let t = types(&path);
        assert_eq!(t.last(), Some(&StepType::Charge));
        assert_eq!(t.iter().filter(|s| **s == StepType::Forwards).count(), 3);
    }

    #[test]
    fn test_dfa_starts_with_jump() {
        let path = dfa_lazy(Coords::new(3, 6), 0, Coords::new(3, 2));
        let t = types(&path);
        assert_eq!(t.first(), Some(&StepType::StartJump));
        assert_eq!(t.last(), Some(&StepType::Dfa));
    }
}
