//! Movement - step lists, the path compiler and displacement
//!
//! A planner builds a `MovementPath` (by hand or with a pathfinder), then
//! `compile` annotates it against the current game. Nothing here moves a
//! unit except `apply_path`.

pub mod compile;
pub mod cost;
pub mod displacement;
pub mod pathfinder;
pub mod step;

pub use compile::{apply_path, compile, stacking_violation};
pub use cost::{is_movement_possible, is_piloting_needed, movement_cost};
pub use displacement::{
    can_entity_flee, is_valid_displacement, missed_charge_displacement, preferred_displacement,
    valid_displacement,
};
pub use step::{
    adjusted_facing, turn_direction, turn_for_lateral_shift, turn_for_lateral_shift_backwards,
    MoveStep, MovementPath, StepType,
};
