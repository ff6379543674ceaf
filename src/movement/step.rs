//! Movement steps and the paths built from them

use serde::{Deserialize, Serialize};

use crate::board::Coords;
use crate::entity::MoveType;

/// What a single step does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    TurnLeft,
    TurnRight,
    Forwards,
    Backwards,
    LateralLeft,
    LateralRight,
    LateralLeftBackwards,
    LateralRightBackwards,
    GetUp,
    StartJump,
    Charge,
    Dfa,
}

impl StepType {
    pub fn is_turn(&self) -> bool {
        matches!(self, StepType::TurnLeft | StepType::TurnRight)
    }

    pub fn is_backwards(&self) -> bool {
        matches!(
            self,
            StepType::Backwards | StepType::LateralLeftBackwards | StepType::LateralRightBackwards
        )
    }

    pub fn is_lateral(&self) -> bool {
        matches!(
            self,
            StepType::LateralLeft
                | StepType::LateralRight
                | StepType::LateralLeftBackwards
                | StepType::LateralRightBackwards
        )
    }

    /// Charge and DFA steps resolve collisions themselves
    pub fn is_displacement(&self) -> bool {
        matches!(self, StepType::Charge | StepType::Dfa)
    }
}

/// Facing after taking a turn step. Other steps leave facing alone.
pub fn adjusted_facing(facing: u8, step: StepType) -> u8 {
    match step {
        StepType::TurnRight => (facing + 1) % 6,
        StepType::TurnLeft => (facing + 5) % 6,
        _ => facing % 6,
    }
}

/// Which way to turn to get from `facing` to `dest_facing`. An about-face
/// turns left.
pub fn turn_direction(facing: u8, dest_facing: u8) -> StepType {
    let rotate = (dest_facing + 6 - facing % 6) % 6;
    if rotate >= 3 {
        StepType::TurnLeft
    } else {
        StepType::TurnRight
    }
}

/// The turn a forward lateral shift slides toward
pub fn turn_for_lateral_shift(step: StepType) -> Option<StepType> {
    match step {
        StepType::LateralLeft => Some(StepType::TurnLeft),
        StepType::LateralRight => Some(StepType::TurnRight),
        _ => None,
    }
}

/// The turn whose back hex a backward lateral shift slides into
pub fn turn_for_lateral_shift_backwards(step: StepType) -> Option<StepType> {
    match step {
        StepType::LateralLeftBackwards => Some(StepType::TurnRight),
        StepType::LateralRightBackwards => Some(StepType::TurnLeft),
        _ => None,
    }
}

/// One step of a path, with the annotations compilation fills in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    step_type: StepType,
    pub(crate) position: Coords,
    pub(crate) facing: u8,
    pub(crate) mp_used: u32,
    pub(crate) distance: u32,
    pub(crate) move_type: MoveType,
    pub(crate) danger: bool,
    pub(crate) past_danger: bool,
}

impl MoveStep {
    pub fn new(step_type: StepType) -> Self {
        Self {
            step_type,
            position: Coords::default(),
            facing: 0,
            mp_used: 0,
            distance: 0,
            move_type: MoveType::None,
            danger: false,
            past_danger: false,
        }
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn facing(&self) -> u8 {
        self.facing
    }

    /// MP spent up to and including this step
    pub fn mp_used(&self) -> u32 {
        self.mp_used
    }

    /// Hexes moved since the last switch between forward and backward
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    pub fn is_legal(&self) -> bool {
        self.move_type != MoveType::Illegal
    }

    /// This step needs a piloting roll
    pub fn is_danger(&self) -> bool {
        self.danger
    }

    /// An earlier step needed a piloting roll
    pub fn is_past_danger(&self) -> bool {
        self.past_danger
    }

    pub(crate) fn clear_annotations(&mut self) {
        *self = Self::new(self.step_type);
    }
}

/// An ordered list of steps, owned by whoever is planning the move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPath {
    steps: Vec<MoveStep>,
    pub(crate) gear: MoveType,
    pub(crate) compiled: bool,
}

impl MovementPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: &[StepType]) -> Self {
        let mut path = Self::new();
        for &step in steps {
            path.add_step(step);
        }
        path
    }

    pub fn add_step(&mut self, step: StepType) {
        self.steps.push(MoveStep::new(step));
        self.compiled = false;
    }

    pub fn append(&mut self, other: MovementPath) {
        self.steps.extend(other.steps);
        self.compiled = false;
    }

    pub fn steps(&self) -> &[MoveStep] {
        &self.steps
    }

    pub(crate) fn steps_mut(&mut self) -> &mut [MoveStep] {
        &mut self.steps
    }

    pub fn step(&self, index: usize) -> Option<&MoveStep> {
        self.steps.get(index)
    }

    pub fn step_types(&self) -> impl Iterator<Item = StepType> + '_ {
        self.steps.iter().map(|s| s.step_type)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, step: StepType) -> bool {
        self.steps.iter().any(|s| s.step_type == step)
    }

    pub fn contains_backwards(&self) -> bool {
        self.steps.iter().any(|s| s.step_type.is_backwards())
    }

    /// Total MP, as of the last step
    pub fn mp_used(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.mp_used)
    }

    pub fn last_step(&self) -> Option<&MoveStep> {
        self.steps.last()
    }

    /// The furthest step the unit can actually reach
    pub fn last_legal_step(&self) -> Option<&MoveStep> {
        self.steps.iter().rev().find(|s| s.is_legal())
    }

    /// Overall gear, once compiled
    pub fn gear(&self) -> MoveType {
        self.gear
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Rewrite turn/step/turn-back sequences as lateral shifts
    pub fn transform_lateral_shifts(&mut self) {
        let mut out: Vec<MoveStep> = Vec::with_capacity(self.steps.len());
        let mut i = 0;
        while i < self.steps.len() {
            let shift = match self.steps.get(i..i + 3) {
                Some([a, b, c]) => {
                    lateral_shift_for(a.step_type, b.step_type, c.step_type)
                }
                _ => None,
            };
            match shift {
                Some(lateral) => {
                    out.push(MoveStep::new(lateral));
                    i += 3;
                }
                None => {
                    out.push(self.steps[i].clone());
                    i += 1;
                }
            }
        }
        if out.len() != self.steps.len() {
            tracing::debug!(
                "Folded {} turn-and-step sequences into lateral shifts",
                (self.steps.len() - out.len()) / 2
            );
            self.steps = out;
            self.compiled = false;
        }
    }
}

fn lateral_shift_for(first: StepType, middle: StepType, last: StepType) -> Option<StepType> {
    use StepType::*;
    match (first, middle, last) {
        (TurnLeft, Forwards, TurnRight) => Some(LateralLeft),
        (TurnRight, Forwards, TurnLeft) => Some(LateralRight),
        (TurnRight, Backwards, TurnLeft) => Some(LateralLeftBackwards),
        (TurnLeft, Backwards, TurnRight) => Some(LateralRightBackwards),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusted_facing_wraps() {
        assert_eq!(adjusted_facing(5, StepType::TurnRight), 0);
        assert_eq!(adjusted_facing(0, StepType::TurnLeft), 5);
        assert_eq!(adjusted_facing(2, StepType::Forwards), 2);
    }

    #[test]
    fn test_about_face_turns_left() {
        assert_eq!(turn_direction(0, 3), StepType::TurnLeft);
        assert_eq!(turn_direction(0, 2), StepType::TurnRight);
        assert_eq!(turn_direction(0, 4), StepType::TurnLeft);
        assert_eq!(turn_direction(5, 0), StepType::TurnRight);
    }

    #[test]
    fn test_lateral_transform() {
        let mut path = MovementPath::from_steps(&[
            StepType::Forwards,
            StepType::TurnLeft,
            StepType::Forwards,
            StepType::TurnRight,
            StepType::TurnLeft,
            StepType::Backwards,
            StepType::TurnRight,
        ]);
        path.transform_lateral_shifts();
        let types: Vec<StepType> = path.step_types().collect();
        assert_eq!(
            types,
            vec![
                StepType::Forwards,
                StepType::LateralLeft,
                StepType::LateralRightBackwards
            ]
        );
    }

    #[test]
    fn test_transform_leaves_plain_turns() {
        let mut path =
            MovementPath::from_steps(&[StepType::TurnLeft, StepType::Forwards, StepType::Forwards]);
        path.transform_lateral_shifts();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_empty_path() {
        let path = MovementPath::new();
        assert!(path.is_empty());
        assert_eq!(path.mp_used(), 0);
        assert!(path.last_legal_step().is_none());
    }
}
