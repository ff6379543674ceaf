//! Piloting skill rolls

use serde::{Deserialize, Serialize};

use crate::combat::to_hit::{Resolution, ToHitData};
use crate::core::constants::{
    GYRO_DESTROYED_PSR_MODIFIER, LEGS_DESTROYED_PSR_MODIFIER, SHUTDOWN_PSR_MODIFIER,
};
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::entity::{Location, MechSystem, UnitClass};
use crate::game::Game;

/// A piloting roll some unit has to make
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotingRollData {
    entity: EntityId,
    data: ToHitData,
}

impl PilotingRollData {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn data(&self) -> &ToHitData {
        &self.data
    }

    /// Further modifiers pile on top of the base, e.g. for the event
    /// that forced the roll
    pub fn add_modifier(&mut self, value: i32, description: impl Into<String>) {
        self.data.add_modifier(value, description);
    }

    pub fn target_number(&self) -> Option<i32> {
        self.data.target_number()
    }
}

/// Starting point for any piloting roll `entity` makes: its piloting
/// skill, or a worse number when the machine can barely stand
pub fn base_piloting_roll(game: &Game, entity: EntityId) -> Result<PilotingRollData> {
    let unit = game.entity(entity)?;

    let fail = |value: i32, reason: String| {
        ToHitData::with_resolution(Resolution::AutomaticFail, value, reason)
    };
    let legs_lost = unit.count_destroyed_legs();

    let data = if unit.destroyed_criticals(MechSystem::Gyro, Location::CenterTorso) > 1 {
        fail(GYRO_DESTROYED_PSR_MODIFIER, "Gyro destroyed".to_string())
    } else if unit.class == UnitClass::BipedMech && legs_lost == 2 {
        fail(LEGS_DESTROYED_PSR_MODIFIER, "Both legs destroyed".to_string())
    } else if unit.class.is_quad() && legs_lost >= 3 {
        fail(LEGS_DESTROYED_PSR_MODIFIER, format!("{} legs destroyed", legs_lost))
    } else if unit.shut_down {
        fail(SHUTDOWN_PSR_MODIFIER, "Reactor shut down".to_string())
    } else if !unit.crew.conscious {
        ToHitData::impossible("Pilot unconscious")
    } else {
        ToHitData::base(unit.crew.piloting, "Base piloting skill")
    };

    tracing::debug!("{} piloting roll: {}", unit.name, data);
    Ok(PilotingRollData { entity, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coords};
    use crate::core::types::Owner;
    use crate::entity::Entity;

    fn setup(entity: Entity) -> (Game, EntityId) {
        let mut game = Game::new(Board::new(6, 6)).unwrap();
        let id = game.add_entity(entity.at(Coords::new(2, 2), 0));
        (game, id)
    }

    fn biped() -> Entity {
        Entity::biped_mech("Walker", Owner::new(1, 1), 50.0, 4, 0)
    }

    #[test]
    fn test_healthy_pilot() {
        let (game, id) = setup(biped().with_crew(4, 3));
        let roll = base_piloting_roll(&game, id).unwrap();
        assert_eq!(roll.entity(), id);
        assert_eq!(roll.target_number(), Some(3));
        assert_eq!(roll.data().description(), "Base piloting skill 3");
    }

    #[test]
    fn test_gyro_destroyed() {
        let mut mech = biped();
        mech.hit_system(MechSystem::Gyro, Location::CenterTorso);
        let (game, id) = setup(mech.clone());
        assert!(base_piloting_roll(&game, id).unwrap().data().is_roll());

        mech.hit_system(MechSystem::Gyro, Location::CenterTorso);
        let (game, id) = setup(mech);
        let roll = base_piloting_roll(&game, id).unwrap();
        assert_eq!(roll.data().resolution(), Resolution::AutomaticFail);
        assert_eq!(roll.data().value(), 3);
        assert_eq!(roll.data().description(), "Gyro destroyed");
    }

    #[test]
    fn test_legs_destroyed() {
        let mut mech = biped();
        mech.destroy_location(Location::LeftLeg);
        mech.destroy_location(Location::RightLeg);
        let (game, id) = setup(mech);
        let roll = base_piloting_roll(&game, id).unwrap();
        assert_eq!(roll.data().resolution(), Resolution::AutomaticFail);
        assert_eq!(roll.data().value(), 10);

        let mut quad = Entity::quad_mech("Crawler", Owner::new(1, 1), 60.0, 4, 0);
        quad.destroy_location(Location::LeftLeg);
        quad.destroy_location(Location::RightLeg);
        let (game, id) = setup(quad.clone());
        assert_eq!(base_piloting_roll(&game, id).unwrap().target_number(), Some(5));

        quad.destroy_location(Location::LeftArm);
        let (game, id) = setup(quad);
        let roll = base_piloting_roll(&game, id).unwrap();
        assert_eq!(roll.target_number(), None);
        assert_eq!(roll.data().value(), 10);
        assert_eq!(roll.data().description(), "3 legs destroyed");
    }

    #[test]
    fn test_shutdown_and_unconscious() {
        let mut mech = biped();
        mech.shut_down = true;
        let (game, id) = setup(mech);
        let roll = base_piloting_roll(&game, id).unwrap();
        assert_eq!(roll.data().resolution(), Resolution::AutomaticFail);
        assert_eq!(roll.data().description(), "Reactor shut down");

        let (game, id) = setup(biped());
        let mut roll = base_piloting_roll(&game, id).unwrap();
        roll.add_modifier(1, "entering water");
        assert_eq!(roll.target_number(), Some(6));

        let mut mech = biped();
        mech.crew.conscious = false;
        let (game, id) = setup(mech);
        assert!(base_piloting_roll(&game, id).unwrap().data().is_impossible());
    }
}
