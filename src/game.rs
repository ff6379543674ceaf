//! Game state - the board, the units on it and the attacks declared this phase
//!
//! The rules functions take `&Game` and read everything they need from
//! here. Only the turn driver holds `&mut Game`.

use crate::board::{Board, Coords};
use crate::core::error::{EngineError, Result};
use crate::core::types::EntityId;
use crate::damage::Dice;
use crate::entity::{
    elevation_occupied, height, DisplacementAttack, DisplacementKind, Entity, WeaponAttack,
};
use crate::structures::{discover_structures, Building};

/// One game in progress
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub structures: Vec<Building>,
    pub round: u32,
    entities: Vec<Entity>,
    attacks: Vec<WeaponAttack>,
}

impl Game {
    /// Start a game on `board`, discovering its structures
    pub fn new(board: Board) -> Result<Self> {
        let structures = discover_structures(&board)?;
        tracing::info!(
            "New game on {}x{} board with {} structures",
            board.width,
            board.height,
            structures.len()
        );
        Ok(Self {
            board,
            structures,
            round: 1,
            entities: Vec::new(),
            attacks: Vec::new(),
        })
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        tracing::debug!("{} deployed at {}", entity.name, entity.position);
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .ok_or(EngineError::EntityNotFound(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EngineError::EntityNotFound(id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Units standing in `coords`, in deployment order
    pub fn entities_at(&self, coords: Coords) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.position == coords)
    }

    pub fn first_entity_at(&self, coords: Coords) -> Option<&Entity> {
        self.entities_at(coords).next()
    }

    pub fn is_enemy_mech_in(&self, entity: &Entity, coords: Coords) -> bool {
        self.entities_at(coords)
            .any(|other| other.class.is_mech() && other.owner.is_enemy_of(&entity.owner))
    }

    pub fn is_enemy_unit_in(&self, entity: &Entity, coords: Coords) -> bool {
        self.entities_at(coords)
            .any(|other| other.owner.is_enemy_of(&entity.owner))
    }

    /// Is anyone charging, DFA-ing or pushing `target`?
    pub fn is_target_of_displacement_attack(&self, target: EntityId) -> bool {
        self.displacement_attacker_of(target).is_some()
    }

    pub fn displacement_attacker_of(&self, target: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| {
            e.id != target
                && e.displacement_attack
                    .is_some_and(|attack| attack.target == target)
        })
    }

    /// Record that `attacker` is making a displacement attack on `target`
    pub fn declare_displacement(
        &mut self,
        attacker: EntityId,
        kind: DisplacementKind,
        target: EntityId,
    ) -> Result<()> {
        self.entity(target)?;
        let entity = self.entity_mut(attacker)?;
        entity.displacement_attack = Some(DisplacementAttack { kind, target });
        tracing::debug!("{} declares {:?}", entity.name, kind);
        Ok(())
    }

    /// Level the unit stands at
    pub fn elevation_of(&self, entity: &Entity) -> Result<i32> {
        let hex = self.board.require_hex(entity.position)?;
        Ok(elevation_occupied(entity, hex))
    }

    /// Level of the top of the unit
    pub fn abs_height_of(&self, entity: &Entity) -> Result<i32> {
        Ok(self.elevation_of(entity)? + height(entity))
    }

    /// Record a weapon attack for this phase and mark the weapon fired
    pub fn declare_attack(&mut self, attack: WeaponAttack) -> Result<()> {
        self.entity(attack.target)?;
        let attacker = self.entity_mut(attack.attacker)?;
        let weapon = attacker.weapons.get_mut(attack.weapon).ok_or_else(|| {
            EngineError::InvalidArgument(format!("no weapon #{} mounted", attack.weapon))
        })?;
        weapon.used_this_round = true;
        self.attacks.push(attack);
        Ok(())
    }

    pub fn attacks(&self) -> &[WeaponAttack] {
        &self.attacks
    }

    pub fn attacks_by(&self, attacker: EntityId) -> impl Iterator<Item = &WeaponAttack> {
        self.attacks.iter().filter(move |a| a.attacker == attacker)
    }

    pub fn structure_at(&self, coords: Coords) -> Option<&Building> {
        self.structures.iter().find(|b| b.contains(coords))
    }

    pub fn structure_at_mut(&mut self, coords: Coords) -> Option<&mut Building> {
        self.structures.iter_mut().find(|b| b.contains(coords))
    }

    fn no_structure(coords: Coords) -> EngineError {
        EngineError::InvalidArgument(format!("no structure at {}", coords))
    }

    pub fn roll_basement(&mut self, coords: Coords, dice: &mut Dice) -> Result<bool> {
        let Self {
            board, structures, ..
        } = self;
        let building = structures
            .iter_mut()
            .find(|b| b.contains(coords))
            .ok_or_else(|| Self::no_structure(coords))?;
        building.roll_basement(coords, board, dice)
    }

    pub fn collapse_basement(&mut self, coords: Coords) -> Result<bool> {
        let Self {
            board, structures, ..
        } = self;
        let building = structures
            .iter_mut()
            .find(|b| b.contains(coords))
            .ok_or_else(|| Self::no_structure(coords))?;
        building.collapse_basement(coords, board)
    }

    /// Phase boundary: structures catch their phase CF up
    pub fn end_phase(&mut self) {
        for building in &mut self.structures {
            building.end_phase();
        }
        self.attacks.clear();
    }

    /// Start the next round
    pub fn new_round(&mut self) {
        self.end_phase();
        for entity in &mut self.entities {
            entity.new_round();
        }
        self.round += 1;
        tracing::info!("Round {} begins", self.round);
    }
}
