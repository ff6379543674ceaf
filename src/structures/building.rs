//! Buildings, bridges and fuel tanks
//!
//! A structure is found by flood-filling from one hex through the exit
//! flags of its structure terrain. Each hex becomes a `BuildingSection`
//! keyed by coordinate, so per-hex state can never drift out of step.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coords, Hex, Terrain, TerrainKind};
use crate::core::error::{EngineError, Result};
use crate::core::types::PlayerId;
use crate::damage::Dice;
use crate::structures::basement::BasementType;
use crate::structures::charges::DemolitionCharge;
use crate::structures::construction::{BuildingClass, ConstructionType};
use crate::structures::section::BuildingSection;

/// Structure identifier, derived from the hex discovery started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub i32);

impl BuildingId {
    pub fn from_coords(coords: Coords) -> Self {
        Self((coords.x << 16) ^ coords.y)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What sort of structure this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    Building,
    Bridge,
    FuelTank { magnitude: i32 },
}

impl StructureKind {
    /// Terrain that marks the structure's hexes
    pub fn terrain(&self) -> TerrainKind {
        match self {
            StructureKind::Building => TerrainKind::Building,
            StructureKind::Bridge => TerrainKind::Bridge,
            StructureKind::FuelTank { .. } => TerrainKind::FuelTank,
        }
    }

    fn cf_terrain(&self) -> TerrainKind {
        match self {
            StructureKind::Building => TerrainKind::BuildingCf,
            StructureKind::Bridge => TerrainKind::BridgeCf,
            StructureKind::FuelTank { .. } => TerrainKind::FuelTankCf,
        }
    }
}

/// A multi-hex structure and its per-hex damage state
#[derive(Debug, Clone)]
pub struct Building {
    id: BuildingId,
    kind: StructureKind,
    construction: ConstructionType,
    class: BuildingClass,
    sections: BTreeMap<Coords, BuildingSection>,
    charges: Vec<DemolitionCharge>,
    original_hexes: usize,
    collapsed_hexes: usize,
}

fn non_negative(level: i32, what: &str, at: Coords) -> Result<u32> {
    u32::try_from(level).map_err(|_| {
        EngineError::BoardInconsistency(format!("{} {} at {} is negative", what, level, at))
    })
}

fn class_of(hex: &Hex) -> Result<BuildingClass> {
    match hex.terrain(TerrainKind::BuildingClass) {
        None => Ok(BuildingClass::Standard),
        Some(t) => BuildingClass::from_id(t.level).ok_or_else(|| {
            EngineError::BoardInconsistency(format!(
                "unknown building class {} at {}",
                t.level, hex.coords
            ))
        }),
    }
}

impl Building {
    pub fn building_at(board: &Board, seed: Coords) -> Result<Self> {
        Self::discover(board, seed, TerrainKind::Building)
    }

    pub fn bridge_at(board: &Board, seed: Coords) -> Result<Self> {
        Self::discover(board, seed, TerrainKind::Bridge)
    }

    pub fn fuel_tank_at(board: &Board, seed: Coords) -> Result<Self> {
        Self::discover(board, seed, TerrainKind::FuelTank)
    }

    /// Flood-fill the structure marked by `structure` terrain at `seed`.
    ///
    /// Every hex of a building must share its construction type and class;
    /// a hex that disagrees is a `ConstructionMismatch`.
    pub fn discover(board: &Board, seed: Coords, structure: TerrainKind) -> Result<Self> {
        let seed_hex = board.require_hex(seed)?;
        let level = seed_hex
            .terrain(structure)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "{:?} expected at {}",
                    structure,
                    seed.board_num()
                ))
            })?
            .level;

        let kind = match structure {
            TerrainKind::Building => StructureKind::Building,
            TerrainKind::Bridge => StructureKind::Bridge,
            TerrainKind::FuelTank => StructureKind::FuelTank {
                magnitude: seed_hex.level_of(TerrainKind::FuelTankMagnitude),
            },
            other => {
                return Err(EngineError::InvalidArgument(format!(
                    "{:?} is not a structure",
                    other
                )))
            }
        };
        let construction = ConstructionType::from_id(level).ok_or_else(|| {
            EngineError::BoardInconsistency(format!(
                "unknown construction type {} at {}",
                level,
                seed.board_num()
            ))
        })?;

        let mut building = Self {
            id: BuildingId::from_coords(seed),
            kind,
            construction,
            class: class_of(seed_hex)?,
            sections: BTreeMap::new(),
            charges: Vec::new(),
            original_hexes: 0,
            collapsed_hexes: 0,
        };

        let mut frontier = vec![seed];
        while let Some(coords) = frontier.pop() {
            if building.sections.contains_key(&coords) {
                continue;
            }
            let Some(hex) = board.hex(coords) else {
                continue;
            };
            if !hex.contains(structure) {
                continue;
            }
            if kind == StructureKind::Building {
                building.check_matches(hex)?;
            }
            let section = building.section_from(hex)?;
            building.sections.insert(coords, section);
            building.original_hexes += 1;

            for dir in 0..6 {
                if hex.contains_exit(structure, dir) {
                    frontier.push(coords.translated(dir));
                }
            }
        }

        tracing::info!(
            "Discovered {} covering {} hexes",
            building,
            building.original_hexes
        );
        Ok(building)
    }

    fn check_matches(&self, hex: &Hex) -> Result<()> {
        let level = hex.level_of(TerrainKind::Building);
        match ConstructionType::from_id(level) {
            Some(t) if t == self.construction => {}
            found => {
                return Err(EngineError::ConstructionMismatch {
                    what: "construction type",
                    at: hex.coords,
                    expected: self.construction.to_string(),
                    found: found.map_or_else(|| level.to_string(), |t| t.to_string()),
                })
            }
        }
        let class = class_of(hex)?;
        if class != self.class {
            return Err(EngineError::ConstructionMismatch {
                what: "building class",
                at: hex.coords,
                expected: self.class.to_string(),
                found: class.to_string(),
            });
        }
        Ok(())
    }

    fn section_from(&self, hex: &Hex) -> Result<BuildingSection> {
        let coords = hex.coords;
        let cf = match hex.terrain(self.kind.cf_terrain()) {
            Some(t) => non_negative(t.level, "CF", coords)?,
            None => self.construction.default_cf(),
        };
        let armor = non_negative(hex.level_of(TerrainKind::BuildingArmor), "armor", coords)?;
        let basement = match self.kind {
            StructureKind::Building => {
                BasementType::from_value(hex.level_of(TerrainKind::BasementType))
            }
            _ => BasementType::None,
        };
        let mut section = BuildingSection::new(coords, cf, armor, basement);
        section.basement_collapsed = hex.level_of(TerrainKind::BasementCollapsed) == 1;
        Ok(section)
    }

    pub fn id(&self) -> BuildingId {
        self.id
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn structure_terrain(&self) -> TerrainKind {
        self.kind.terrain()
    }

    pub fn construction_type(&self) -> ConstructionType {
        self.construction
    }

    pub fn building_class(&self) -> BuildingClass {
        self.class
    }

    pub fn contains(&self, coords: Coords) -> bool {
        self.sections.contains_key(&coords)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coords> + '_ {
        self.sections.keys().copied()
    }

    pub fn sections(&self) -> impl Iterator<Item = &BuildingSection> {
        self.sections.values()
    }

    pub fn section(&self, coords: Coords) -> Option<&BuildingSection> {
        self.sections.get(&coords)
    }

    fn require_section(&self, coords: Coords) -> Result<&BuildingSection> {
        self.sections.get(&coords).ok_or_else(|| {
            EngineError::BoardInconsistency(format!("{} has no hex at {}", self.name(), coords))
        })
    }

    fn require_section_mut(&mut self, coords: Coords) -> Result<&mut BuildingSection> {
        let name = self.name();
        self.sections.get_mut(&coords).ok_or_else(|| {
            EngineError::BoardInconsistency(format!("{} has no hex at {}", name, coords))
        })
    }

    pub fn current_cf(&self, coords: Coords) -> Result<u32> {
        Ok(self.require_section(coords)?.current_cf)
    }

    pub fn phase_cf(&self, coords: Coords) -> Result<u32> {
        Ok(self.require_section(coords)?.phase_cf)
    }

    pub fn armor(&self, coords: Coords) -> Result<u32> {
        Ok(self.require_section(coords)?.armor)
    }

    pub fn set_current_cf(&mut self, coords: Coords, cf: u32) -> Result<()> {
        self.require_section_mut(coords)?.current_cf = cf;
        Ok(())
    }

    pub fn set_phase_cf(&mut self, coords: Coords, cf: u32) -> Result<()> {
        self.require_section_mut(coords)?.phase_cf = cf;
        Ok(())
    }

    pub fn set_armor(&mut self, coords: Coords, armor: u32) -> Result<()> {
        self.require_section_mut(coords)?.armor = armor;
        Ok(())
    }

    pub fn is_burning(&self, coords: Coords) -> Result<bool> {
        Ok(self.require_section(coords)?.burning)
    }

    pub fn set_burning(&mut self, coords: Coords, burning: bool) -> Result<()> {
        self.require_section_mut(coords)?.burning = burning;
        Ok(())
    }

    pub fn basement(&self, coords: Coords) -> Result<BasementType> {
        Ok(self.require_section(coords)?.basement)
    }

    pub fn set_basement(&mut self, coords: Coords, basement: BasementType) -> Result<()> {
        self.require_section_mut(coords)?.basement = basement;
        Ok(())
    }

    pub fn is_basement_collapsed(&self, coords: Coords) -> Result<bool> {
        Ok(self.require_section(coords)?.basement_collapsed)
    }

    pub fn set_basement_collapsed(&mut self, coords: Coords, collapsed: bool) -> Result<()> {
        self.require_section_mut(coords)?.basement_collapsed = collapsed;
        Ok(())
    }

    /// Drop the floor into the basement and mark the board hex. Returns
    /// false when there is no basement to collapse or it already has.
    pub fn collapse_basement(&mut self, coords: Coords, board: &mut Board) -> Result<bool> {
        let section = self.require_section(coords)?;
        if !section.basement.can_collapse() {
            tracing::debug!("{} has no basement to collapse at {}", self.name(), coords);
            return Ok(false);
        }
        if section.basement_collapsed {
            tracing::debug!("Basement under {} at {} already collapsed", self.name(), coords);
            return Ok(false);
        }

        board
            .require_hex_mut(coords)?
            .add_terrain(Terrain::new(TerrainKind::BasementCollapsed, 1));
        self.require_section_mut(coords)?.basement_collapsed = true;
        tracing::warn!("Basement under {} at {} collapses", self.name(), coords.board_num());
        Ok(true)
    }

    /// Roll for an undetermined basement and record it on the board.
    /// Returns false, without rolling, once the basement is known.
    pub fn roll_basement(&mut self, coords: Coords, board: &mut Board, dice: &mut Dice) -> Result<bool> {
        if self.require_section(coords)?.basement != BasementType::Unknown {
            return Ok(false);
        }
        let hex = board.require_hex_mut(coords)?;
        let roll = dice.roll_2d6();
        let basement = BasementType::from_roll(roll);
        hex.add_terrain(Terrain::new(TerrainKind::BasementType, basement.value()));
        self.require_section_mut(coords)?.basement = basement;

        tracing::info!(
            "Basement roll for {} at {}: {} ({})",
            self.name(),
            coords.board_num(),
            roll,
            basement.description()
        );
        Ok(true)
    }

    /// Damage this hex soaks up, from the CF it started the phase with
    pub fn absorption(&self, coords: Coords) -> Result<u32> {
        Ok(self.require_section(coords)?.absorption())
    }

    /// Hit the hex for `damage`. The structure loses CF (scaled by its
    /// class) and the return value is what passes through to anyone
    /// inside.
    pub fn absorb_damage(&mut self, coords: Coords, damage: u32) -> Result<u32> {
        let scale = self.class.damage_to_scale();
        let section = self.require_section_mut(coords)?;
        let absorbed = section.absorption();
        let cf_damage = (damage as f64 * scale).ceil() as u32;
        section.current_cf = section.current_cf.saturating_sub(cf_damage);
        Ok(damage.saturating_sub(absorbed))
    }

    pub fn add_demolition_charge(&mut self, player: PlayerId, damage: u32, coords: Coords) -> Result<()> {
        self.require_section(coords)?;
        self.charges
            .push(DemolitionCharge::new(player, damage, coords));
        tracing::debug!("Demolition charge of {} set in {} at {}", damage, self.name(), coords);
        Ok(())
    }

    /// Remove one charge equal to `charge`
    pub fn remove_demolition_charge(&mut self, charge: &DemolitionCharge) -> bool {
        match self.charges.iter().position(|c| c == charge) {
            Some(index) => {
                self.charges.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn demolition_charges(&self) -> &[DemolitionCharge] {
        &self.charges
    }

    pub fn set_demolition_charges(&mut self, charges: Vec<DemolitionCharge>) -> Result<()> {
        for charge in &charges {
            if !self.contains(charge.coords) {
                return Err(EngineError::InvalidArgument(format!(
                    "charge at {} is outside {}",
                    charge.coords,
                    self.name()
                )));
            }
        }
        self.charges = charges;
        Ok(())
    }

    /// Take a destroyed hex out of the structure
    pub fn remove_hex(&mut self, coords: Coords) -> bool {
        if self.sections.remove(&coords).is_some() {
            self.collapsed_hexes += 1;
            true
        } else {
            false
        }
    }

    pub fn hex_count(&self) -> usize {
        self.sections.len()
    }

    pub fn original_hex_count(&self) -> usize {
        self.original_hexes
    }

    pub fn collapsed_hex_count(&self) -> usize {
        self.collapsed_hexes
    }

    pub fn damage_from_scale(&self) -> f64 {
        self.class.damage_from_scale()
    }

    pub fn damage_to_scale(&self) -> f64 {
        self.class.damage_to_scale()
    }

    pub fn damage_reduction_from_inside(&self) -> f32 {
        self.construction.damage_reduction_from_inside()
    }

    pub fn damage_reduction_from_outside(&self) -> f32 {
        self.construction.damage_reduction_from_outside()
    }

    /// Phase boundary: damage taken this phase now counts
    pub fn end_phase(&mut self) {
        for section in self.sections.values_mut() {
            section.phase_cf = section.current_cf;
        }
    }

    pub fn name(&self) -> String {
        let label = match (self.kind, self.construction) {
            (StructureKind::FuelTank { .. }, _) => "Fuel Tank",
            (_, ConstructionType::Wall) => "Wall",
            (StructureKind::Building, _) => "Building",
            (StructureKind::Bridge, _) => "Bridge",
        };
        format!("{} #{}", label, self.id)
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.construction.prefix(),
            self.class.prefix(),
            self.name()
        )
    }
}

/// Find every structure on the board, scanning row by row
pub fn discover_structures(board: &Board) -> Result<Vec<Building>> {
    let mut found: Vec<Building> = Vec::new();
    for hex in board.hexes() {
        for kind in [TerrainKind::Building, TerrainKind::Bridge, TerrainKind::FuelTank] {
            let known = found
                .iter()
                .any(|b| b.structure_terrain() == kind && b.contains(hex.coords));
            if hex.contains(kind) && !known {
                found.push(Building::discover(board, hex.coords, kind)?);
            }
        }
    }
    Ok(found)
}
