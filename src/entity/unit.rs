//! Unit records
//!
//! Every unit on the board is one `Entity`. Mechs, vehicles and infantry
//! differ only in their class and movement mode; the rules branch on those
//! flags instead of on a type hierarchy.

use serde::{Deserialize, Serialize};

use crate::board::Coords;
use crate::core::constants::RUN_MP_FACTOR;
use crate::core::types::{EntityId, Owner};
use crate::entity::equipment::{Club, Weapon};

/// Broad category of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    BipedMech,
    QuadMech,
    Tank,
    Infantry,
}

impl UnitClass {
    pub fn is_mech(&self) -> bool {
        matches!(self, UnitClass::BipedMech | UnitClass::QuadMech)
    }

    pub fn is_quad(&self) -> bool {
        matches!(self, UnitClass::QuadMech)
    }

    pub fn is_vehicle(&self) -> bool {
        matches!(self, UnitClass::Tank)
    }

    pub fn is_infantry(&self) -> bool {
        matches!(self, UnitClass::Infantry)
    }
}

/// How a unit gets around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    Biped,
    Quad,
    Tracked,
    Wheeled,
    Hover,
    Infantry,
}

impl MovementMode {
    /// Tracked, wheeled and hover units pay double for elevation changes
    pub fn is_ground_vehicle(&self) -> bool {
        matches!(
            self,
            MovementMode::Tracked | MovementMode::Wheeled | MovementMode::Hover
        )
    }
}

/// Movement gear used for a step or for a whole turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveType {
    #[default]
    None,
    Walk,
    Run,
    Jump,
    Illegal,
}

/// Body locations. Vehicles use the last six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Front,
    LeftSide,
    RightSide,
    Rear,
    Turret,
    Body,
}

impl Location {
    pub fn is_arm(&self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    pub fn is_leg(&self) -> bool {
        matches!(self, Location::LeftLeg | Location::RightLeg)
    }

    /// The opposite arm, for arm locations
    pub fn other_arm(&self) -> Option<Location> {
        match self {
            Location::LeftArm => Some(Location::RightArm),
            Location::RightArm => Some(Location::LeftArm),
            _ => None,
        }
    }
}

/// Internal systems that occupy critical slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MechSystem {
    Shoulder,
    UpperArm,
    LowerArm,
    Hand,
    Hip,
    UpperLeg,
    LowerLeg,
    Foot,
    Gyro,
    Sensors,
}

/// One critical slot holding a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSlot {
    pub system: MechSystem,
    pub location: Location,
    pub destroyed: bool,
}

/// Left or right limb, for punches and kicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limb {
    Left,
    Right,
}

impl Limb {
    pub fn arm(&self) -> Location {
        match self {
            Limb::Left => Location::LeftArm,
            Limb::Right => Location::RightArm,
        }
    }
}

/// Pilot or crew skills. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub gunnery: i32,
    pub piloting: i32,
    pub conscious: bool,
}

impl Default for Crew {
    fn default() -> Self {
        Self {
            gunnery: 4,
            piloting: 5,
            conscious: true,
        }
    }
}

/// Kind of attack that moves the target out of its hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplacementKind {
    Charge,
    Dfa,
    Push,
}

/// A declared displacement attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplacementAttack {
    pub kind: DisplacementKind,
    pub target: EntityId,
}

/// A unit on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub owner: Owner,
    pub class: UnitClass,
    pub movement_mode: MovementMode,

    pub position: Coords,
    pub facing: u8,
    /// Torso twist or turret facing
    pub secondary_facing: u8,

    /// Tons
    pub weight: f32,
    pub walk_mp: u32,
    pub jump_mp: u32,

    // This turn's movement
    pub mp_used: u32,
    pub delta_distance: u32,
    pub moved: MoveType,
    /// Still has to move this phase
    pub ready: bool,

    pub prone: bool,
    pub shut_down: bool,
    pub immobile: bool,
    pub arms_flipped: bool,

    pub crew: Crew,
    pub heat_firing_modifier: i32,

    pub destroyed_locations: Vec<Location>,
    pub systems: Vec<SystemSlot>,
    pub weapons: Vec<Weapon>,
    pub club: Option<Club>,
    pub displacement_attack: Option<DisplacementAttack>,
}

impl Entity {
    fn base(
        name: &str,
        owner: Owner,
        class: UnitClass,
        movement_mode: MovementMode,
        weight: f32,
        walk_mp: u32,
        jump_mp: u32,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.to_string(),
            owner,
            class,
            movement_mode,
            position: Coords::default(),
            facing: 0,
            secondary_facing: 0,
            weight,
            walk_mp,
            jump_mp,
            mp_used: 0,
            delta_distance: 0,
            moved: MoveType::None,
            ready: true,
            prone: false,
            shut_down: false,
            immobile: false,
            arms_flipped: false,
            crew: Crew::default(),
            heat_firing_modifier: 0,
            destroyed_locations: Vec::new(),
            systems: Vec::new(),
            weapons: Vec::new(),
            club: None,
            displacement_attack: None,
        }
    }

    /// A two-legged mech with a full set of actuators
    pub fn biped_mech(name: &str, owner: Owner, weight: f32, walk_mp: u32, jump_mp: u32) -> Self {
        let mut mech = Self::base(
            name,
            owner,
            UnitClass::BipedMech,
            MovementMode::Biped,
            weight,
            walk_mp,
            jump_mp,
        );
        for arm in [Location::LeftArm, Location::RightArm] {
            mech.install_systems(
                arm,
                &[
                    MechSystem::Shoulder,
                    MechSystem::UpperArm,
                    MechSystem::LowerArm,
                    MechSystem::Hand,
                ],
            );
        }
        for leg in [Location::LeftLeg, Location::RightLeg] {
            mech.install_leg(leg);
        }
        mech.install_core();
        mech
    }

    /// A four-legged mech. The front legs sit in the arm locations.
    pub fn quad_mech(name: &str, owner: Owner, weight: f32, walk_mp: u32, jump_mp: u32) -> Self {
        let mut mech = Self::base(
            name,
            owner,
            UnitClass::QuadMech,
            MovementMode::Quad,
            weight,
            walk_mp,
            jump_mp,
        );
        for leg in [
            Location::LeftArm,
            Location::RightArm,
            Location::LeftLeg,
            Location::RightLeg,
        ] {
            mech.install_leg(leg);
        }
        mech.install_core();
        mech
    }

    pub fn tank(name: &str, owner: Owner, weight: f32, mode: MovementMode, cruise_mp: u32) -> Self {
        Self::base(name, owner, UnitClass::Tank, mode, weight, cruise_mp, 0)
    }

    pub fn infantry(name: &str, owner: Owner, walk_mp: u32) -> Self {
        Self::base(
            name,
            owner,
            UnitClass::Infantry,
            MovementMode::Infantry,
            1.0,
            walk_mp,
            0,
        )
    }

    fn install_leg(&mut self, leg: Location) {
        self.install_systems(
            leg,
            &[
                MechSystem::Hip,
                MechSystem::UpperLeg,
                MechSystem::LowerLeg,
                MechSystem::Foot,
            ],
        );
    }

    fn install_core(&mut self) {
        self.install_systems(Location::CenterTorso, &[MechSystem::Gyro; 4]);
        self.install_systems(Location::Head, &[MechSystem::Sensors; 2]);
    }

    fn install_systems(&mut self, location: Location, systems: &[MechSystem]) {
        self.systems
            .extend(systems.iter().map(|&system| SystemSlot {
                system,
                location,
                destroyed: false,
            }));
    }

    /// Place the unit, facing and twist reset to `facing`
    pub fn at(mut self, position: Coords, facing: u8) -> Self {
        self.position = position;
        self.facing = facing % 6;
        self.secondary_facing = self.facing;
        self
    }

    pub fn with_crew(mut self, gunnery: i32, piloting: i32) -> Self {
        self.crew.gunnery = gunnery;
        self.crew.piloting = piloting;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn with_club(mut self, club: Club) -> Self {
        self.club = Some(club);
        self
    }

    pub fn run_mp(&self) -> u32 {
        (self.walk_mp as f32 * RUN_MP_FACTOR).ceil() as u32
    }

    pub fn is_location_destroyed(&self, location: Location) -> bool {
        self.destroyed_locations.contains(&location)
    }

    pub fn destroy_location(&mut self, location: Location) {
        if !self.is_location_destroyed(location) {
            self.destroyed_locations.push(location);
        }
    }

    /// Number of destroyed critical slots of `system` in `location`
    pub fn destroyed_criticals(&self, system: MechSystem, location: Location) -> usize {
        self.systems
            .iter()
            .filter(|s| s.system == system && s.location == location && s.destroyed)
            .count()
    }

    /// Destroy one intact slot of `system` in `location`. Returns false if
    /// there was nothing left to destroy.
    pub fn hit_system(&mut self, system: MechSystem, location: Location) -> bool {
        match self
            .systems
            .iter_mut()
            .find(|s| s.system == system && s.location == location && !s.destroyed)
        {
            Some(slot) => {
                slot.destroyed = true;
                true
            }
            None => false,
        }
    }

    /// Remove every slot of `system` in `location`, as for a mech built
    /// without lower arm or hand actuators
    pub fn remove_system(&mut self, system: MechSystem, location: Location) {
        self.systems
            .retain(|s| !(s.system == system && s.location == location));
    }

    /// At least one undamaged slot of `system` in an intact `location`
    pub fn has_working_system(&self, system: MechSystem, location: Location) -> bool {
        !self.is_location_destroyed(location)
            && self
                .systems
                .iter()
                .any(|s| s.system == system && s.location == location && !s.destroyed)
    }

    /// Locations that count as legs
    pub fn leg_locations(&self) -> &'static [Location] {
        match self.class {
            UnitClass::QuadMech => &[
                Location::LeftArm,
                Location::RightArm,
                Location::LeftLeg,
                Location::RightLeg,
            ],
            UnitClass::BipedMech => &[Location::LeftLeg, Location::RightLeg],
            _ => &[],
        }
    }

    pub fn count_destroyed_legs(&self) -> usize {
        self.leg_locations()
            .iter()
            .filter(|&&loc| self.is_location_destroyed(loc))
            .count()
    }

    pub fn has_hip_crit(&self) -> bool {
        self.leg_locations()
            .iter()
            .any(|&loc| self.destroyed_criticals(MechSystem::Hip, loc) > 0)
    }

    /// Location of the leg used for a kick. Quads kick with their front legs.
    pub fn kick_leg(&self, limb: Limb) -> Location {
        match (self.class.is_quad(), limb) {
            (true, Limb::Right) => Location::RightArm,
            (true, Limb::Left) => Location::LeftArm,
            (false, Limb::Right) => Location::RightLeg,
            (false, Limb::Left) => Location::LeftLeg,
        }
    }

    /// Has any weapon in `location` fired this round?
    pub fn weapon_fired_from(&self, location: Location) -> bool {
        self.weapons
            .iter()
            .any(|w| w.used_this_round && w.location == location)
    }

    pub fn has_displacement_attack(&self) -> bool {
        self.displacement_attack.is_some()
    }

    pub fn is_making_dfa(&self) -> bool {
        matches!(
            self.displacement_attack,
            Some(DisplacementAttack {
                kind: DisplacementKind::Dfa,
                ..
            })
        )
    }

    pub fn is_pushing(&self) -> bool {
        matches!(
            self.displacement_attack,
            Some(DisplacementAttack {
                kind: DisplacementKind::Push,
                ..
            })
        )
    }

    /// Clear per-turn movement and firing state
    pub fn new_round(&mut self) {
        self.mp_used = 0;
        self.delta_distance = 0;
        self.moved = MoveType::None;
        self.ready = true;
        self.displacement_attack = None;
        for weapon in &mut self.weapons {
            weapon.used_this_round = false;
        }
    }
}
