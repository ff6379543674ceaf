//! Structures - buildings, bridges and fuel tanks discovered from board terrain
//!
//! Damage to a structure is tracked per hex. Current CF drops as soon as
//! damage lands; phase CF only catches up at the end of the phase.

pub mod basement;
pub mod building;
pub mod charges;
pub mod construction;
pub mod section;

pub use basement::BasementType;
pub use building::{discover_structures, Building, BuildingId, StructureKind};
pub use charges::DemolitionCharge;
pub use construction::{BuildingClass, ConstructionType};
pub use section::BuildingSection;
