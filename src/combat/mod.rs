//! Combat - to-hit numbers for every attack type
//!
//! Each `to_hit_*` function either gates the attack (impossible or
//! automatic, with a reason) or builds up the list of modifiers that make
//! the target number. Nothing here rolls dice or applies damage; see
//! `crate::damage` for that.

pub mod charge;
pub mod los;
pub mod modifiers;
pub mod physical;
pub mod piloting;
pub mod to_hit;
pub mod weapon;

pub use charge::{to_hit_charge, to_hit_charge_from, to_hit_dfa, to_hit_dfa_from};
pub use los::{can_see, sightline, LosEffects, Sightline};
pub use physical::{
    can_mech_find_club, club_mech_has, to_hit_club, to_hit_kick, to_hit_punch, to_hit_push,
};
pub use piloting::{base_piloting_roll, PilotingRollData};
pub use to_hit::{HitTable, Modifier, Resolution, ToHitData};
pub use weapon::to_hit_weapon;
