//! Damage & roll engine - dice, cluster hits and attack damage formulas

pub mod cluster;
pub mod dice;
pub mod physical;

pub use cluster::{missiles_hit, missiles_hit_for_roll, CLUSTER_SIZES};
pub use dice::{odds_above, odds_of, Dice};
pub use physical::{
    charge_damage, charge_damage_taken, club_damage, dfa_damage, dfa_damage_taken, kick_damage,
    punch_damage,
};
