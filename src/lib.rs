//! Mech Rules - hex wargame mechanics engine
//!
//! Board geometry and line of sight, movement path compilation, to-hit
//! resolution for every attack type, damage rolls and destructible
//! structures.

pub mod board;
pub mod combat;
pub mod core;
pub mod damage;
pub mod entity;
pub mod game;
pub mod movement;
pub mod structures;
