//! Rule constants - every fixed number the rules engine uses lives here
//!
//! Angles are whole degrees clockwise from north.

// Geometry
pub const HEX_SIDES: u8 = 6;
pub const DEGREES_PER_HEXSIDE: i32 = 60;
/// Bearings (folded into 0..=180) that run exactly through hex vertices
pub const HEX_LINE_BEARINGS: [i32; 3] = [30, 90, 150];

// Terrain
/// Woods stand this many levels above the hex floor for line of sight
pub const WOODS_HEIGHT: i32 = 2;
/// Effective woods (light = 1, heavy = 2) at which line of sight is blocked
pub const WOODS_BLOCK_THRESHOLD: i32 = 3;

// Elevation limits per step
pub const MECH_MAX_ELEVATION_CHANGE: i32 = 2;
pub const OTHER_MAX_ELEVATION_CHANGE: i32 = 1;

// Base to-hit numbers
pub const PUNCH_BASE_TO_HIT: i32 = 4;
pub const KICK_BASE_TO_HIT: i32 = 3;
pub const CLUB_BASE_TO_HIT: i32 = 4;
pub const PUSH_BASE_TO_HIT: i32 = 4;
pub const CHARGE_BASE_TO_HIT: i32 = 5;
pub const DFA_BASE_TO_HIT: i32 = 5;

// To-hit modifiers
pub const PARTIAL_COVER_MODIFIER: i32 = 3;
pub const TARGET_IMMOBILE_MODIFIER: i32 = -4;
pub const LONG_RANGE_MODIFIER: i32 = 4;
pub const MEDIUM_RANGE_MODIFIER: i32 = 2;

// Piloting
pub const GYRO_DESTROYED_PSR_MODIFIER: i32 = 3;
pub const LEGS_DESTROYED_PSR_MODIFIER: i32 = 10;
pub const SHUTDOWN_PSR_MODIFIER: i32 = 3;

// Movement
/// Running MP is walking MP times this, rounded up
pub const RUN_MP_FACTOR: f32 = 1.5;
/// Extra MP for a lateral shift
pub const LATERAL_SHIFT_COST: u32 = 1;
