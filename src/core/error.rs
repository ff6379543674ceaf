use thiserror::Error;

use crate::board::coords::Coords;
use crate::core::types::EntityId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Coordinates must be adjacent: {from} -> {to}")]
    NotAdjacent { from: Coords, to: Coords },

    #[error("Coordinates not on the board: {0}")]
    OffBoard(Coords),

    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    #[error("Board inconsistency: {0}")]
    BoardInconsistency(String),

    #[error("Unexpected {what} at {at}: expected {expected}, got {found}")]
    ConstructionMismatch {
        what: &'static str,
        at: Coords,
        expected: String,
        found: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    /// True for errors that mean the board or structure data is broken,
    /// as opposed to a caller passing bad arguments.
    pub fn is_inconsistency(&self) -> bool {
        matches!(
            self,
            EngineError::BoardInconsistency(_) | EngineError::ConstructionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
