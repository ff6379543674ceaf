//! Engine configuration
//!
//! The rules themselves are fixed (see `core::constants`). This covers
//! the knobs a driver sets up once: the dice seed, the log filter and
//! the size of the demonstration board.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{EngineError, Result};

/// Configuration for an engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the dice. Same seed, same rolls.
    pub seed: u64,

    /// `tracing_subscriber` env filter directive
    pub log_filter: String,

    /// Width of the demonstration board in hexes
    pub board_width: u32,

    /// Height of the demonstration board in hexes
    pub board_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            log_filter: "mech_rules=info".into(),
            board_width: 16,
            board_height: 17,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(EngineError::Config)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.board_width < 2 || self.board_height < 2 {
            return Err(format!(
                "board must be at least 2x2 hexes, got {}x{}",
                self.board_width, self.board_height
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
