//! Session configuration.
//!
//! Defaults come from [`crate::types`]; each field can be overridden through
//! environment variables:
//!
//! - `MATCH3_WIDTH`: board columns (default 8)
//! - `MATCH3_HEIGHT`: board rows (default 8)
//! - `MATCH3_SEED`: seed for the tile bag (default 1)
//! - `MATCH3_KINDS`: number of tile kinds in play, 2..=6 (default 5)
//! - `MATCH3_MAX_MOVES`: moves per session (default 20)

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{TileKind, DEFAULT_HEIGHT, DEFAULT_MAX_MOVES, DEFAULT_WIDTH, MIN_TILE_KINDS};

pub const ENV_WIDTH: &str = "MATCH3_WIDTH";
pub const ENV_HEIGHT: &str = "MATCH3_HEIGHT";
pub const ENV_SEED: &str = "MATCH3_SEED";
pub const ENV_KINDS: &str = "MATCH3_KINDS";
pub const ENV_MAX_MOVES: &str = "MATCH3_MAX_MOVES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub kinds: usize,
    pub max_moves: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
            kinds: 5,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            width: parse_var(&lookup, ENV_WIDTH)?.unwrap_or(defaults.width),
            height: parse_var(&lookup, ENV_HEIGHT)?.unwrap_or(defaults.height),
            seed: parse_var(&lookup, ENV_SEED)?.unwrap_or(defaults.seed),
            kinds: parse_var(&lookup, ENV_KINDS)?.unwrap_or(defaults.kinds),
            max_moves: parse_var(&lookup, ENV_MAX_MOVES)?.unwrap_or(defaults.max_moves),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let max = TileKind::ALL.len();
        if self.kinds < MIN_TILE_KINDS || self.kinds > max {
            return Err(ConfigError::TileKinds {
                got: self.kinds,
                min: MIN_TILE_KINDS,
                max,
            });
        }
        if self.max_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        Ok(())
    }

    /// Tile kinds in play.
    pub fn palette(&self) -> &'static [TileKind] {
        TileKind::palette(self.kinds)
    }
}

/// Parse an optional variable; blank values count as unset.
fn parse_var<V: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<V>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        })
}
