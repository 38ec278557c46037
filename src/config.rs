//! Game configuration.
//!
//! Defaults follow the published rules. A host may override any field from
//! JSON; missing fields keep their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("min_players ({min}) must be at least 2 and no more than max_players ({max})")]
    PlayerBounds { min: usize, max: usize },

    #[error("no starting coins configured for {0} players")]
    MissingCoins(usize),

    #[error("army_pool ({pool}) is smaller than starting_armies ({starting})")]
    PoolTooSmall { pool: u32, starting: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Armies each player owns for the whole game.
    pub army_pool: u32,
    /// Cities each player owns for the whole game.
    pub city_pool: u32,
    /// Armies each seat places on the start region during setup.
    pub starting_armies: u32,
    pub min_players: usize,
    pub max_players: usize,
    /// Starting purse by number of players.
    pub starting_coins: BTreeMap<usize, u32>,
    /// Seat a neutral placeholder in two-player games.
    pub neutral_player: bool,
    /// Times a bidder is asked before an over-balance bid becomes 0.
    pub max_bid_attempts: u32,
    pub points_per_region: u32,
    pub points_per_continent: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            army_pool: 14,
            city_pool: 3,
            starting_armies: 3,
            min_players: 2,
            max_players: 5,
            starting_coins: BTreeMap::from([(2, 14), (3, 11), (4, 9), (5, 8)]),
            neutral_player: true,
            max_bid_attempts: 3,
            points_per_region: 1,
            points_per_continent: 1,
        }
    }
}

impl GameConfig {
    /// Parses and validates a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(ConfigError::PlayerBounds {
                min: self.min_players,
                max: self.max_players,
            });
        }
        for n in self.min_players..=self.max_players {
            if !self.starting_coins.contains_key(&n) {
                return Err(ConfigError::MissingCoins(n));
            }
        }
        if self.army_pool < self.starting_armies {
            return Err(ConfigError::PoolTooSmall {
                pool: self.army_pool,
                starting: self.starting_armies,
            });
        }
        Ok(())
    }

    /// Starting coins for a game of `players` seats, if configured.
    pub fn coins_for(&self, players: usize) -> Option<u32> {
        self.starting_coins.get(&players).copied()
    }
}
