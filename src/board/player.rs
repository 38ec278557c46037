//! Players, their coin purse, and their finite army and city pools.
//!
//! Occupied regions are not stored here; they are derived from the
//! territorial ledger so the two can never disagree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seat index of a player within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Whether a seat is a real participant or the neutral placeholder used in
/// two-player games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Active,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot pay {requested} coins with {available} in the purse")]
pub struct CoinError {
    pub requested: u32,
    pub available: u32,
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    coins: u32,
    armies_available: u32,
    cities_available: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, coins: u32, army_pool: u32, city_pool: u32) -> Self {
        Player {
            id,
            name: name.to_string(),
            kind: PlayerKind::Active,
            coins,
            armies_available: army_pool,
            cities_available: city_pool,
        }
    }

    /// Creates the neutral placeholder: no coins, never bids, never wins.
    pub fn neutral(id: PlayerId, name: &str, army_pool: u32) -> Self {
        Player {
            kind: PlayerKind::Neutral,
            ..Player::new(id, name, 0, army_pool, 0)
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_neutral(&self) -> bool {
        self.kind == PlayerKind::Neutral
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Armies still in the pool, not yet placed on the board.
    pub fn armies_available(&self) -> u32 {
        self.armies_available
    }

    /// Cities still in the pool, not yet built.
    pub fn cities_available(&self) -> u32 {
        self.cities_available
    }

    /// Removes coins from the purse. The purse may reach exactly zero.
    pub fn pay_coins(&mut self, amount: u32) -> Result<(), CoinError> {
        if amount > self.coins {
            return Err(CoinError {
                requested: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Takes `n` armies out of the pool. Returns false, leaving the pool
    /// untouched, if fewer than `n` remain.
    pub(crate) fn take_armies(&mut self, n: u32) -> bool {
        match self.armies_available.checked_sub(n) {
            Some(rest) => {
                self.armies_available = rest;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_city(&mut self) -> bool {
        match self.cities_available.checked_sub(1) {
            Some(rest) => {
                self.cities_available = rest;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
