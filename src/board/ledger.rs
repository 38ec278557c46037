//! Territorial ledger: army and city counts per (region, player).
//!
//! A single map keyed by the composite `(RegionId, PlayerId)` replaces the
//! per-region nested tables. Several players may hold armies in the same
//! region at once. A missing entry and an all-zero entry mean the same
//! thing for every query; entries are dropped once both counts reach zero.
//!
//! Mutators are crate-private. Outside code changes the ledger only through
//! the action operations.

use std::collections::{BTreeSet, HashMap};

use super::player::PlayerId;
use super::region::RegionId;

/// Army and city counts of one player in one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Occupancy {
    pub armies: u32,
    pub cities: u32,
}

impl Occupancy {
    pub fn is_empty(&self) -> bool {
        self.armies == 0 && self.cities == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot remove {requested} armies, only {present} present")]
pub struct LedgerError {
    pub requested: u32,
    pub present: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerritorialLedger {
    entries: HashMap<(RegionId, PlayerId), Occupancy>,
}

impl TerritorialLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_armies(&mut self, player: PlayerId, region: RegionId, n: u32) {
        if n == 0 {
            return;
        }
        self.entries.entry((region, player)).or_default().armies += n;
    }

    /// Removes `n` armies, failing without change if fewer are present.
    pub(crate) fn remove_armies(&mut self, player: PlayerId, region: RegionId, n: u32) -> Result<(), LedgerError> {
        if n == 0 {
            return Ok(());
        }
        let present = self.armies_of(player, region);
        if n > present {
            return Err(LedgerError { requested: n, present });
        }
        if let Some(entry) = self.entries.get_mut(&(region, player)) {
            entry.armies -= n;
            if entry.is_empty() {
                self.entries.remove(&(region, player));
            }
        }
        Ok(())
    }

    pub(crate) fn add_cities(&mut self, player: PlayerId, region: RegionId, n: u32) {
        if n == 0 {
            return;
        }
        self.entries.entry((region, player)).or_default().cities += n;
    }

    pub fn occupancy(&self, player: PlayerId, region: RegionId) -> Occupancy {
        self.entries
            .get(&(region, player))
            .copied()
            .unwrap_or_default()
    }

    pub fn armies_of(&self, player: PlayerId, region: RegionId) -> u32 {
        self.occupancy(player, region).armies
    }

    pub fn cities_of(&self, player: PlayerId, region: RegionId) -> u32 {
        self.occupancy(player, region).cities
    }

    /// Regions where the player has at least one army, in id order.
    pub fn regions_occupied_by(&self, player: PlayerId) -> BTreeSet<RegionId> {
        self.entries
            .iter()
            .filter(|((_, p), occ)| *p == player && occ.armies > 0)
            .map(|((r, _), _)| *r)
            .collect()
    }

    /// Sum of the player's armies over the whole board.
    pub fn total_armies_of(&self, player: PlayerId) -> u32 {
        self.entries
            .iter()
            .filter(|((_, p), _)| *p == player)
            .map(|(_, occ)| occ.armies)
            .sum()
    }

    /// Non-empty occupancy records in a region, in seat order.
    pub fn occupants(&self, region: RegionId) -> Vec<(PlayerId, Occupancy)> {
        let mut out: Vec<(PlayerId, Occupancy)> = self
            .entries
            .iter()
            .filter(|((r, _), occ)| *r == region && !occ.is_empty())
            .map(|((_, p), occ)| (*p, *occ))
            .collect();
        out.sort_by_key(|(p, _)| *p);
        out
    }
}
