//! Region and edge definitions for a loaded map.
//!
//! Regions live in an arena owned by `TerritoryGraph` and are addressed by a
//! compact `RegionId`. The map-scoped string key is kept alongside for
//! lookup and display. Edges are stored as id pairs, never as references
//! between regions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a region in its graph's arena.
///
/// Only meaningful for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Returns the arena index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Traversal medium of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Land,
    Water,
}

impl EdgeKind {
    /// Maps the `water` flag used by map definitions to an edge kind.
    pub const fn from_water(water: bool) -> Self {
        if water {
            EdgeKind::Water
        } else {
            EdgeKind::Land
        }
    }

    pub const fn is_water(self) -> bool {
        matches!(self, EdgeKind::Water)
    }
}

/// An undirected edge between two regions, as recorded by the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: RegionId,
    pub b: RegionId,
    pub kind: EdgeKind,
}

impl Edge {
    /// Returns the endpoint pair with the smaller id first.
    pub fn unordered(&self) -> (RegionId, RegionId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// A single occupiable territory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub key: String,
    pub name: String,
    pub continent: String,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unordered_pair_is_normalized() {
        let e = Edge { a: RegionId(4), b: RegionId(1), kind: EdgeKind::Land };
        assert_eq!(e.unordered(), (RegionId(1), RegionId(4)));
        let f = Edge { a: RegionId(1), b: RegionId(4), kind: EdgeKind::Water };
        assert_eq!(e.unordered(), f.unordered());
    }

    #[test]
    fn water_flag_maps_to_kind() {
        assert_eq!(EdgeKind::from_water(true), EdgeKind::Water);
        assert_eq!(EdgeKind::from_water(false), EdgeKind::Land);
        assert!(EdgeKind::Water.is_water());
        assert!(!EdgeKind::Land.is_water());
    }
}
