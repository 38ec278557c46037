//! Board representation and game-state types.
//!
//! Contains the territory graph, players, the territorial ledger, and the
//! action descriptors applied to them.

pub mod action;
pub mod graph;
pub mod ledger;
pub mod player;
pub mod region;

pub use action::Action;
pub use graph::{EdgeDef, MapDefinition, MapError, RegionDef, TerritoryGraph};
pub use ledger::{LedgerError, Occupancy, TerritorialLedger};
pub use player::{CoinError, Player, PlayerId, PlayerKind};
pub use region::{Edge, EdgeKind, Region, RegionId};
