//! Resolved action descriptors.
//!
//! The card collaborator turns card text and player choices into one of
//! these before the engine sees it. Each variant carries exactly the data
//! its operation needs.

use super::player::PlayerId;
use super::region::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place `count` armies from the pool on the start region.
    PlaceArmies { count: u32, region: RegionId },

    /// Move `count` armies across a land edge.
    MoveOverLand { count: u32, from: RegionId, to: RegionId },

    /// Move `count` armies across a land or water edge.
    MoveOverWater { count: u32, from: RegionId, to: RegionId },

    /// Build one city where the actor has armies.
    BuildCity { region: RegionId },

    /// Remove one of `opponent`'s armies from `region`.
    DestroyArmy { region: RegionId, opponent: PlayerId },

    /// Decline the card's action.
    Skip,
}

impl Action {
    /// Short name for log output.
    pub const fn label(&self) -> &'static str {
        match self {
            Action::PlaceArmies { .. } => "place",
            Action::MoveOverLand { .. } => "move-land",
            Action::MoveOverWater { .. } => "move-water",
            Action::BuildCity { .. } => "build",
            Action::DestroyArmy { .. } => "destroy",
            Action::Skip => "skip",
        }
    }
}
