//! Validated state transitions applied to the territorial ledger.
//!
//! Every operation checks all of its preconditions before writing anything,
//! so a rejected action leaves the ledger and the player's pools exactly as
//! they were. A count of zero is accepted as a no-op once the region-level
//! checks (start region, adjacency) have passed.

use crate::board::{Action, Player, PlayerId, RegionId, TerritorialLedger, TerritoryGraph};

/// Why an action was rejected. The action had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("new armies may only be placed on the start region")]
    NotStartRegion,

    #[error("regions are not adjacent by land")]
    NotAdjacentByLand,

    #[error("regions are not adjacent")]
    NotAdjacent,

    #[error("not enough armies in the source region")]
    InsufficientArmies,

    #[error("no pieces left in the pool")]
    PoolExhausted,

    #[error("player has no army in the region")]
    NotOccupying,

    #[error("a player cannot destroy their own army")]
    SelfTarget,

    #[error("opponent has no army in the region")]
    NoArmyPresent,

    #[error("region {0} is not on the map")]
    UnknownRegion(RegionId),

    #[error("player {0} is not in the game")]
    UnknownPlayer(PlayerId),

    #[error("player {0} does not take actions")]
    NotActive(PlayerId),

    #[error("starting armies have already been placed")]
    StartingArmiesPlaced,
}

/// Borrowed view of the map and ledger that actions are applied through.
#[derive(Debug)]
pub struct Operations<'a> {
    graph: &'a TerritoryGraph,
    ledger: &'a mut TerritorialLedger,
}

impl<'a> Operations<'a> {
    pub fn new(graph: &'a TerritoryGraph, ledger: &'a mut TerritorialLedger) -> Self {
        Operations { graph, ledger }
    }

    /// Dispatches a resolved action descriptor for `actor`.
    pub fn apply(&mut self, actor: &mut Player, action: &Action) -> Result<(), ActionError> {
        match *action {
            Action::PlaceArmies { count, region } => {
                let start = self.graph.start_region().ok_or(ActionError::NotStartRegion)?;
                self.place_new_armies(actor, count, region, start)
            }
            Action::MoveOverLand { count, from, to } => self.move_over_land(actor, count, from, to),
            Action::MoveOverWater { count, from, to } => self.move_armies(actor, count, from, to, true),
            Action::BuildCity { region } => self.build_city(actor, region),
            Action::DestroyArmy { region, opponent } => self.destroy_army(actor, region, opponent),
            Action::Skip => Ok(()),
        }
    }

    fn check_region(&self, region: RegionId) -> Result<(), ActionError> {
        if self.graph.contains(region) {
            Ok(())
        } else {
            Err(ActionError::UnknownRegion(region))
        }
    }

    /// Moves `n` armies from the player's pool onto `region`, which must be
    /// the start region.
    pub fn place_new_armies(
        &mut self,
        player: &mut Player,
        n: u32,
        region: RegionId,
        start: RegionId,
    ) -> Result<(), ActionError> {
        self.check_region(region)?;
        if region != start {
            return Err(ActionError::NotStartRegion);
        }
        if n == 0 {
            return Ok(());
        }
        if !player.take_armies(n) {
            return Err(ActionError::PoolExhausted);
        }
        self.ledger.add_armies(player.id(), region, n);
        log::debug!("{} placed {} armies on {}", player.name(), n, region);
        Ok(())
    }

    /// Moves `n` armies along a land edge.
    pub fn move_over_land(&mut self, player: &Player, n: u32, from: RegionId, to: RegionId) -> Result<(), ActionError> {
        self.move_armies(player, n, from, to, false)
    }

    /// Moves `n` armies along an edge; water edges are usable only when
    /// `allow_water` is set.
    pub fn move_armies(
        &mut self,
        player: &Player,
        n: u32,
        from: RegionId,
        to: RegionId,
        allow_water: bool,
    ) -> Result<(), ActionError> {
        self.check_region(from)?;
        self.check_region(to)?;
        if !self.graph.is_adjacent(from, to, allow_water) {
            return Err(if allow_water {
                ActionError::NotAdjacent
            } else {
                ActionError::NotAdjacentByLand
            });
        }
        if n == 0 {
            return Ok(());
        }
        self.ledger
            .remove_armies(player.id(), from, n)
            .map_err(|_| ActionError::InsufficientArmies)?;
        self.ledger.add_armies(player.id(), to, n);
        log::debug!("{} moved {} armies {} -> {}", player.name(), n, from, to);
        Ok(())
    }

    /// Builds a city where the player currently has armies.
    ///
    /// Cities stack: the same region may receive several.
    pub fn build_city(&mut self, player: &mut Player, region: RegionId) -> Result<(), ActionError> {
        self.check_region(region)?;
        if self.ledger.armies_of(player.id(), region) == 0 {
            return Err(ActionError::NotOccupying);
        }
        if !player.take_city() {
            return Err(ActionError::PoolExhausted);
        }
        self.ledger.add_cities(player.id(), region, 1);
        log::debug!("{} built a city on {}", player.name(), region);
        Ok(())
    }

    /// Removes exactly one of `opponent`'s armies from `region`.
    ///
    /// The actor's own armies and pools are untouched.
    pub fn destroy_army(&mut self, actor: &Player, region: RegionId, opponent: PlayerId) -> Result<(), ActionError> {
        if opponent == actor.id() {
            return Err(ActionError::SelfTarget);
        }
        self.check_region(region)?;
        self.ledger
            .remove_armies(opponent, region, 1)
            .map_err(|_| ActionError::NoArmyPresent)?;
        log::debug!("{} destroyed an army of {} on {}", actor.name(), opponent, region);
        Ok(())
    }
}
