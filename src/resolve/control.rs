//! Region and continent control, and victory-point scoring.
//!
//! A region is controlled by the player with strictly the most pieces there,
//! counting armies and cities alike. A continent is controlled by the player
//! controlling strictly the most of its regions. Any tie at the top leaves
//! the region or continent uncontrolled.

use std::collections::HashMap;

use crate::board::{PlayerId, RegionId, TerritorialLedger, TerritoryGraph};

/// Returns the unique player with the largest count, if any.
fn strict_leader<I>(counts: I) -> Option<PlayerId>
where
    I: IntoIterator<Item = (PlayerId, u32)>,
{
    let mut best: Option<(PlayerId, u32)> = None;
    let mut tied = false;
    for (player, n) in counts {
        if n == 0 {
            continue;
        }
        match best {
            Some((_, top)) if n < top => {}
            Some((_, top)) if n == top => tied = true,
            _ => {
                best = Some((player, n));
                tied = false;
            }
        }
    }
    if tied {
        None
    } else {
        best.map(|(p, _)| p)
    }
}

/// The player controlling `region`, if anyone does.
pub fn region_controller(ledger: &TerritorialLedger, region: RegionId) -> Option<PlayerId> {
    strict_leader(
        ledger
            .occupants(region)
            .into_iter()
            .map(|(p, occ)| (p, occ.armies + occ.cities)),
    )
}

/// Controller of every region, indexed by `RegionId`.
pub fn region_controllers(graph: &TerritoryGraph, ledger: &TerritorialLedger) -> Vec<Option<PlayerId>> {
    graph
        .regions()
        .iter()
        .map(|r| region_controller(ledger, r.id))
        .collect()
}

/// Controller of every continent, keyed by continent name.
pub fn continent_controllers<'g>(
    graph: &'g TerritoryGraph,
    ledger: &TerritorialLedger,
) -> Vec<(&'g str, Option<PlayerId>)> {
    let regions = region_controllers(graph, ledger);
    graph
        .continents()
        .into_iter()
        .map(|(name, members)| {
            let mut held: HashMap<PlayerId, u32> = HashMap::new();
            for id in members {
                if let Some(p) = regions[id.index()] {
                    *held.entry(p).or_default() += 1;
                }
            }
            let mut counts: Vec<(PlayerId, u32)> = held.into_iter().collect();
            counts.sort_unstable();
            (name, strict_leader(counts))
        })
        .collect()
}

/// Victory points earned on the board, before goods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardScore {
    pub regions: u32,
    pub continents: u32,
}

impl BoardScore {
    pub fn points(&self, per_region: u32, per_continent: u32) -> u32 {
        self.regions
            .saturating_mul(per_region)
            .saturating_add(self.continents.saturating_mul(per_continent))
    }
}

/// Counts controlled regions and continents for every player on the board.
pub fn board_scores(graph: &TerritoryGraph, ledger: &TerritorialLedger) -> HashMap<PlayerId, BoardScore> {
    let mut out: HashMap<PlayerId, BoardScore> = HashMap::new();
    for p in region_controllers(graph, ledger).into_iter().flatten() {
        out.entry(p).or_default().regions += 1;
    }
    for (_, holder) in continent_controllers(graph, ledger) {
        if let Some(p) = holder {
            out.entry(p).or_default().continents += 1;
        }
    }
    out
}
