//! Sealed-bid auction that fixes turn order at the start of a game.
//!
//! Phase flow (one-way, no re-entry):
//! - NotStarted -> Collecting: `open`
//! - Collecting -> Resolving:  `resolve` (highest bid wins, winner pays)
//! - Resolving  -> Completed:  `choose_first_player`
//!
//! The neutral placeholder seat never takes part. Each eligible player bids
//! exactly once, and a recorded bid always lies in `0..=coins`.

use std::collections::BTreeMap;

use crate::board::{Player, PlayerId};
use crate::decision::DecisionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuctionError {
    #[error("player {0} has already bid")]
    AlreadyBid(PlayerId),

    #[error("bid of {bid} exceeds the {coins} coins of player {player}")]
    BidExceedsBalance { player: PlayerId, bid: u32, coins: u32 },

    #[error("player {0} does not take part in the auction")]
    NotEligible(PlayerId),

    #[error("operation not allowed while the auction is {0:?}")]
    WrongPhase(AuctionPhase),

    #[error("{0} eligible players have not bid yet")]
    MissingBids(usize),

    #[error("tie-break picked {0}, who was not one of the tied players")]
    InvalidTieBreak(PlayerId),

    #[error("player {0} is not in the game")]
    UnknownPlayer(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuctionPhase {
    NotStarted,
    Collecting,
    Resolving,
    Completed,
}

/// What the auction decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionOutcome {
    pub winner: PlayerId,
    pub paid: u32,
    pub first_player: PlayerId,
}

#[derive(Debug, Clone)]
pub struct Auction {
    phase: AuctionPhase,
    /// Participating seats in seat order.
    eligible: Vec<PlayerId>,
    bids: BTreeMap<PlayerId, u32>,
    winner: Option<(PlayerId, u32)>,
    first_player: Option<PlayerId>,
}

impl Auction {
    /// Prepares an auction over every non-neutral player.
    pub fn new(players: &[Player]) -> Self {
        let mut eligible: Vec<PlayerId> = players
            .iter()
            .filter(|p| !p.is_neutral())
            .map(Player::id)
            .collect();
        eligible.sort_unstable();
        Auction {
            phase: AuctionPhase::NotStarted,
            eligible,
            bids: BTreeMap::new(),
            winner: None,
            first_player: None,
        }
    }

    pub fn phase(&self) -> AuctionPhase {
        self.phase
    }

    pub fn eligible(&self) -> &[PlayerId] {
        &self.eligible
    }

    pub fn bid_of(&self, player: PlayerId) -> Option<u32> {
        self.bids.get(&player).copied()
    }

    pub fn has_bid(&self, player: PlayerId) -> bool {
        self.bids.contains_key(&player)
    }

    /// Eligible players that have not bid yet, in seat order.
    pub fn pending(&self) -> Vec<PlayerId> {
        self.eligible
            .iter()
            .copied()
            .filter(|p| !self.bids.contains_key(p))
            .collect()
    }

    fn expect_phase(&self, phase: AuctionPhase) -> Result<(), AuctionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(AuctionError::WrongPhase(self.phase))
        }
    }

    /// Starts collecting bids.
    pub fn open(&mut self) -> Result<(), AuctionError> {
        self.expect_phase(AuctionPhase::NotStarted)?;
        self.phase = AuctionPhase::Collecting;
        Ok(())
    }

    /// Records `player`'s sealed bid. A second bid is refused and the first
    /// one stands.
    pub fn collect_bid(&mut self, player: &Player, amount: u32) -> Result<(), AuctionError> {
        self.expect_phase(AuctionPhase::Collecting)?;
        let id = player.id();
        if !self.eligible.contains(&id) {
            return Err(AuctionError::NotEligible(id));
        }
        if self.bids.contains_key(&id) {
            return Err(AuctionError::AlreadyBid(id));
        }
        if amount > player.coins() {
            return Err(AuctionError::BidExceedsBalance {
                player: id,
                bid: amount,
                coins: player.coins(),
            });
        }
        self.bids.insert(id, amount);
        Ok(())
    }

    /// Picks the highest bidder and charges them their bid.
    ///
    /// When several players share the top bid, `younger` is asked once per
    /// extra tied player, comparing the current leader with the next tied
    /// player in seat order; its answer becomes the new leader.
    pub fn resolve<F>(&mut self, players: &mut [Player], mut younger: F) -> Result<PlayerId, AuctionError>
    where
        F: FnMut(&Player, &Player) -> PlayerId,
    {
        self.expect_phase(AuctionPhase::Collecting)?;
        let pending = self.pending().len();
        if pending > 0 || self.bids.is_empty() {
            return Err(AuctionError::MissingBids(pending));
        }

        let top = self.bids.values().copied().max().unwrap_or(0);
        let tied: Vec<PlayerId> = self
            .bids
            .iter()
            .filter(|(_, &b)| b == top)
            .map(|(&p, _)| p)
            .collect();

        let Some((&first, rest)) = tied.split_first() else {
            return Err(AuctionError::MissingBids(0));
        };
        let mut leader = first;
        for &challenger in rest {
            let a = find(players, leader)?;
            let b = find(players, challenger)?;
            log::info!("tie at {} coins between {} and {}", top, a.name(), b.name());
            let pick = younger(a, b);
            if pick != leader && pick != challenger {
                return Err(AuctionError::InvalidTieBreak(pick));
            }
            leader = pick;
        }

        let winner = find_mut(players, leader)?;
        winner
            .pay_coins(top)
            .map_err(|e| AuctionError::BidExceedsBalance {
                player: leader,
                bid: e.requested,
                coins: e.available,
            })?;
        log::info!("{} won the auction, paying {} coins", winner.name(), top);

        self.winner = Some((leader, top));
        self.phase = AuctionPhase::Resolving;
        Ok(leader)
    }

    /// Records the winner's choice of who acts first.
    pub fn choose_first_player<F>(&mut self, players: &[Player], select: F) -> Result<PlayerId, AuctionError>
    where
        F: FnOnce(&Player, &[Player]) -> PlayerId,
    {
        self.expect_phase(AuctionPhase::Resolving)?;
        let (winner, _) = self.winner.ok_or(AuctionError::WrongPhase(self.phase))?;
        let first = select(find(players, winner)?, players);
        if !self.eligible.contains(&first) {
            return Err(AuctionError::NotEligible(first));
        }
        log::info!("{} goes first", find(players, first)?.name());
        self.first_player = Some(first);
        self.phase = AuctionPhase::Completed;
        Ok(first)
    }

    /// The result, once the auction has completed.
    pub fn outcome(&self) -> Option<AuctionOutcome> {
        match (self.phase, self.winner, self.first_player) {
            (AuctionPhase::Completed, Some((winner, paid)), Some(first_player)) => Some(AuctionOutcome {
                winner,
                paid,
                first_player,
            }),
            _ => None,
        }
    }
}

fn find(players: &[Player], id: PlayerId) -> Result<&Player, AuctionError> {
    players
        .iter()
        .find(|p| p.id() == id)
        .ok_or(AuctionError::UnknownPlayer(id))
}

fn find_mut(players: &mut [Player], id: PlayerId) -> Result<&mut Player, AuctionError> {
    players
        .iter_mut()
        .find(|p| p.id() == id)
        .ok_or(AuctionError::UnknownPlayer(id))
}

/// Runs a whole auction against a decision source.
///
/// A bid above the bidder's coins is asked again, up to `max_attempts`
/// times in total; after that the bid is recorded as 0.
pub fn run_auction(
    players: &mut [Player],
    decisions: &mut dyn DecisionSource,
    max_attempts: u32,
) -> Result<AuctionOutcome, AuctionError> {
    let mut auction = Auction::new(players);
    auction.open()?;

    for id in auction.pending() {
        let player = find(players, id)?;
        let mut recorded = false;
        for attempt in 1..=max_attempts.max(1) {
            let amount = decisions.bid(player);
            match auction.collect_bid(player, amount) {
                Ok(()) => {
                    recorded = true;
                    break;
                }
                Err(AuctionError::BidExceedsBalance { bid, coins, .. }) => {
                    log::warn!(
                        "{} bid {} with only {} coins (attempt {})",
                        player.name(),
                        bid,
                        coins,
                        attempt
                    );
                }
                Err(e) => return Err(e),
            }
        }
        if !recorded {
            auction.collect_bid(player, 0)?;
        }
    }

    auction.resolve(players, |a, b| decisions.younger(a, b))?;
    auction.choose_first_player(players, |w, all| decisions.first_player(w, all))?;
    auction
        .outcome()
        .ok_or(AuctionError::WrongPhase(auction.phase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ScriptedDecisions;

    fn seats() -> Vec<Player> {
        vec![
            Player::new(PlayerId(0), "ada", 11, 14, 3),
            Player::new(PlayerId(1), "bo", 11, 14, 3),
            Player::new(PlayerId(2), "cy", 11, 14, 3),
        ]
    }

    #[test]
    fn phases_advance_one_way() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        assert_eq!(auction.phase(), AuctionPhase::NotStarted);
        assert_eq!(
            auction.collect_bid(&players[0], 1),
            Err(AuctionError::WrongPhase(AuctionPhase::NotStarted))
        );
        auction.open().unwrap();
        assert!(auction.open().is_err());
        for p in &players {
            auction.collect_bid(p, 1).unwrap();
        }
        auction.resolve(&mut players, |a, _| a.id()).unwrap();
        assert_eq!(auction.phase(), AuctionPhase::Resolving);
        assert!(auction.collect_bid(&players[0], 0).is_err());
        auction.choose_first_player(&players, |_, _| PlayerId(2)).unwrap();
        assert_eq!(auction.phase(), AuctionPhase::Completed);
        assert!(auction.resolve(&mut players, |a, _| a.id()).is_err());
    }

    #[test]
    fn second_bid_rejected_first_stands() {
        let players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        auction.collect_bid(&players[0], 4).unwrap();
        assert_eq!(
            auction.collect_bid(&players[0], 9),
            Err(AuctionError::AlreadyBid(PlayerId(0)))
        );
        assert_eq!(auction.bid_of(PlayerId(0)), Some(4));
    }

    #[test]
    fn over_balance_bid_not_recorded() {
        let players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        assert!(matches!(
            auction.collect_bid(&players[1], 12),
            Err(AuctionError::BidExceedsBalance { bid: 12, coins: 11, .. })
        ));
        assert!(!auction.has_bid(PlayerId(1)));
        auction.collect_bid(&players[1], 11).unwrap();
    }

    #[test]
    fn resolve_requires_every_bid() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        auction.collect_bid(&players[0], 2).unwrap();
        assert_eq!(
            auction.resolve(&mut players, |a, _| a.id()),
            Err(AuctionError::MissingBids(2))
        );
        assert_eq!(players[0].coins(), 11);
    }

    #[test]
    fn tie_at_top_uses_tie_break_and_winner_pays() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        auction.collect_bid(&players[0], 5).unwrap();
        auction.collect_bid(&players[1], 5).unwrap();
        auction.collect_bid(&players[2], 3).unwrap();
        let mut asked = 0;
        let winner = auction
            .resolve(&mut players, |a, b| {
                asked += 1;
                assert_ne!(a.id(), PlayerId(2));
                assert_ne!(b.id(), PlayerId(2));
                PlayerId(0)
            })
            .unwrap();
        assert_eq!(asked, 1);
        assert_eq!(winner, PlayerId(0));
        assert_eq!(players[0].coins(), 6);
        assert_eq!(players[1].coins(), 11);
        assert_eq!(players[2].coins(), 11);
    }

    #[test]
    fn three_way_tie_asks_twice() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        for p in &players {
            auction.collect_bid(p, 2).unwrap();
        }
        let mut asked = 0;
        let winner = auction
            .resolve(&mut players, |_, b| {
                asked += 1;
                b.id()
            })
            .unwrap();
        assert_eq!(asked, 2);
        assert_eq!(winner, PlayerId(2));
        assert_eq!(players[2].coins(), 9);
    }

    #[test]
    fn tie_break_outside_tied_set_rejected() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        auction.collect_bid(&players[0], 5).unwrap();
        auction.collect_bid(&players[1], 5).unwrap();
        auction.collect_bid(&players[2], 3).unwrap();
        assert_eq!(
            auction.resolve(&mut players, |_, _| PlayerId(2)),
            Err(AuctionError::InvalidTieBreak(PlayerId(2)))
        );
        assert_eq!(auction.phase(), AuctionPhase::Collecting);
        assert!(players.iter().all(|p| p.coins() == 11));
    }

    #[test]
    fn all_zero_bids_still_produce_a_winner() {
        let mut players = seats();
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        for p in &players {
            auction.collect_bid(p, 0).unwrap();
        }
        let winner = auction.resolve(&mut players, |a, _| a.id()).unwrap();
        assert_eq!(winner, PlayerId(0));
        assert!(players.iter().all(|p| p.coins() == 11));
    }

    #[test]
    fn neutral_seat_excluded() {
        let mut players = seats();
        players.truncate(2);
        players.push(Player::neutral(PlayerId(2), "neutral", 14));
        let mut auction = Auction::new(&players);
        assert_eq!(auction.eligible(), &[PlayerId(0), PlayerId(1)]);
        auction.open().unwrap();
        assert_eq!(
            auction.collect_bid(&players[2], 0),
            Err(AuctionError::NotEligible(PlayerId(2)))
        );
    }

    #[test]
    fn run_auction_reprompts_then_declines() {
        let mut players = seats();
        let mut decisions = ScriptedDecisions::new()
            .with_bids(PlayerId(0), &[50, 50, 50])
            .with_bids(PlayerId(1), &[20, 4])
            .with_bids(PlayerId(2), &[3])
            .with_first_player(PlayerId(2));
        let outcome = run_auction(&mut players, &mut decisions, 3).unwrap();
        assert_eq!(outcome.winner, PlayerId(1));
        assert_eq!(outcome.paid, 4);
        assert_eq!(outcome.first_player, PlayerId(2));
        assert_eq!(players[1].coins(), 7);
        assert_eq!(players[0].coins(), 11);
    }

    #[test]
    fn first_player_must_be_a_participant() {
        let mut players = seats();
        players.push(Player::neutral(PlayerId(3), "neutral", 14));
        let mut auction = Auction::new(&players);
        auction.open().unwrap();
        for p in players.iter().filter(|p| !p.is_neutral()) {
            auction.collect_bid(p, 1).unwrap();
        }
        auction.resolve(&mut players, |a, _| a.id()).unwrap();
        assert_eq!(
            auction.choose_first_player(&players, |_, _| PlayerId(3)),
            Err(AuctionError::NotEligible(PlayerId(3)))
        );
        assert_eq!(auction.phase(), AuctionPhase::Resolving);
        assert!(auction.outcome().is_none());
    }
}
