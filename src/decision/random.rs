//! Random decisions for unattended (tournament) games.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Player, PlayerId};

use super::DecisionSource;

/// Bids a uniform amount in `0..=coins`, keeps the current leader on ties,
/// and lets the auction winner go first.
#[derive(Debug, Clone)]
pub struct RandomDecisions {
    rng: SmallRng,
}

impl RandomDecisions {
    pub fn new() -> Self {
        RandomDecisions {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        RandomDecisions {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDecisions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionSource for RandomDecisions {
    fn bid(&mut self, player: &Player) -> u32 {
        self.rng.gen_range(0..=player.coins())
    }

    fn younger(&mut self, leader: &Player, _challenger: &Player) -> PlayerId {
        leader.id()
    }

    fn first_player(&mut self, winner: &Player, _players: &[Player]) -> PlayerId {
        winner.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bids_stay_within_purse() {
        let mut d = RandomDecisions::seeded(7);
        let p = Player::new(PlayerId(0), "a", 6, 14, 3);
        for _ in 0..200 {
            assert!(d.bid(&p) <= 6);
        }
        let broke = Player::new(PlayerId(1), "b", 0, 14, 3);
        assert_eq!(d.bid(&broke), 0);
    }

    #[test]
    fn same_seed_same_bids() {
        let p = Player::new(PlayerId(0), "a", 14, 14, 3);
        let mut x = RandomDecisions::seeded(42);
        let mut y = RandomDecisions::seeded(42);
        let xs: Vec<u32> = (0..10).map(|_| x.bid(&p)).collect();
        let ys: Vec<u32> = (0..10).map(|_| y.bid(&p)).collect();
        assert_eq!(xs, ys);
    }
}
