//! Scripted decisions replayed from queues, for tests and recorded games.

use std::collections::{HashMap, VecDeque};

use crate::board::{Player, PlayerId};

use super::DecisionSource;

/// Answers decisions from pre-loaded queues.
///
/// Bids are queued per player. When a queue runs dry the source answers
/// with a neutral default: a bid of 0, the current leader on ties, and the
/// winner for the first player.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    bids: HashMap<PlayerId, VecDeque<u32>>,
    younger: VecDeque<PlayerId>,
    first: VecDeque<PlayerId>,
    /// Number of tie-break questions asked so far.
    pub tie_breaks_asked: usize,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one or more bid answers for `player`, in order.
    pub fn with_bids(mut self, player: PlayerId, bids: &[u32]) -> Self {
        self.bids.entry(player).or_default().extend(bids.iter().copied());
        self
    }

    pub fn with_younger(mut self, pick: PlayerId) -> Self {
        self.younger.push_back(pick);
        self
    }

    pub fn with_first_player(mut self, pick: PlayerId) -> Self {
        self.first.push_back(pick);
        self
    }
}

impl DecisionSource for ScriptedDecisions {
    fn bid(&mut self, player: &Player) -> u32 {
        self.bids
            .get_mut(&player.id())
            .and_then(VecDeque::pop_front)
            .unwrap_or(0)
    }

    fn younger(&mut self, leader: &Player, _challenger: &Player) -> PlayerId {
        self.tie_breaks_asked += 1;
        self.younger.pop_front().unwrap_or(leader.id())
    }

    fn first_player(&mut self, winner: &Player, _players: &[Player]) -> PlayerId {
        self.first.pop_front().unwrap_or(winner.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_answers_then_defaults() {
        let a = Player::new(PlayerId(0), "a", 5, 14, 3);
        let b = Player::new(PlayerId(1), "b", 5, 14, 3);
        let mut d = ScriptedDecisions::new()
            .with_bids(PlayerId(0), &[9, 4])
            .with_younger(PlayerId(1))
            .with_first_player(PlayerId(1));
        assert_eq!(d.bid(&a), 9);
        assert_eq!(d.bid(&a), 4);
        assert_eq!(d.bid(&a), 0);
        assert_eq!(d.bid(&b), 0);
        assert_eq!(d.younger(&a, &b), PlayerId(1));
        assert_eq!(d.younger(&a, &b), PlayerId(0));
        assert_eq!(d.tie_breaks_asked, 2);
        assert_eq!(d.first_player(&a, &[]), PlayerId(1));
        assert_eq!(d.first_player(&a, &[]), PlayerId(0));
    }
}
