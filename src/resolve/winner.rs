//! End-of-game winner resolution.
//!
//! Highest score wins. Ties narrow through coins, then armies on the board,
//! then controlled regions; each level only looks at the players still tied
//! after the previous one. Whoever is left tied after the last level shares
//! a draw.

use crate::board::PlayerId;

/// Per-player figures the resolver ranks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub score: u32,
    pub coins: u32,
    /// Armies never placed on the board.
    pub armies_in_pool: u32,
    pub controlled_regions: u32,
}

impl Standing {
    /// Armies deployed out of a pool of `pool_size`.
    pub fn deployed_armies(&self, pool_size: u32) -> u32 {
        pool_size.saturating_sub(self.armies_in_pool)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerId),
    /// Players still tied after every tie-break, in seat order. Empty when
    /// there was nobody to rank.
    Draw(Vec<PlayerId>),
}

impl Outcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(p) => Some(*p),
            Outcome::Draw(_) => None,
        }
    }
}

/// Keeps only the standings with the maximum `key`.
fn keep_max<F>(field: Vec<Standing>, key: F) -> Vec<Standing>
where
    F: Fn(&Standing) -> u32,
{
    let Some(best) = field.iter().map(&key).max() else {
        return field;
    };
    field.into_iter().filter(|s| key(s) == best).collect()
}

/// Ranks `standings` and returns the winner or the set of drawn players.
///
/// `pool_size` is the fixed number of armies every player started with.
pub fn resolve_winner(standings: &[Standing], pool_size: u32) -> Outcome {
    let mut field = standings.to_vec();
    let levels: [(&str, fn(&Standing, u32) -> u32); 4] = [
        ("score", |s, _| s.score),
        ("coins", |s, _| s.coins),
        ("deployed armies", |s, pool| s.deployed_armies(pool)),
        ("controlled regions", |s, _| s.controlled_regions),
    ];

    for (label, key) in levels {
        field = keep_max(field, |s| key(s, pool_size));
        if field.len() == 1 {
            log::info!("{} wins on {}", field[0].player, label);
            return Outcome::Winner(field[0].player);
        }
        if field.len() > 1 {
            log::debug!("{} players still tied after {}", field.len(), label);
        }
    }

    let mut tied: Vec<PlayerId> = field.iter().map(|s| s.player).collect();
    tied.sort_unstable();
    log::info!("game drawn between {:?}", tied);
    Outcome::Draw(tied)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: u32 = 14;

    fn standing(id: u8, score: u32, coins: u32, deployed: u32, regions: u32) -> Standing {
        Standing {
            player: PlayerId(id),
            score,
            coins,
            armies_in_pool: POOL - deployed,
            controlled_regions: regions,
        }
    }

    #[test]
    fn outright_winner_on_score() {
        let s = [standing(0, 7, 0, 0, 0), standing(1, 9, 0, 0, 0), standing(2, 8, 9, 9, 9)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn coins_break_score_tie() {
        let s = [standing(0, 10, 2, 0, 0), standing(1, 10, 4, 0, 0), standing(2, 8, 9, 9, 9)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn deployed_armies_break_coin_tie() {
        let s = [standing(0, 10, 3, 5, 4), standing(1, 10, 3, 7, 1), standing(2, 8, 3, 14, 9)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn regions_break_army_tie() {
        let s = [standing(0, 10, 3, 5, 4), standing(1, 10, 3, 5, 6)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn full_tie_is_a_draw() {
        let s = [standing(2, 6, 1, 3, 2), standing(0, 6, 1, 3, 2), standing(1, 6, 1, 3, 2)];
        assert_eq!(
            resolve_winner(&s, POOL),
            Outcome::Draw(vec![PlayerId(0), PlayerId(1), PlayerId(2)])
        );
    }

    #[test]
    fn draw_only_among_survivors_of_earlier_levels() {
        let s = [standing(0, 6, 1, 3, 2), standing(1, 6, 1, 3, 2), standing(2, 6, 0, 9, 9)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Draw(vec![PlayerId(0), PlayerId(1)]));
    }

    #[test]
    fn levels_narrow_rather_than_rerank() {
        // Player 2 has the most regions but lost on coins already.
        let s = [standing(0, 5, 2, 4, 1), standing(1, 5, 2, 4, 2), standing(2, 5, 1, 4, 9)];
        assert_eq!(resolve_winner(&s, POOL), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn nobody_to_rank() {
        assert_eq!(resolve_winner(&[], POOL), Outcome::Draw(Vec::new()));
        assert_eq!(resolve_winner(&[], POOL).winner(), None);
    }

    #[test]
    fn deployed_saturates() {
        let s = Standing { player: PlayerId(0), score: 0, coins: 0, armies_in_pool: 20, controlled_regions: 0 };
        assert_eq!(s.deployed_armies(14), 0);
    }
}
