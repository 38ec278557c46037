//! Decision sources.
//!
//! Every point where the rules need a choice from a player (bid amount,
//! tie-break, first player) is delegated to a `DecisionSource`. The engine
//! calls it synchronously and does no I/O of its own; a human prompt, a
//! script, or a bot all plug in the same way.

pub mod random;
pub mod scripted;

use crate::board::{Player, PlayerId};

pub use random::RandomDecisions;
pub use scripted::ScriptedDecisions;

pub trait DecisionSource {
    /// Asks `player` for a sealed bid. Any value may come back; the engine
    /// re-asks when it exceeds the player's coins.
    fn bid(&mut self, player: &Player) -> u32;

    /// Resolves a tied top bid: returns whichever of the two is younger.
    fn younger(&mut self, leader: &Player, challenger: &Player) -> PlayerId;

    /// Lets the auction winner name the player who acts first.
    fn first_player(&mut self, winner: &Player, players: &[Player]) -> PlayerId;
}
