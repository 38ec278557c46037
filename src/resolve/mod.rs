//! Rules resolution.
//!
//! Validated action operations, the turn-order auction, board control and
//! scoring, and the end-of-game winner resolution.

pub mod actions;
pub mod auction;
pub mod control;
pub mod winner;

pub use actions::{ActionError, Operations};
pub use auction::{run_auction, Auction, AuctionError, AuctionOutcome, AuctionPhase};
pub use control::{board_scores, continent_controllers, region_controller, region_controllers, BoardScore};
pub use winner::{resolve_winner, Outcome, Standing};
