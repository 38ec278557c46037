//! Empire rules engine library.
//!
//! Exposes the territory graph, the territorial ledger, the action
//! operations, the turn-order auction, and winner resolution, plus the
//! `Game` context that ties them together for a host turn loop.

pub mod board;
pub mod config;
pub mod decision;
pub mod game;
pub mod resolve;

pub use config::GameConfig;
pub use game::{Game, PaymentError, SetupError};
