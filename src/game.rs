//! Game context.
//!
//! Owns everything one game needs: configuration, the validated map, the
//! territorial ledger, the seats, and the turn order. Setup code creates a
//! `Game`, the turn loop drives it, and dropping it ends the game. There is
//! no global state; a host running several games simply holds several
//! `Game` values, each behind its own lock if it is shared across threads.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::board::{
    Action, CoinError, MapDefinition, MapError, Player, PlayerId, PlayerKind, TerritorialLedger, TerritoryGraph,
};
use crate::config::{ConfigError, GameConfig};
use crate::decision::DecisionSource;
use crate::resolve::control::board_scores;
use crate::resolve::{
    resolve_winner, run_auction, ActionError, AuctionError, AuctionOutcome, Operations, Outcome, Standing,
};

/// Name of the neutral placeholder seat in two-player games.
pub const NEUTRAL_NAME: &str = "neutral";

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("none of the {attempts} candidate maps is structurally valid")]
    NoValidMap { attempts: usize },

    #[error("{count} players is outside the allowed {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("duplicate player name '{0}'")]
    DuplicatePlayerName(String),

    #[error("player names must not be empty")]
    EmptyPlayerName,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Coins(#[from] CoinError),

    #[error("player {0} is not in the game")]
    UnknownPlayer(PlayerId),
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    graph: TerritoryGraph,
    ledger: TerritorialLedger,
    /// Seats indexed by `PlayerId`.
    players: Vec<Player>,
    turn_order: VecDeque<PlayerId>,
    auction: Option<AuctionOutcome>,
    starting_armies_placed: bool,
    /// Coins paid out of purses, by the auction winner and for cards.
    coin_supply: u32,
}

impl Game {
    /// Creates a game on an already-built map.
    ///
    /// The map must pass every structural check. Players are seated in the
    /// order given; a neutral seat is appended to two-player games when the
    /// config asks for one.
    pub fn new(config: GameConfig, graph: TerritoryGraph, names: &[&str]) -> Result<Self, SetupError> {
        config.validate()?;
        check_names(&config, names)?;
        graph.validate()?;
        log::info!(
            "map accepted: {} regions, {} edges, {} continents",
            graph.len(),
            graph.edge_count(),
            graph.continents().len()
        );
        Ok(Self::seat(config, graph, names))
    }

    /// Creates a game on the first structurally valid candidate map.
    ///
    /// Invalid candidates are logged and skipped. Failing to find any valid
    /// map is the only unrecoverable setup error.
    pub fn setup<I>(config: GameConfig, candidates: I, names: &[&str]) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = MapDefinition>,
    {
        config.validate()?;
        check_names(&config, names)?;

        let mut attempts = 0;
        for def in candidates {
            attempts += 1;
            let graph = match TerritoryGraph::from_untrusted(&def).and_then(|g| g.validate().map(|()| g)) {
                Ok(g) => g,
                Err(e) => {
                    log::warn!("discarding candidate map {}: {}", attempts, e);
                    continue;
                }
            };
            log::info!("using candidate map {} of {} regions", attempts, graph.len());
            return Ok(Self::seat(config, graph, names));
        }
        Err(SetupError::NoValidMap { attempts })
    }

    fn seat(config: GameConfig, graph: TerritoryGraph, names: &[&str]) -> Self {
        let coins = config.coins_for(names.len()).unwrap_or(0);
        let mut players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(seat_id(i), name, coins, config.army_pool, config.city_pool))
            .collect();
        if config.neutral_player && names.len() == 2 {
            players.push(Player::neutral(seat_id(players.len()), NEUTRAL_NAME, config.army_pool));
        }
        let turn_order = players
            .iter()
            .filter(|p| !p.is_neutral())
            .map(Player::id)
            .collect();
        Game {
            config,
            graph,
            ledger: TerritorialLedger::new(),
            players,
            turn_order,
            auction: None,
            starting_armies_placed: false,
            coin_supply: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn graph(&self) -> &TerritoryGraph {
        &self.graph
    }

    pub fn ledger(&self) -> &TerritorialLedger {
        &self.ledger
    }

    /// Every seat, neutral included, in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Seats that bid, act, and can win.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_neutral())
    }

    /// Upcoming turn order, next player first.
    pub fn turn_order(&self) -> Vec<PlayerId> {
        self.turn_order.iter().copied().collect()
    }

    pub fn auction_outcome(&self) -> Option<AuctionOutcome> {
        self.auction
    }

    pub fn coin_supply(&self) -> u32 {
        self.coin_supply
    }

    /// Runs `f` against the game, restoring the ledger and every seat if it
    /// fails.
    fn atomically<F>(&mut self, f: F) -> Result<(), ActionError>
    where
        F: FnOnce(&mut Self) -> Result<(), ActionError>,
    {
        let saved_ledger = self.ledger.clone();
        let saved_players = self.players.clone();
        let result = f(self);
        if result.is_err() {
            self.ledger = saved_ledger;
            self.players = saved_players;
        }
        result
    }

    /// Every seat places the configured starting armies on the start region.
    ///
    /// Happens once per game. If any seat cannot place, no seat does.
    pub fn place_starting_armies(&mut self) -> Result<(), ActionError> {
        if self.starting_armies_placed {
            return Err(ActionError::StartingArmiesPlaced);
        }
        let start = self.graph.start_region().ok_or(ActionError::NotStartRegion)?;
        let count = self.config.starting_armies;
        self.atomically(|game| {
            let mut ops = Operations::new(&game.graph, &mut game.ledger);
            for player in &mut game.players {
                ops.place_new_armies(player, count, start, start)?;
            }
            Ok(())
        })?;
        self.starting_armies_placed = true;
        Ok(())
    }

    /// Runs the turn-order auction and fixes the turn order: the chosen
    /// first player, then the others in seat order.
    pub fn run_auction(&mut self, decisions: &mut dyn DecisionSource) -> Result<AuctionOutcome, AuctionError> {
        let outcome = run_auction(&mut self.players, decisions, self.config.max_bid_attempts)?;
        self.coin_supply = self.coin_supply.saturating_add(outcome.paid);
        let mut order: VecDeque<PlayerId> = self.active_players().map(Player::id).collect();
        if let Some(pos) = order.iter().position(|&p| p == outcome.first_player) {
            order.rotate_left(pos);
        }
        self.turn_order = order;
        self.auction = Some(outcome);
        Ok(outcome)
    }

    /// Returns whose turn it is and moves them to the back of the queue.
    pub fn next_player(&mut self) -> Option<PlayerId> {
        let next = self.turn_order.pop_front()?;
        self.turn_order.push_back(next);
        Some(next)
    }

    fn check_target(&self, action: &Action) -> Result<(), ActionError> {
        if let Action::DestroyArmy { opponent, .. } = *action {
            if self.player(opponent).is_none() {
                return Err(ActionError::UnknownPlayer(opponent));
            }
        }
        Ok(())
    }

    /// Rejects actors that are not seated or never act.
    fn check_actor(&self, actor: PlayerId) -> Result<(), ActionError> {
        match self.player(actor).map(Player::kind) {
            None => Err(ActionError::UnknownPlayer(actor)),
            Some(PlayerKind::Neutral) => Err(ActionError::NotActive(actor)),
            Some(PlayerKind::Active) => Ok(()),
        }
    }

    /// Applies one resolved action for `actor`. On error nothing changed.
    pub fn perform(&mut self, actor: PlayerId, action: &Action) -> Result<(), ActionError> {
        self.check_actor(actor)?;
        self.check_target(action)?;
        let player = self
            .players
            .get_mut(actor.index())
            .ok_or(ActionError::UnknownPlayer(actor))?;
        let result = Operations::new(&self.graph, &mut self.ledger).apply(player, action);
        if let Err(e) = &result {
            log::debug!("{} rejected for {}: {}", action.label(), actor, e);
        }
        result
    }

    /// Applies a sequence of actions as one unit: if any step is rejected,
    /// the ledger and the actor's pools are restored and the error returned.
    pub fn perform_all(&mut self, actor: PlayerId, actions: &[Action]) -> Result<(), ActionError> {
        self.check_actor(actor)?;
        self.atomically(|game| {
            for action in actions {
                game.perform(actor, action)?;
            }
            Ok(())
        })
    }

    /// Takes a card payment from a player's purse.
    pub fn pay(&mut self, player: PlayerId, amount: u32) -> Result<(), PaymentError> {
        let p = self
            .players
            .get_mut(player.index())
            .ok_or(PaymentError::UnknownPlayer(player))?;
        p.pay_coins(amount)?;
        self.coin_supply = self.coin_supply.saturating_add(amount);
        Ok(())
    }

    /// Snapshot of every active player's ranking figures.
    ///
    /// `goods` carries the goods points from each player's cards; players
    /// missing from it score none.
    pub fn standings(&self, goods: &HashMap<PlayerId, u32>) -> Vec<Standing> {
        let board = board_scores(&self.graph, &self.ledger);
        self.active_players()
            .map(|p| {
                let b = board.get(&p.id()).copied().unwrap_or_default();
                Standing {
                    player: p.id(),
                    score: b
                        .points(self.config.points_per_region, self.config.points_per_continent)
                        .saturating_add(goods.get(&p.id()).copied().unwrap_or(0)),
                    coins: p.coins(),
                    armies_in_pool: p.armies_available(),
                    controlled_regions: b.regions,
                }
            })
            .collect()
    }

    /// Ranks the active players and reports the winner or the draw.
    pub fn declare_winner(&self, goods: &HashMap<PlayerId, u32>) -> Outcome {
        resolve_winner(&self.standings(goods), self.config.army_pool)
    }
}

fn seat_id(index: usize) -> PlayerId {
    // Seat counts are bounded by `max_players` plus the neutral seat.
    PlayerId(u8::try_from(index).unwrap_or(u8::MAX))
}

fn check_names(config: &GameConfig, names: &[&str]) -> Result<(), SetupError> {
    let count = names.len();
    if count < config.min_players || count > config.max_players || count >= usize::from(u8::MAX) {
        return Err(SetupError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        });
    }
    let mut seen = HashSet::new();
    if config.neutral_player && count == 2 {
        seen.insert(NEUTRAL_NAME);
    }
    for &name in names {
        if name.trim().is_empty() {
            return Err(SetupError::EmptyPlayerName);
        }
        if !seen.insert(name) {
            return Err(SetupError::DuplicatePlayerName(name.to_string()));
        }
    }
    Ok(())
}
