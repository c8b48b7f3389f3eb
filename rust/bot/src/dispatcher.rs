use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chipjack_engine::deck::Deck;
use chipjack_engine::errors::GameError;
use chipjack_engine::game::{Game, RoundSummary, MIN_BET};

use crate::bank::{Bank, BankError};
use crate::registry::GameRegistry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BotError {
    #[error("no game in progress")]
    NoGameInProgress,
    #[error("a game is already in progress")]
    GameAlreadyActive,
    /// The deck gave out mid-round; the round is gone and the caller should
    /// present a generic "game ended abnormally" message.
    #[error("round aborted: {0}")]
    RoundAborted(GameError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// What a command handler needs to answer the player: the rendered game, a
/// structured snapshot (totals, cards, bust flag) for settlement or audit
/// logging, and whether the round is finished.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResponse {
    pub text: String,
    pub summary: RoundSummary,
    pub finished: bool,
}

/// The command-facing service: owns the registry and the bank, and applies
/// the caller-side rules the engine deliberately does not (one live round
/// per player, bet covered by balance, eviction on terminal or aborted
/// rounds). Chat-platform wiring sits above this and only ever passes
/// player identities and bet amounts down.
///
/// Bets are debited when the round starts and no payout happens on
/// resolution, matching the observed service; an outer settlement layer can
/// use [`RoundResponse::summary`] if it wants to pay out.
pub struct Dispatcher {
    registry: Arc<GameRegistry>,
    bank: Arc<Bank>,
}

impl Dispatcher {
    pub fn new(registry: Arc<GameRegistry>, bank: Arc<Bank>) -> Self {
        Self { registry, bank }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Starts a blackjack round from a fresh shuffled deck.
    pub fn start_round(&self, player_id: &str, bet: u32) -> Result<RoundResponse, BotError> {
        let mut deck = Deck::new();
        deck.shuffle();
        self.start_round_with_deck(player_id, bet, deck)
    }

    /// Deterministic variant for replays and tests.
    pub fn start_round_seeded(
        &self,
        player_id: &str,
        bet: u32,
        seed: u64,
    ) -> Result<RoundResponse, BotError> {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        self.start_round_with_deck(player_id, bet, deck)
    }

    /// Starts a round from an explicit deck, dealt as-is. This is the seam
    /// the fixture-deck tests use.
    pub fn start_round_with_deck(
        &self,
        player_id: &str,
        bet: u32,
        deck: Deck,
    ) -> Result<RoundResponse, BotError> {
        if self.registry.get(player_id).is_some() {
            return Err(BotError::GameAlreadyActive);
        }
        if bet < MIN_BET {
            return Err(BotError::Game(GameError::InvalidBetAmount {
                amount: bet,
                minimum: MIN_BET,
            }));
        }
        self.bank.debit(player_id, bet)?;
        let game = match Game::new(deck, player_id, bet) {
            Ok(game) => game,
            Err(err) => {
                // the wager must not be lost to a round that never started
                self.bank.credit(player_id, bet);
                tracing::warn!(player_id = %player_id, error = %err, "deal failed");
                return Err(BotError::RoundAborted(err));
            }
        };
        tracing::info!(player_id = %player_id, bet, "blackjack round started");
        let entry = self.registry.save(game);
        let game = entry.lock();
        Ok(RoundResponse {
            text: game.render(),
            summary: game.summary(),
            finished: false,
        })
    }

    /// Draws one card for the player, evicting the round when it ends.
    pub fn hit(&self, player_id: &str) -> Result<RoundResponse, BotError> {
        let entry = self
            .registry
            .get(player_id)
            .ok_or(BotError::NoGameInProgress)?;
        entry.touch();
        let mut game = entry.lock();
        match game.hit() {
            Ok(()) => {
                let finished = game.is_over();
                let response = RoundResponse {
                    text: game.render(),
                    summary: game.summary(),
                    finished,
                };
                drop(game);
                if finished {
                    self.registry.remove(player_id);
                    tracing::info!(player_id = %player_id, "round ended: player busted");
                }
                Ok(response)
            }
            Err(err) => {
                drop(game);
                self.abort_round(player_id, err)
            }
        }
    }

    /// Ends the player's turn, runs the dealer policy, and evicts the
    /// round.
    pub fn stand(&self, player_id: &str) -> Result<RoundResponse, BotError> {
        let entry = self
            .registry
            .get(player_id)
            .ok_or(BotError::NoGameInProgress)?;
        entry.touch();
        let mut game = entry.lock();
        match game.stand() {
            Ok(()) => {
                let response = RoundResponse {
                    text: game.render(),
                    summary: game.summary(),
                    finished: true,
                };
                drop(game);
                self.registry.remove(player_id);
                tracing::info!(
                    player_id = %player_id,
                    player_total = response.summary.player_total,
                    dealer_total = response.summary.dealer_total,
                    "round resolved"
                );
                Ok(response)
            }
            Err(err) => {
                drop(game);
                self.abort_round(player_id, err)
            }
        }
    }

    pub fn balance(&self, player_id: &str) -> u32 {
        self.bank.balance(player_id)
    }

    pub fn claim_fountain(&self, player_id: &str) -> Result<u32, BotError> {
        Ok(self.bank.claim_fountain(player_id)?)
    }

    fn abort_round(&self, player_id: &str, err: GameError) -> Result<RoundResponse, BotError> {
        // the round state is inconsistent after a failed draw; drop it
        self.registry.remove(player_id);
        tracing::warn!(player_id = %player_id, error = %err, "round aborted");
        Err(BotError::RoundAborted(err))
    }
}
