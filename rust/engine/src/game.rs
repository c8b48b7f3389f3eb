use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Hand;

/// Minimum accepted bet, matching the command surface of the bot.
pub const MIN_BET: u32 = 1;

/// Cap on the forbidden-total retry loops (redeal on a natural, redraw on a
/// hit to 21, dealer discard-and-redraw). Each loop terminates
/// probabilistically well before this; exceeding the cap is an internal
/// error, not a game outcome.
const MAX_RETRIES: u32 = 1000;

/// One blackjack round for one player identity.
///
/// The round owns its deck and both hands exclusively. It starts
/// in-progress, and ends either when the player busts on a hit or when a
/// stand completes the dealer's turn. The engine does not compute a
/// win/loss outcome beyond the bust flag; settlement against the bet is the
/// caller's concern, which is why [`Game::summary`] exposes both final
/// totals.
///
/// # Examples
///
/// ```
/// use chipjack_engine::deck::Deck;
/// use chipjack_engine::game::Game;
///
/// let mut deck = Deck::new_with_seed(7);
/// deck.shuffle();
/// let game = Game::new(deck, "player-1", 25).expect("deal ok");
/// assert!(game.player_total() < 21);
/// assert!(!game.is_over());
/// ```
#[derive(Debug)]
pub struct Game {
    player_id: String,
    deck: Deck,
    bet: u32,
    player_hand: Hand,
    dealer_hand: Hand,
    player_standing: bool,
    player_busted: bool,
    resolved: bool,
}

/// Snapshot of a finished (or in-progress) round for callers that render,
/// log, or settle it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub player_id: String,
    pub bet: u32,
    pub player_cards: Vec<Card>,
    pub player_total: u32,
    pub dealer_cards: Vec<Card>,
    pub dealer_total: u32,
    pub player_busted: bool,
}

impl Game {
    /// Deals a round from the given deck, which is dealt as-is (no implicit
    /// shuffle on the first attempt, so fixture decks stay in order).
    ///
    /// Deal order: two cards to the player, one up-card to the dealer, then
    /// one further draw that is discarded unseen (the dealer's hole card is
    /// never revealed). If the player's opening total is exactly 21 the
    /// whole round is torn down and redealt from a reshuffled deck: the
    /// player is never allowed to start with a natural.
    pub fn new(mut deck: Deck, player_id: &str, bet: u32) -> Result<Self, GameError> {
        if bet < MIN_BET {
            return Err(GameError::InvalidBetAmount {
                amount: bet,
                minimum: MIN_BET,
            });
        }
        let mut attempts = 0;
        loop {
            let (player_hand, dealer_hand) = Self::deal_hands(&mut deck)?;
            if player_hand.total() != 21 {
                return Ok(Self {
                    player_id: player_id.to_string(),
                    deck,
                    bet,
                    player_hand,
                    dealer_hand,
                    player_standing: false,
                    player_busted: false,
                    resolved: false,
                });
            }
            attempts += 1;
            if attempts >= MAX_RETRIES {
                return Err(GameError::RetryLimitExceeded { attempts });
            }
            deck.shuffle();
        }
    }

    /// Convenience constructor: fresh OS-entropy deck, shuffled once before
    /// the deal.
    pub fn deal(player_id: &str, bet: u32) -> Result<Self, GameError> {
        let mut deck = Deck::new();
        deck.shuffle();
        Self::new(deck, player_id, bet)
    }

    /// Deterministic variant of [`Game::deal`] for replays and tests.
    pub fn deal_seeded(player_id: &str, bet: u32, seed: u64) -> Result<Self, GameError> {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Self::new(deck, player_id, bet)
    }

    fn deal_hands(deck: &mut Deck) -> Result<(Hand, Hand), GameError> {
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        player_hand.add_card(deck.draw().ok_or(GameError::DeckExhausted)?);
        player_hand.add_card(deck.draw().ok_or(GameError::DeckExhausted)?);
        dealer_hand.add_card(deck.draw().ok_or(GameError::DeckExhausted)?);
        // hole card: drawn but never revealed or scored
        deck.draw().ok_or(GameError::DeckExhausted)?;
        Ok((player_hand, dealer_hand))
    }

    /// Draws one card into the player hand.
    ///
    /// A draw that lands the hand on exactly 21 is rejected: the card is
    /// discarded and another is drawn instead, repeating until the hand
    /// settles on anything but 21. A total over 21 marks the player busted
    /// and ends the round. On `DeckExhausted` the round state is
    /// inconsistent and the caller must treat it as aborted.
    pub fn hit(&mut self) -> Result<(), GameError> {
        let mut attempts = 0;
        loop {
            let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
            self.player_hand.add_card(card);
            let total = self.player_hand.total();
            if total == 21 {
                // the player is never allowed to reach 21 off a hit
                self.player_hand.undo_last_draw();
                attempts += 1;
                if attempts >= MAX_RETRIES {
                    return Err(GameError::RetryLimitExceeded { attempts });
                }
                continue;
            }
            if total > 21 {
                self.player_busted = true;
                self.player_standing = true;
            }
            return Ok(());
        }
    }

    /// Ends the player's turn and runs the automated dealer policy: draw
    /// while the dealer total is below 17.
    ///
    /// After each draw, a dealer total above 16 that either busts or sits
    /// at one-less-than-beating the player (`total - 1 < player_total`) is
    /// rejected: the card is discarded and the dealer draws again. This is
    /// an intentional game-balance quirk of the observed behavior, not
    /// standard dealer rules, and is preserved exactly, asymmetry included.
    pub fn stand(&mut self) -> Result<(), GameError> {
        self.player_standing = true;
        let player_total = self.player_hand.total();
        let mut attempts = 0;
        while self.dealer_hand.total() < 17 {
            let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
            self.dealer_hand.add_card(card);
            let total = self.dealer_hand.total();
            if total > 16 && (total > 21 || total - 1 < player_total) {
                self.dealer_hand.undo_last_draw();
                attempts += 1;
                if attempts >= MAX_RETRIES {
                    return Err(GameError::RetryLimitExceeded { attempts });
                }
            }
        }
        self.resolved = true;
        Ok(())
    }

    /// True once the round reached a terminal state (player busted, or a
    /// stand completed the dealer's turn).
    pub fn is_over(&self) -> bool {
        self.player_busted || self.resolved
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn player_total(&self) -> u32 {
        self.player_hand.total()
    }

    pub fn dealer_total(&self) -> u32 {
        self.dealer_hand.total()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn player_busted(&self) -> bool {
        self.player_busted
    }

    pub fn player_standing(&self) -> bool {
        self.player_standing
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            player_id: self.player_id.clone(),
            bet: self.bet,
            player_cards: self.player_hand.cards().to_vec(),
            player_total: self.player_hand.total(),
            dealer_cards: self.dealer_hand.cards().to_vec(),
            dealer_total: self.dealer_hand.total(),
            player_busted: self.player_busted,
        }
    }

    /// Plain-text summary of both hands, totals, the bet, and the bust
    /// state. Platform-specific markup is the caller's concern.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "Your hand: {}", render_hand(&self.player_hand));
        let _ = write!(out, "\nDealer's hand: {}", render_hand(&self.dealer_hand));
        let _ = write!(out, "\nBet: {}", self.bet);
        if self.player_busted {
            out.push_str("\nYou busted!");
        }
        out
    }
}

fn render_hand(hand: &Hand) -> String {
    let mut out = String::new();
    for card in hand.cards() {
        let _ = write!(out, "{} ", card);
    }
    let _ = write!(out, "({})", hand.total());
    out
}
