//! # chipjack-engine: Blackjack Round Engine Core
//!
//! The in-memory blackjack core behind the chipjack bot: card and deck
//! modeling, soft-ace hand scoring, and the per-round state machine with
//! its automated dealer policy. Everything here is pure in-memory
//! computation; persistence, chat-platform wiring, and bet settlement
//! belong to the calling service.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Shuffling and draw mechanics with ChaCha20 RNG
//! - [`hand`] - Hand accumulation and soft-ace total scoring
//! - [`game`] - Round orchestration: deal, hit, stand, terminal states
//! - [`logger`] - Round history serialization (JSONL)
//! - [`errors`] - Error types for round operations
//!
//! ## House Rules
//!
//! The engine preserves three non-standard rules of the observed game
//! exactly as designed:
//!
//! - a natural two-card 21 at deal time forces a full redeal;
//! - a hit that would land the player on exactly 21 is discarded and
//!   redrawn;
//! - after each dealer draw past 16, a total that busts or that is less
//!   than one above the player's total is discarded and redrawn.
//!
//! Each of these retries runs in a bounded loop rather than open recursion
//! and fails with [`errors::GameError::RetryLimitExceeded`] at the cap.
//!
//! ## Quick Start
//!
//! ```rust
//! use chipjack_engine::game::Game;
//!
//! let game = Game::deal_seeded("player-1", 50, 42).expect("deal ok");
//! assert_ne!(game.player_total(), 21); // naturals are redealt
//! println!("{}", game.render());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
