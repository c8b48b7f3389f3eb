//! # chipjack-bot: Service Layer for the Blackjack Bot
//!
//! Everything between the chat platform and the blackjack engine: the
//! per-player game registry with single-writer locking, the coin economy
//! (starting balance and the fountain), and the command dispatcher that
//! enforces the caller-side rules (one live round per player, bet covered
//! by balance, eviction of finished and aborted rounds).
//!
//! Chat-platform authentication, slash-command registration, and message
//! markup are not handled here; callers pass player identities and bet
//! amounts in and get plain-text renders plus structured summaries back.

pub mod bank;
pub mod dispatcher;
pub mod registry;

pub use bank::{Bank, BankError, MemoryStore};
pub use dispatcher::{BotError, Dispatcher, RoundResponse};
pub use registry::GameRegistry;
