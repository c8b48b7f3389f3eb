use std::sync::Arc;

use chipjack_bot::bank::STARTING_BALANCE;
use chipjack_bot::{Bank, BankError, BotError, Dispatcher, GameRegistry};
use chipjack_engine::cards::{Card, Rank, Suit};
use chipjack_engine::deck::Deck;
use chipjack_engine::errors::GameError;

fn card(suit: Suit, rank: Rank) -> Card {
    Card { suit, rank }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(GameRegistry::new()), Arc::new(Bank::in_memory()))
}

// player opens on ♠10 ♥6 (16), dealer shows ♦9
fn quiet_opening() -> Vec<Card> {
    vec![
        card(Suit::Clubs, Rank::Two),
        card(Suit::Diamonds, Rank::Nine),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Spades, Rank::Ten),
    ]
}

#[test]
fn starting_a_round_debits_the_bet_and_registers_the_game() {
    let bot = dispatcher();
    let response = bot
        .start_round_with_deck("alice", 30, Deck::from_cards(quiet_opening()))
        .expect("round starts");
    assert!(!response.finished);
    assert_eq!(response.summary.bet, 30);
    assert_eq!(response.summary.player_total, 16);
    assert_eq!(bot.balance("alice"), STARTING_BALANCE - 30);
    assert!(bot.registry().get("alice").is_some());
}

#[test]
fn a_second_round_for_the_same_player_is_rejected() {
    let bot = dispatcher();
    bot.start_round_with_deck("alice", 30, Deck::from_cards(quiet_opening()))
        .expect("round starts");
    assert_eq!(
        bot.start_round_with_deck("alice", 10, Deck::from_cards(quiet_opening()))
            .err(),
        Some(BotError::GameAlreadyActive)
    );
    // the rejected bet was never debited
    assert_eq!(bot.balance("alice"), STARTING_BALANCE - 30);
}

#[test]
fn a_bet_the_balance_cannot_cover_is_rejected() {
    let bot = dispatcher();
    assert_eq!(
        bot.start_round_with_deck("alice", 500, Deck::from_cards(quiet_opening()))
            .err(),
        Some(BotError::Bank(BankError::InsufficientBalance {
            balance: STARTING_BALANCE,
            requested: 500,
        }))
    );
    assert!(bot.registry().get("alice").is_none());
}

#[test]
fn a_zero_bet_is_rejected_before_any_debit() {
    let bot = dispatcher();
    assert_eq!(
        bot.start_round_with_deck("alice", 0, Deck::from_cards(quiet_opening()))
            .err(),
        Some(BotError::Game(GameError::InvalidBetAmount {
            amount: 0,
            minimum: 1,
        }))
    );
    assert_eq!(bot.balance("alice"), STARTING_BALANCE);
}

#[test]
fn a_failed_deal_refunds_the_wager() {
    let bot = dispatcher();
    // three cards cannot cover the four deal draws
    let short_deck = Deck::from_cards(quiet_opening().split_off(1));
    assert_eq!(
        bot.start_round_with_deck("alice", 30, short_deck).err(),
        Some(BotError::RoundAborted(GameError::DeckExhausted))
    );
    assert_eq!(bot.balance("alice"), STARTING_BALANCE);
    assert!(bot.registry().get("alice").is_none());
}

#[test]
fn hit_and_stand_require_a_live_round() {
    let bot = dispatcher();
    assert_eq!(bot.hit("alice").err(), Some(BotError::NoGameInProgress));
    assert_eq!(bot.stand("alice").err(), Some(BotError::NoGameInProgress));
}

#[test]
fn busting_on_a_hit_evicts_the_round() {
    let mut cards = quiet_opening();
    // hit draw: 16 + K busts
    cards.insert(0, card(Suit::Clubs, Rank::King));
    let bot = dispatcher();
    bot.start_round_with_deck("alice", 30, Deck::from_cards(cards))
        .expect("round starts");

    let response = bot.hit("alice").expect("hit ok");
    assert!(response.finished);
    assert!(response.summary.player_busted);
    assert_eq!(response.summary.player_total, 26);
    assert!(response.text.contains("You busted!"));
    assert!(bot.registry().get("alice").is_none());
    // the wager stays debited
    assert_eq!(bot.balance("alice"), STARTING_BALANCE - 30);
}

#[test]
fn deck_exhaustion_mid_round_aborts_and_evicts() {
    // exactly the four deal draws, nothing left for the hit
    let bot = dispatcher();
    bot.start_round_with_deck("alice", 30, Deck::from_cards(quiet_opening()))
        .expect("round starts");
    assert_eq!(
        bot.hit("alice").err(),
        Some(BotError::RoundAborted(GameError::DeckExhausted))
    );
    assert!(bot.registry().get("alice").is_none());
}

#[test]
fn full_round_against_a_fixture_deck() {
    // Player opens ♠Q ♥K (20) and stands. The dealer shows ♦10, draws a 7
    // (17, inside the forbidden window against 20, discarded), a 4 (14),
    // then a 7 for 21, and the round resolves with the registry empty.
    let cards = vec![
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Four),
        card(Suit::Spades, Rank::Seven),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Diamonds, Rank::Ten),
        card(Suit::Hearts, Rank::King),
        card(Suit::Spades, Rank::Queen),
    ];
    let bot = dispatcher();
    let opening = bot
        .start_round_with_deck("alice", 40, Deck::from_cards(cards))
        .expect("round starts");
    assert_eq!(opening.summary.player_total, 20);
    assert_eq!(opening.summary.dealer_total, 10);

    let resolved = bot.stand("alice").expect("stand ok");
    assert!(resolved.finished);
    assert_eq!(resolved.summary.player_total, 20);
    assert_eq!(resolved.summary.dealer_total, 21);
    assert!(!resolved.summary.player_busted);
    assert!(resolved.text.contains("(20)"), "got: {}", resolved.text);
    assert!(resolved.text.contains("(21)"), "got: {}", resolved.text);

    assert!(bot.registry().get("alice").is_none());
    assert_eq!(bot.balance("alice"), STARTING_BALANCE - 40);
}

#[test]
fn rounds_resolve_when_the_dealer_can_stop_at_17() {
    // Player stands on 16; the dealer's 17 clears the forbidden window and
    // the policy stops there.
    let cards = vec![
        card(Suit::Spades, Rank::Seven),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Diamonds, Rank::Ten),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Spades, Rank::Ten),
    ];
    let bot = dispatcher();
    bot.start_round_with_deck("alice", 15, Deck::from_cards(cards))
        .expect("round starts");
    let resolved = bot.stand("alice").expect("stand ok");
    assert_eq!(resolved.summary.player_total, 16);
    assert_eq!(resolved.summary.dealer_total, 17);
    assert!(bot.registry().get("alice").is_none());
}
