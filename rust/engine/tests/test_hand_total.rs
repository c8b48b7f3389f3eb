use chipjack_engine::cards::{Card, Rank, Suit};
use chipjack_engine::hand::Hand;

fn card(suit: Suit, rank: Rank) -> Card {
    Card { suit, rank }
}

fn hand_of(ranks: &[Rank]) -> Hand {
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
    let mut hand = Hand::new();
    for (i, &rank) in ranks.iter().enumerate() {
        hand.add_card(card(suits[i % suits.len()], rank));
    }
    hand
}

#[test]
fn empty_hand_scores_zero() {
    assert_eq!(Hand::new().total(), 0);
}

#[test]
fn total_is_invariant_under_reordering() {
    let orders = [
        [Rank::Ace, Rank::Nine, Rank::Five],
        [Rank::Nine, Rank::Ace, Rank::Five],
        [Rank::Five, Rank::Nine, Rank::Ace],
    ];
    for ranks in &orders {
        assert_eq!(hand_of(ranks).total(), 15, "order {:?}", ranks);
    }
}

#[test]
fn ace_and_nine_scores_twenty() {
    assert_eq!(hand_of(&[Rank::Ace, Rank::Nine]).total(), 20);
}

#[test]
fn ace_softens_when_a_five_arrives() {
    let mut hand = hand_of(&[Rank::Ace, Rank::Nine]);
    assert_eq!(hand.total(), 20);
    hand.add_card(card(Suit::Spades, Rank::Five));
    // 11 + 9 + 5 = 25, ace downgraded: 15
    assert_eq!(hand.total(), 15);
}

#[test]
fn two_aces_and_a_nine_scores_twenty_one() {
    // 11 + 11 + 9 = 31, one ace softened: 21
    assert_eq!(hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]).total(), 21);
}

#[test]
fn four_aces_soften_down_to_fourteen() {
    // 11 + 1 + 1 + 1
    assert_eq!(
        hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]).total(),
        14
    );
}

#[test]
fn face_cards_are_worth_ten() {
    assert_eq!(hand_of(&[Rank::Jack, Rank::Queen]).total(), 20);
    assert_eq!(hand_of(&[Rank::King, Rank::Nine]).total(), 19);
    assert_eq!(hand_of(&[Rank::Ace, Rank::King]).total(), 21);
}

#[test]
fn undo_last_draw_restores_the_previous_total() {
    let mut hand = hand_of(&[Rank::Ace, Rank::Nine]);
    let five = card(Suit::Spades, Rank::Five);
    hand.add_card(five);
    assert_eq!(hand.total(), 15);
    assert_eq!(hand.undo_last_draw(), Some(five));
    assert_eq!(hand.total(), 20);
    assert_eq!(hand.len(), 2);
}
