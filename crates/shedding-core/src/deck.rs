//! The 52-card deck and the thirteen-card deal.

use rand::rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::cards::{Card, Rank, Suit};
use crate::moves::sort_hand;

/// Cards dealt to each player.
pub const HAND_SIZE: usize = 13;

/// Seats at a table.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("a deal needs 2-4 players, got {0}")]
    PlayerCount(usize),

    #[error("deck has {available} cards, {needed} needed")]
    ShortDeck { available: usize, needed: usize },
}

/// All 52 cards, grouped by suit.
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card(rank, suit));
        }
    }
    cards
}

/// Shuffle a fresh deck and deal thirteen cards to each player.
pub fn deal(players: usize) -> Result<Vec<Vec<Card>>, DealError> {
    let mut deck = full_deck();
    deck.shuffle(&mut rng());
    deal_from(deck, players)
}

/// Deal thirteen cards to each player from the top of `deck`, one card at a
/// time around the table. Each hand is returned sorted weakest first.
pub fn deal_from(mut deck: Vec<Card>, players: usize) -> Result<Vec<Vec<Card>>, DealError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(DealError::PlayerCount(players));
    }
    let needed = players * HAND_SIZE;
    if deck.len() < needed {
        return Err(DealError::ShortDeck {
            available: deck.len(),
            needed,
        });
    }

    let mut hands = vec![Vec::with_capacity(HAND_SIZE); players];
    for (i, card) in deck.drain(..needed).enumerate() {
        hands[i % players].push(card);
    }
    for hand in &mut hands {
        sort_hand(hand);
    }
    tracing::debug!(players, "dealt hands");
    Ok(hands)
}
