//! Enumerate the combinations a player could legally play from their hand.

use std::collections::HashSet;

use thiserror::Error;

use crate::cards::Card;
use crate::deck::HAND_SIZE;
use crate::hand::{ClassifiedHand, classify};
use crate::validator::{LastPlay, PlayValidator, compare};

/// Largest combination that can ever be played.
pub const MAX_COMBINATION: usize = 5;

/// Errors raised when a hand cannot be searched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("hand has {0} cards, at most 13 allowed")]
    TooManyCards(usize),

    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Every combination from `hand` that `validator` accepts on `last_play`,
/// strongest first.
///
/// Only valid combinations are returned, even when leading. When a last play
/// exists only subsets of its size are considered. An empty result means the
/// player must pass.
///
/// The hand must hold at most thirteen distinct cards.
pub fn playable_combinations(
    hand: &[Card],
    last_play: &LastPlay,
    validator: &PlayValidator,
) -> Result<Vec<ClassifiedHand>, SearchError> {
    check_hand(hand)?;

    let sizes = match last_play.hand() {
        Some(last) => last.len()..=last.len(),
        None => 1..=MAX_COMBINATION,
    };

    let mut sorted = hand.to_vec();
    sort_hand(&mut sorted);

    let mut plays: Vec<ClassifiedHand> = sizes
        .flat_map(|size| Subsets::new(&sorted, size))
        .map(|cards| classify(&cards))
        .filter(|candidate| candidate.is_valid())
        .filter(|candidate| validator.can_play(candidate.cards(), last_play))
        .collect();

    plays.sort_by(|a, b| compare(b, a).then_with(|| b.len().cmp(&a.len())));
    tracing::debug!(
        hand = hand.len(),
        found = plays.len(),
        "enumerated playable combinations"
    );
    Ok(plays)
}

fn check_hand(hand: &[Card]) -> Result<(), SearchError> {
    if hand.len() > HAND_SIZE {
        return Err(SearchError::TooManyCards(hand.len()));
    }
    let mut seen = HashSet::with_capacity(hand.len());
    match hand.iter().find(|card| !seen.insert(**card)) {
        Some(card) => Err(SearchError::DuplicateCard(*card)),
        None => Ok(()),
    }
}

/// Lazily yields every `size`-card subset of `cards` in lexicographic index
/// order. Subsets keep the order of `cards`.
struct Subsets<'a> {
    cards: &'a [Card],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Subsets<'a> {
    fn new(cards: &'a [Card], size: usize) -> Self {
        Self {
            cards,
            indices: (0..size).collect(),
            done: size == 0 || size > cards.len(),
        }
    }
}

impl Iterator for Subsets<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let subset = self.indices.iter().map(|&i| self.cards[i]).collect();

        let size = self.indices.len();
        let n = self.cards.len();
        match (0..size).rev().find(|&i| self.indices[i] != i + n - size) {
            Some(pos) => {
                self.indices[pos] += 1;
                for i in pos + 1..size {
                    self.indices[i] = self.indices[i - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(subset)
    }
}

/// Sort cards weakest first (rank, then suit), the way hands are shown.
pub fn sort_hand(cards: &mut [Card]) {
    cards.sort();
}
