//! Hand classification and straight strength.
//!
//! [`classify`] maps an unordered set of one to five cards to a
//! [`HandCategory`]. The result depends only on the multiset of cards, never on
//! the order they were supplied in.

use crate::cards::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hand categories, from lowest to highest.
///
/// The derived ordering is the category ladder: a higher category always
/// beats a lower one regardless of the cards involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// Not a playable combination.
    Invalid,
    /// A single card.
    HighCard,
    /// Two cards of the same rank.
    OnePair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind plus a pair.
    FullHouse,
    /// Four cards of the same rank, alone or with one extra card.
    FourOfAKind,
    /// Five consecutive ranks of the same suit.
    StraightFlush,
    /// 10-J-Q-K-A of the same suit.
    RoyalFlush,
}

impl HandCategory {
    /// Whether ties inside this category are broken by straight value.
    pub fn is_straight_type(self) -> bool {
        matches!(self, HandCategory::Straight | HandCategory::StraightFlush)
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::Invalid => write!(f, "Invalid"),
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
            HandCategory::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// A category together with the exact cards that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedHand {
    pub category: HandCategory,
    pub cards: Vec<Card>,
}

impl ClassifiedHand {
    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.category != HandCategory::Invalid
    }

    /// Straight strength, only for straights and straight flushes.
    pub fn straight_value(&self) -> Option<u8> {
        self.category
            .is_straight_type()
            .then(|| straight_value(&self.cards))
    }

    /// `(triple, pair)` ranks, only for full houses.
    pub fn full_house_ranks(&self) -> Option<(Rank, Rank)> {
        if self.category != HandCategory::FullHouse {
            return None;
        }
        full_house_ranks(&self.cards)
    }
}

impl fmt::Display for ClassifiedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.category, crate::cards::format_cards(&self.cards))
    }
}

const WHEEL: [Rank; 5] = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five];
const TWO_LOW: [Rank; 5] = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six];
const ACE_HIGH: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

/// Classify a set of cards.
///
/// Empty input or more than five cards yields [`HandCategory::Invalid`].
pub fn classify(cards: &[Card]) -> ClassifiedHand {
    let category = match cards {
        [] => HandCategory::Invalid,
        [_] => HandCategory::HighCard,
        [_, _] | [_, _, _] | [_, _, _, _] if same_rank(cards) => match cards.len() {
            2 => HandCategory::OnePair,
            3 => HandCategory::ThreeOfAKind,
            _ => HandCategory::FourOfAKind,
        },
        [_, _, _, _, _] => classify_five(cards),
        _ => HandCategory::Invalid,
    };
    tracing::trace!(cards = %crate::cards::format_cards(cards), %category, "classified");
    ClassifiedHand {
        category,
        cards: cards.to_vec(),
    }
}

fn classify_five(cards: &[Card]) -> HandCategory {
    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let is_straight = is_sequential(cards);
    let counts = rank_counts(cards);

    match (is_flush, is_straight, &counts[..]) {
        (true, true, _) if rank_set(cards) == ACE_HIGH => HandCategory::RoyalFlush,
        (true, true, _) => HandCategory::StraightFlush,
        (_, _, [4, 1]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (true, false, _) => HandCategory::Flush,
        (false, true, _) => HandCategory::Straight,
        _ => HandCategory::Invalid,
    }
}

fn same_rank(cards: &[Card]) -> bool {
    cards.iter().all(|c| c.rank() == cards[0].rank())
}

/// Distinct ranks present, weakest first.
fn rank_set(cards: &[Card]) -> Vec<Rank> {
    let mut ranks: Vec<Rank> = cards.iter().map(Card::rank).collect();
    ranks.sort();
    ranks.dedup();
    ranks
}

/// Get counts of each rank, sorted descending
fn rank_counts(cards: &[Card]) -> Vec<usize> {
    let mut counts: Vec<usize> = rank_set(cards)
        .into_iter()
        .map(|rank| cards.iter().filter(|c| c.rank() == rank).count())
        .collect();
    counts.sort_by(|a, b| b.cmp(a));
    counts
}

/// Whether five cards form a run.
///
/// `2` carries the top strength, so the two low runs containing it (the wheel
/// `A-2-3-4-5` and `2-3-4-5-6`) are matched explicitly before the generic
/// consecutive-strength check.
pub fn is_sequential(cards: &[Card]) -> bool {
    let ranks = rank_set(cards);
    if cards.len() != 5 || ranks.len() != 5 {
        return false;
    }
    if is_run_of(&ranks, &WHEEL) || is_run_of(&ranks, &TWO_LOW) {
        return true;
    }
    ranks
        .windows(2)
        .all(|pair| pair[1].strength() == pair[0].strength() + 1)
}

/// `ranks` must already be sorted and deduplicated.
fn is_run_of(ranks: &[Rank], run: &[Rank; 5]) -> bool {
    let mut expected = run.to_vec();
    expected.sort();
    ranks == expected.as_slice()
}

/// Comparable strength of a straight (or straight flush).
///
/// The wheel is the lowest run (valued as its `5`), 10-J-Q-K-A the highest
/// (valued as its `A`). Any other run holding a `2` is valued by its highest
/// card other than the `2`.
pub fn straight_value(cards: &[Card]) -> u8 {
    let ranks = rank_set(cards);
    if is_run_of(&ranks, &WHEEL) && !ranks.contains(&Rank::Six) {
        return Rank::Five.strength();
    }
    if is_run_of(&ranks, &ACE_HIGH) && !ranks.contains(&Rank::Two) {
        return Rank::Ace.strength();
    }
    let top = if ranks.contains(&Rank::Two) {
        ranks.iter().filter(|r| **r != Rank::Two).max()
    } else {
        ranks.iter().max()
    };
    top.map(|r| r.strength()).unwrap_or(0)
}

/// Triple and pair ranks of a `{3,2}` shaped hand.
fn full_house_ranks(cards: &[Card]) -> Option<(Rank, Rank)> {
    let count = |rank: Rank| cards.iter().filter(|c| c.rank() == rank).count();
    let ranks = rank_set(cards);
    let triple = ranks.iter().copied().find(|r| count(*r) == 3)?;
    let pair = ranks.iter().copied().find(|r| count(*r) == 2)?;
    Some((triple, pair))
}
