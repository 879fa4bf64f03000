//! Card model: ranks, suits and the strength tables used for comparison.
//!
//! # Examples
//!
//! ```
//! use shedding_core::cards::{Card, Rank, Suit};
//!
//! let card: Card = "10♠".parse().unwrap();
//! assert_eq!(card, Card(Rank::Ten, Suit::Spades));
//! assert_eq!(card.rank().strength(), 10);
//! assert_eq!(card.to_string(), "10♠");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing card notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("empty card")]
    Empty,

    #[error("unknown rank '{0}'")]
    Rank(String),

    #[error("unknown suit '{0}'")]
    Suit(String),
}

/// Represents a card suit, ordered weakest to strongest (♦ < ♣ < ♥ < ♠).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "♦", alias = "D")]
    Diamonds = 1,
    #[serde(rename = "♣", alias = "C")]
    Clubs = 2,
    #[serde(rename = "♥", alias = "H")]
    Hearts = 3,
    #[serde(rename = "♠", alias = "S")]
    Spades = 4,
}

impl Suit {
    /// All suits, weakest first
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    /// Tie-break strength (1..=4).
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Returns the suit as a display symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Suit {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "♦" | "d" | "D" => Ok(Suit::Diamonds),
            "♣" | "c" | "C" => Ok(Suit::Clubs),
            "♥" | "h" | "H" => Ok(Suit::Hearts),
            "♠" | "s" | "S" => Ok(Suit::Spades),
            other => Err(CardParseError::Suit(other.to_string())),
        }
    }
}

/// Represents a card rank.
///
/// The discriminant is the comparison strength, so `2` is the highest rank
/// (15) and `A` the second highest (14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "3")]
    Three = 3,
    #[serde(rename = "4")]
    Four = 4,
    #[serde(rename = "5")]
    Five = 5,
    #[serde(rename = "6")]
    Six = 6,
    #[serde(rename = "7")]
    Seven = 7,
    #[serde(rename = "8")]
    Eight = 8,
    #[serde(rename = "9")]
    Nine = 9,
    #[serde(rename = "10", alias = "T")]
    Ten = 10,
    #[serde(rename = "J")]
    Jack = 11,
    #[serde(rename = "Q")]
    Queen = 12,
    #[serde(rename = "K")]
    King = 13,
    #[serde(rename = "A")]
    Ace = 14,
    #[serde(rename = "2")]
    Two = 15,
}

impl Rank {
    /// All ranks, weakest first
    pub const ALL: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Comparison strength (3..=15).
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Returns the rank as a display string
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Two,
            _ => return Err(CardParseError::Rank(s.to_string())),
        };
        Ok(rank)
    }
}

/// A playing card. Equality is structural over rank and suit; cards order by
/// rank, then suit.
///
/// Serialized as its notation string, e.g. `"10♠"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(pub Rank, pub Suit);

impl Card {
    pub fn rank(&self) -> Rank {
        self.0
    }

    pub fn suit(&self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // The suit is always the final character; everything before it is the rank.
        let (split, _) = s.char_indices().last().ok_or(CardParseError::Empty)?;
        if split == 0 {
            return Err(CardParseError::Rank(s.to_string()));
        }
        let (rank, suit) = s.split_at(split);
        Ok(Card(rank.parse()?, suit.parse()?))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Comparison strength of a rank (`3=3 … A=14, 2=15`).
pub fn rank_strength(rank: Rank) -> u8 {
    rank.strength()
}

/// Tie-break strength of a suit (`♦=1, ♣=2, ♥=3, ♠=4`).
pub fn suit_strength(suit: Suit) -> u8 {
    suit.strength()
}

/// Parse a list of cards separated by whitespace and/or commas.
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Render cards as a space separated list.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
