//! Hand evaluation and play validation for a thirteen-card shedding game.
//!
//! ```
//! use shedding_core::{HandCategory, LastPlay, can_play, classify, parse_cards};
//!
//! let wheel = parse_cards("A♦ 2♣ 3♥ 4♠ 5♦").unwrap();
//! let low_two = parse_cards("2♦ 3♣ 4♥ 5♠ 6♦").unwrap();
//!
//! let last = classify(&wheel);
//! assert_eq!(last.category, HandCategory::Straight);
//! assert!(can_play(&low_two, &LastPlay::Valid(last)));
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod hand;
pub mod moves;
pub mod validator;

pub use cards::{Card, CardParseError, Rank, Suit, parse_cards, rank_strength, suit_strength};
pub use config::{ConfigError, PriorPlayPolicy, RulesConfig};
pub use hand::{ClassifiedHand, HandCategory, classify, straight_value};
pub use validator::{Acceptance, LastPlay, PlayRejection, PlayValidator, can_play};
