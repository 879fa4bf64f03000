//! Play validation: may a proposed set of cards be played on top of the last
//! accepted play?
//!
//! The validator is a pure decision function. The last play is supplied by
//! the caller on every call and is never cached or mutated.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, Rank, Suit};
use crate::config::{PriorPlayPolicy, RulesConfig};
use crate::hand::{ClassifiedHand, HandCategory, classify};

/// The play currently on the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastPlay {
    /// New round: the next play leads.
    #[default]
    Absent,
    /// The last accepted play.
    Valid(ClassifiedHand),
}

impl LastPlay {
    pub fn hand(&self) -> Option<&ClassifiedHand> {
        match self {
            LastPlay::Absent => None,
            LastPlay::Valid(hand) => Some(hand),
        }
    }
}

impl From<Option<ClassifiedHand>> for LastPlay {
    fn from(hand: Option<ClassifiedHand>) -> Self {
        hand.map_or(LastPlay::Absent, LastPlay::Valid)
    }
}

/// Why a play was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// There was no previous play.
    Lead,
    /// The proposed play beats the previous play.
    Beats,
    /// The previous play was unrecognised and the rules fail open.
    UnrecognisedPrior,
}

impl fmt::Display for Acceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acceptance::Lead => f.write_str("leads a new round"),
            Acceptance::Beats => f.write_str("beats the previous play"),
            Acceptance::UnrecognisedPrior => f.write_str("previous play is unrecognised; accepted"),
        }
    }
}

/// Why a play was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlayRejection {
    #[error("expected {expected} cards, got {actual}")]
    CardCount { expected: usize, actual: usize },

    #[error("cards do not form a playable combination")]
    InvalidCombination,

    #[error("{proposed} does not beat {last}")]
    DoesNotBeat {
        proposed: HandCategory,
        last: HandCategory,
    },

    #[error("previous play has an unrecognised category")]
    UnrecognisedPrior,
}

/// Decides whether plays are legal under a fixed [`RulesConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayValidator {
    config: RulesConfig,
}

impl PlayValidator {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Decide whether `proposed` may be played on `last_play`, with the reason.
    pub fn judge(
        &self,
        proposed: &[Card],
        last_play: &LastPlay,
    ) -> Result<Acceptance, PlayRejection> {
        let verdict = self.decide(proposed, last_play);
        tracing::debug!(
            proposed = %crate::cards::format_cards(proposed),
            last = ?last_play.hand().map(|h| h.category),
            ?verdict,
            "judged play"
        );
        verdict
    }

    /// Boolean form of [`judge`](Self::judge).
    pub fn can_play(&self, proposed: &[Card], last_play: &LastPlay) -> bool {
        self.judge(proposed, last_play).is_ok()
    }

    fn decide(
        &self,
        proposed: &[Card],
        last_play: &LastPlay,
    ) -> Result<Acceptance, PlayRejection> {
        let last = match last_play {
            LastPlay::Absent => {
                if self.config.validate_leading_play && !classify(proposed).is_valid() {
                    return Err(PlayRejection::InvalidCombination);
                }
                return Ok(Acceptance::Lead);
            }
            LastPlay::Valid(last) => last,
        };

        if proposed.len() != last.len() {
            return Err(PlayRejection::CardCount {
                expected: last.len(),
                actual: proposed.len(),
            });
        }

        let hand = classify(proposed);
        if !hand.is_valid() {
            return Err(PlayRejection::InvalidCombination);
        }

        if !last.is_valid() {
            tracing::warn!(
                last = %crate::cards::format_cards(last.cards()),
                policy = ?self.config.unrecognised_prior,
                "previous play has an unrecognised category"
            );
            return match self.config.unrecognised_prior {
                PriorPlayPolicy::FailOpen => Ok(Acceptance::UnrecognisedPrior),
                PriorPlayPolicy::FailClosed => Err(PlayRejection::UnrecognisedPrior),
            };
        }

        match compare(&hand, last) {
            Ordering::Greater => Ok(Acceptance::Beats),
            Ordering::Less | Ordering::Equal => Err(PlayRejection::DoesNotBeat {
                proposed: hand.category,
                last: last.category,
            }),
        }
    }
}

/// Whether `proposed` may be played on `last_play` under the default rules.
pub fn can_play(proposed: &[Card], last_play: &LastPlay) -> bool {
    PlayValidator::default().can_play(proposed, last_play)
}

/// Order two classified hands: category ladder first, then the tie-break for
/// that category.
///
/// `Equal` means neither hand beats the other.
pub fn compare(a: &ClassifiedHand, b: &ClassifiedHand) -> Ordering {
    a.category.cmp(&b.category).then_with(|| match a.category {
        HandCategory::Straight | HandCategory::StraightFlush => a
            .straight_value()
            .cmp(&b.straight_value())
            .then_with(|| max_suit(a.cards()).cmp(&max_suit(b.cards()))),
        HandCategory::FullHouse => match (a.full_house_ranks(), b.full_house_ranks()) {
            (Some(ours), Some(theirs)) => ours.cmp(&theirs),
            _ => Ordering::Equal,
        },
        _ => top_card_key(a.cards()).cmp(&top_card_key(b.cards())),
    })
}

fn max_suit(cards: &[Card]) -> Option<Suit> {
    cards.iter().map(Card::suit).max()
}

/// Highest rank present, with the strongest suit among cards of that rank.
fn top_card_key(cards: &[Card]) -> Option<(Rank, Suit)> {
    let top = cards.iter().map(Card::rank).max()?;
    let suit = cards
        .iter()
        .filter(|c| c.rank() == top)
        .map(Card::suit)
        .max()?;
    Some((top, suit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(notation: &str) -> Vec<Card> {
        parse_cards(notation).unwrap()
    }

    fn last(notation: &str) -> LastPlay {
        LastPlay::Valid(classify(&cards(notation)))
    }

    #[test]
    fn leading_play_is_always_accepted() {
        assert!(can_play(&cards("3♦"), &LastPlay::Absent));
        assert!(can_play(&cards("7♦ 7♣ 7♥ K♠ K♦"), &LastPlay::Absent));
        // Leading plays are not classified under the default rules.
        assert!(can_play(&cards("3♦ 9♠"), &LastPlay::Absent));
        assert_eq!(
            PlayValidator::default().judge(&cards("3♦"), &LastPlay::Absent),
            Ok(Acceptance::Lead)
        );
    }

    #[test]
    fn leading_play_can_be_validated() {
        let validator = PlayValidator::new(RulesConfig {
            validate_leading_play: true,
            ..RulesConfig::default()
        });
        assert!(validator.can_play(&cards("4♣ 4♠"), &LastPlay::Absent));
        assert_eq!(
            validator.judge(&cards("3♦ 9♠"), &LastPlay::Absent),
            Err(PlayRejection::InvalidCombination)
        );
    }

    #[test]
    fn card_count_must_match() {
        assert_eq!(
            PlayValidator::default().judge(&cards("2♠"), &last("3♦ 3♣")),
            Err(PlayRejection::CardCount { expected: 2, actual: 1 })
        );
        assert!(!can_play(&cards("A♠ A♥ A♦ A♣"), &last("3♦ 3♣ 3♥")));
    }

    #[test]
    fn invalid_proposal_is_rejected() {
        assert_eq!(
            PlayValidator::default().judge(&cards("9♦ 10♠"), &last("3♦ 3♣")),
            Err(PlayRejection::InvalidCombination)
        );
    }

    #[test]
    fn higher_category_wins_regardless_of_cards() {
        assert!(can_play(&cards("3♦ 3♣ 3♥ 4♠ 4♦"), &last("4♥ 8♥ 10♥ Q♥ 2♥")));
        assert!(can_play(&cards("3♥ 5♥ 7♥ 9♥ J♥"), &last("10♦ J♣ Q♥ K♠ A♦")));
        assert!(can_play(&cards("3♦ 3♣ 3♥ 3♠ 4♦"), &last("2♦ 2♣ 2♥ A♠ A♦")));
        assert!(!can_play(&cards("2♦ 2♣ 2♥ A♠ A♦"), &last("3♦ 3♣ 3♥ 3♠ 4♦")));
        assert!(can_play(&cards("3♠ 4♠ 5♠ 6♠ 7♠"), &last("2♦ 2♣ 2♥ 2♠ A♦")));
        assert!(can_play(&cards("10♦ J♦ Q♦ K♦ A♦"), &last("9♠ 10♠ J♠ Q♠ K♠")));
    }

    #[test]
    fn single_cards_compare_rank_then_suit() {
        assert!(can_play(&cards("2♦"), &last("A♠")));
        assert!(!can_play(&cards("A♠"), &last("2♦")));
        assert!(can_play(&cards("9♠"), &last("9♥")));
        assert!(!can_play(&cards("9♥"), &last("9♠")));
    }

    #[test]
    fn pairs_compare_top_suit_on_equal_rank() {
        assert!(can_play(&cards("8♦ 8♠"), &last("8♣ 8♥")));
        assert!(!can_play(&cards("8♣ 8♥"), &last("8♦ 8♠")));
        assert!(can_play(&cards("9♦ 9♣"), &last("8♥ 8♠")));
    }

    #[test]
    fn straights_compare_value_then_suit() {
        // 2-3-4-5-6 beats the wheel.
        assert!(can_play(&cards("2♦ 3♣ 4♥ 5♠ 6♦"), &last("A♦ 2♣ 3♥ 4♠ 5♦")));
        assert!(!can_play(&cards("A♦ 2♣ 3♥ 4♠ 5♦"), &last("2♦ 3♣ 4♥ 5♠ 6♦")));

        // Ace-high run beats everything else.
        assert!(can_play(&cards("10♦ J♣ Q♥ K♠ A♦"), &last("9♦ 10♣ J♥ Q♠ K♦")));

        // Equal value: highest suit anywhere in the hand decides.
        assert!(can_play(&cards("3♦ 4♦ 5♦ 6♦ 7♠"), &last("3♥ 4♥ 5♥ 6♥ 7♣")));
        assert!(!can_play(&cards("3♥ 4♥ 5♥ 6♥ 7♣"), &last("3♦ 4♦ 5♦ 6♦ 7♠")));
    }

    #[test]
    fn straight_flushes_compare_value_then_suit() {
        assert!(can_play(&cards("4♦ 5♦ 6♦ 7♦ 8♦"), &last("3♠ 4♠ 5♠ 6♠ 7♠")));
        assert!(can_play(&cards("4♠ 5♠ 6♠ 7♠ 8♠"), &last("4♥ 5♥ 6♥ 7♥ 8♥")));
        assert!(can_play(&cards("2♣ 3♣ 4♣ 5♣ 6♣"), &last("A♠ 2♠ 3♠ 4♠ 5♠")));
    }

    #[test]
    fn full_houses_compare_triple_then_pair() {
        assert!(can_play(&cards("8♦ 8♣ 8♥ 3♠ 3♦"), &last("7♦ 7♣ 7♥ 2♠ 2♦")));
        assert!(!can_play(&cards("7♦ 7♣ 7♥ 2♠ 2♦"), &last("8♦ 8♣ 8♥ 3♠ 3♦")));
    }

    #[test]
    fn full_houses_with_equal_triples_compare_pair() {
        assert!(can_play(&cards("7♦ 7♣ 7♠ K♠ K♦"), &last("7♦ 7♣ 7♥ Q♠ Q♦")));
        assert!(!can_play(&cards("7♦ 7♣ 7♥ Q♠ Q♦"), &last("7♦ 7♣ 7♠ K♠ K♦")));
    }

    #[test]
    fn royal_flushes_compare_suit() {
        assert!(can_play(&cards("10♠ J♠ Q♠ K♠ A♠"), &last("10♥ J♥ Q♥ K♥ A♥")));
        assert!(!can_play(&cards("10♥ J♥ Q♥ K♥ A♥"), &last("10♠ J♠ Q♠ K♠ A♠")));
    }

    #[test]
    fn four_card_quads_compare_rank() {
        assert!(can_play(&cards("2♦ 2♣ 2♥ 2♠"), &last("A♦ A♣ A♥ A♠")));
        assert!(!can_play(&cards("A♦ A♣ A♥ A♠"), &last("2♦ 2♣ 2♥ 2♠")));
    }

    #[test]
    fn flushes_compare_top_card() {
        assert!(can_play(&cards("3♦ 5♦ 7♦ 9♦ 2♦"), &last("4♠ 6♠ 8♠ 10♠ A♠")));
        assert!(can_play(&cards("3♠ 5♠ 7♠ 9♠ K♠"), &last("4♥ 6♥ 8♥ 10♥ K♥")));
    }

    #[test]
    fn five_card_quads_compare_highest_card() {
        assert!(can_play(&cards("3♦ 3♣ 3♥ 3♠ A♦"), &last("4♦ 4♣ 4♥ 4♠ K♦")));
        assert!(can_play(&cards("5♦ 5♣ 5♥ 5♠ 6♦"), &last("4♦ 4♣ 4♥ 4♠ 3♦")));
    }

    #[test]
    fn a_hand_never_beats_itself() {
        for notation in [
            "5♣",
            "J♦ J♠",
            "A♦ 2♣ 3♥ 4♠ 5♦",
            "7♦ 7♣ 7♥ K♠ K♦",
            "10♠ J♠ Q♠ K♠ A♠",
        ] {
            assert!(!can_play(&cards(notation), &last(notation)), "{notation}");
        }
    }

    #[test]
    fn unrecognised_prior_fails_open_by_default() {
        let corrupt = LastPlay::Valid(classify(&cards("3♦ 9♠")));
        assert_eq!(
            PlayValidator::default().judge(&cards("4♣ 4♠"), &corrupt),
            Ok(Acceptance::UnrecognisedPrior)
        );
        // Size and validity of the proposal are still checked first.
        assert!(!can_play(&cards("4♣"), &corrupt));
        assert!(!can_play(&cards("4♣ 5♠"), &corrupt));
    }

    #[test]
    fn unrecognised_prior_can_fail_closed() {
        let validator = PlayValidator::new(RulesConfig {
            unrecognised_prior: PriorPlayPolicy::FailClosed,
            ..RulesConfig::default()
        });
        let corrupt = LastPlay::Valid(classify(&cards("3♦ 9♠")));
        assert_eq!(
            validator.judge(&cards("4♣ 4♠"), &corrupt),
            Err(PlayRejection::UnrecognisedPrior)
        );
    }

    #[test]
    fn rejection_messages() {
        let err = PlayRejection::DoesNotBeat {
            proposed: HandCategory::Straight,
            last: HandCategory::Flush,
        };
        assert_eq!(err.to_string(), "Straight does not beat Flush");
        let err = PlayRejection::CardCount { expected: 5, actual: 2 };
        assert_eq!(err.to_string(), "expected 5 cards, got 2");
    }

    #[test]
    fn last_play_from_option() {
        assert_eq!(LastPlay::from(None), LastPlay::Absent);
        let hand = classify(&cards("6♥"));
        assert_eq!(LastPlay::from(Some(hand.clone())), LastPlay::Valid(hand));
    }
}
