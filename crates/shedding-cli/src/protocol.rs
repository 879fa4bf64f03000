//! JSON-lines protocol spoken by `shedding stdio`.
//!
//! A room controller writes one [`Request`] per line and reads one
//! [`Response`] per line. The hand returned by `Classify` is what the
//! controller stores and sends back as `last_play` on the next `CanPlay`.

use serde::{Deserialize, Serialize};

use shedding_core::moves::playable_combinations;
use shedding_core::{Card, ClassifiedHand, LastPlay, PlayValidator, Rank, classify};

/// Messages sent from the room controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Classify a set of cards
    Classify { cards: Vec<Card> },

    /// Check whether `proposed` may be played on `last_play`
    CanPlay {
        proposed: Vec<Card>,
        #[serde(default)]
        last_play: Option<ClassifiedHand>,
    },

    /// List every legal play from a player's hand
    Hints {
        hand: Vec<Card>,
        #[serde(default)]
        last_play: Option<ClassifiedHand>,
    },

    /// Ping to check the process is alive
    Ping,
}

/// Messages written back to the room controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Result of a `Classify` request
    Classified {
        hand: ClassifiedHand,
        straight_value: Option<u8>,
        full_house: Option<(Rank, Rank)>,
    },

    /// Result of a `CanPlay` request
    Verdict { legal: bool, reason: String },

    /// Result of a `Hints` request, strongest play first
    Hints {
        plays: Vec<ClassifiedHand>,
        must_pass: bool,
    },

    /// Pong response to ping
    Pong,

    /// The request line could not be understood
    Error { message: String },
}

/// Answer a single request.
pub fn handle(validator: &PlayValidator, request: Request) -> Response {
    match request {
        Request::Classify { cards } => {
            let hand = classify(&cards);
            Response::Classified {
                straight_value: hand.straight_value(),
                full_house: hand.full_house_ranks(),
                hand,
            }
        }
        Request::CanPlay {
            proposed,
            last_play,
        } => match validator.judge(&proposed, &LastPlay::from(last_play)) {
            Ok(acceptance) => Response::Verdict {
                legal: true,
                reason: acceptance.to_string(),
            },
            Err(rejection) => Response::Verdict {
                legal: false,
                reason: rejection.to_string(),
            },
        },
        Request::Hints { hand, last_play } => {
            match playable_combinations(&hand, &LastPlay::from(last_play), validator) {
                Ok(plays) => Response::Hints {
                    must_pass: plays.is_empty(),
                    plays,
                },
                Err(e) => Response::Error {
                    message: e.to_string(),
                },
            }
        }
        Request::Ping => Response::Pong,
    }
}

/// Decode and answer one raw input line.
///
/// Returns `None` for empty/whitespace-only input; malformed JSON yields an
/// [`Response::Error`] so the caller can keep reading.
pub fn handle_line(validator: &PlayValidator, line: &str) -> Option<Response> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let response = match serde_json::from_str::<Request>(trimmed) {
        Ok(request) => handle(validator, request),
        Err(e) => {
            tracing::warn!(error = %e, "malformed request");
            Response::Error {
                message: e.to_string(),
            }
        }
    };
    Some(response)
}
