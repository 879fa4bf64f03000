//! Rules configuration for the play validator.
//!
//! Every field has a default matching the behaviour of the table rules, so an
//! empty JSON object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a [`RulesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do when the previous play carries an unrecognised category.
///
/// A well-formed room never stores an `Invalid` hand as its last play, so
/// this only matters when upstream state is corrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorPlayPolicy {
    /// Accept any valid proposed play so the round cannot deadlock.
    #[default]
    FailOpen,
    /// Reject the proposed play and surface the corruption.
    FailClosed,
}

/// Tunable rules for [`PlayValidator`](crate::validator::PlayValidator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Policy for a previous play whose category is `Invalid`.
    pub unrecognised_prior: PriorPlayPolicy,
    /// Require a leading play (no previous play) to be a valid combination.
    ///
    /// Off by default: a leading play is accepted unconditionally.
    pub validate_leading_play: bool,
}

impl RulesConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
