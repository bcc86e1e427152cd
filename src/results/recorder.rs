//! Outcome records for finished sessions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::Player;

/// Immutable summary of a finished game: who won, with how much, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "name")]
    pub winner_name: String,
    #[serde(rename = "score")]
    pub winner_score: u32,
    #[serde(rename = "date", with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl OutcomeRecord {
    #[must_use]
    pub fn new(winner_name: impl Into<String>, winner_score: u32, timestamp: OffsetDateTime) -> Self {
        Self {
            winner_name: winner_name.into(),
            winner_score,
            timestamp,
        }
    }
}

/// Stamps outcome records. Keeps no state; persistence belongs to whoever
/// owns the leaderboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultRecorder;

impl ResultRecorder {
    /// Record `winner` with the current UTC time.
    #[must_use]
    pub fn record(&self, winner: &Player) -> OutcomeRecord {
        self.record_at(winner, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn record_at(&self, winner: &Player, timestamp: OffsetDateTime) -> OutcomeRecord {
        OutcomeRecord::new(winner.name.clone(), winner.score, timestamp)
    }
}
