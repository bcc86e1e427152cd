//! Top-N leaderboard of finished games.
//!
//! Entries are kept ordered by score, highest first. An entry that ties an
//! existing score goes after it, so earlier results keep their rank. The
//! persisted form is a plain JSON list of `{name, score, date}` objects.

use std::cmp::Reverse;

use super::recorder::OutcomeRecord;
use crate::core::{GameConfig, LeaderboardError};

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// Display order for leaderboard entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeaderboardOrder {
    /// Highest score first, ties in arrival order.
    #[default]
    Score,
    /// Most recent first.
    Date,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<OutcomeRecord>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Leaderboard {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Leaderboard sized by `config.leaderboard_capacity`.
    #[must_use]
    pub fn for_config(config: &GameConfig) -> Self {
        Self::new(config.leaderboard_capacity)
    }

    /// Insert a record, returning its 0-based rank, or `None` if it did not
    /// make the cut.
    pub fn insert(&mut self, record: OutcomeRecord) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|entry| entry.winner_score < record.winner_score)
            .unwrap_or(self.entries.len());

        if rank >= self.capacity {
            log::debug!(
                "{} with {} did not reach the top {}",
                record.winner_name,
                record.winner_score,
                self.capacity
            );
            return None;
        }

        self.entries.insert(rank, record);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// Entries in score order.
    #[must_use]
    pub fn entries(&self) -> &[OutcomeRecord] {
        &self.entries
    }

    #[must_use]
    pub fn sorted(&self, order: LeaderboardOrder) -> Vec<&OutcomeRecord> {
        let mut view: Vec<_> = self.entries.iter().collect();
        if order == LeaderboardOrder::Date {
            view.sort_by_key(|entry| Reverse(entry.timestamp));
        }
        view
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Load a persisted list, restoring score order and the size cap.
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, LeaderboardError> {
        let mut entries: Vec<OutcomeRecord> = serde_json::from_str(json)?;
        entries.sort_by_key(|entry| Reverse(entry.winner_score));
        entries.truncate(capacity);
        Ok(Self { capacity, entries })
    }
}
