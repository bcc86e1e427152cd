//! Finished-game results: outcome records and the leaderboard they feed.

pub mod recorder;
pub mod leaderboard;

pub use recorder::{OutcomeRecord, ResultRecorder};
pub use leaderboard::{Leaderboard, LeaderboardOrder, DEFAULT_CAPACITY};
