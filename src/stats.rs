use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};
use crate::util::{mean, percent};

/// Key the statistics are stored under unless configured otherwise.
pub const DEFAULT_STATS_KEY: &str = "gameStats";

/// Running totals over every finished game.
///
/// Serialized as a JSON object; fields missing from older saves default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregateStats {
    #[serde(rename = "games")]
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    /// Sum of elapsed seconds at the end of each game.
    #[serde(rename = "totalTime")]
    pub total_seconds: u64,
    pub total_attempts: u64,
}

impl AggregateStats {
    /// Percentage of games won, 0 before any game has finished.
    pub fn win_rate(&self) -> u32 {
        percent(self.wins, self.games_played)
    }

    pub fn average_seconds(&self) -> Option<f64> {
        mean(self.total_seconds, self.games_played)
    }

    pub fn average_attempts(&self) -> Option<f64> {
        mean(self.total_attempts, self.games_played)
    }

    pub fn record(&mut self, won: bool, seconds: u64, attempts: u32) {
        self.games_played += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.total_seconds += seconds;
        self.total_attempts += u64::from(attempts);
    }
}

/// Owns the persisted statistics: loads them once, saves after each finished game.
pub struct StatsKeeper {
    store: Box<dyn KeyValueStore>,
    key: String,
    stats: AggregateStats,
}

impl StatsKeeper {
    /// Missing or unreadable stats start from zero.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stats = match store.load(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable stats under {key:?}: {e}");
                AggregateStats::default()
            }),
            Ok(None) => AggregateStats::default(),
            Err(e) => {
                log::warn!("could not load stats under {key:?}: {e}");
                AggregateStats::default()
            }
        };
        log::debug!(
            "loaded stats: {} games, {} wins",
            stats.games_played,
            stats.wins
        );
        Self { store, key, stats }
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Counts a finished game and writes the totals back.
    ///
    /// The in-memory totals are updated even when the save fails.
    pub fn record(&mut self, won: bool, seconds: u64, attempts: u32) -> Result<(), StoreError> {
        self.stats.record(won, seconds, attempts);
        self.save()
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.stats)?;
        self.store.save(&self.key, &raw)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

impl std::fmt::Debug for StatsKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsKeeper")
            .field("key", &self.key)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn win_rate_is_zero_without_games() {
        let stats = AggregateStats::default();
        assert_eq!(stats.win_rate(), 0);
        assert_eq!(stats.average_seconds(), None);
        assert_eq!(stats.average_attempts(), None);
    }

    #[test]
    fn record_win_and_loss() {
        let mut stats = AggregateStats::default();
        stats.record(true, 30, 2);
        stats.record(false, 90, 5);
        stats.record(true, 60, 5);

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate(), 67);
        assert_eq!(stats.average_seconds(), Some(60.0));
        assert_eq!(stats.average_attempts(), Some(4.0));
    }

    #[test]
    fn reads_legacy_shape() {
        let stats: AggregateStats =
            serde_json::from_str(r#"{"wins":2,"losses":1,"totalTime":75,"totalAttempts":8,"games":3}"#)
                .unwrap();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.total_seconds, 75);
        assert_eq!(stats.total_attempts, 8);

        let partial: AggregateStats = serde_json::from_str(r#"{"games":4,"wins":1}"#).unwrap();
        assert_eq!(partial.games_played, 4);
        assert_eq!(partial.losses, 0);
    }

    #[test]
    fn keeper_round_trips_through_store() {
        let mut keeper = StatsKeeper::load(Box::new(MemoryStore::new()), DEFAULT_STATS_KEY);
        keeper.record(true, 12, 3).unwrap();

        let raw = keeper.store().load(DEFAULT_STATS_KEY).unwrap().unwrap();
        let saved: AggregateStats = serde_json::from_str(&raw).unwrap();
        assert_eq!(&saved, keeper.stats());
    }

    #[test]
    fn keeper_tolerates_garbage() {
        let mut store = MemoryStore::new();
        store.save(DEFAULT_STATS_KEY, "not json").unwrap();
        let keeper = StatsKeeper::load(Box::new(store), DEFAULT_STATS_KEY);
        assert_eq!(keeper.stats(), &AggregateStats::default());
    }
}
