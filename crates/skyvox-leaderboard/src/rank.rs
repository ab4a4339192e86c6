//! Ranking modes and the weight/score computation

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repo::Repo;

const MS_PER_DAY: i64 = 86_400_000;

/// How repositories are ranked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    Forks,
    Watchers,
    /// Forks plus watchers
    WatchFork,
    /// Most recently updated first, no score shown
    Recent,
    /// forks * 3 + watchers - whole days since update * 5
    #[default]
    Weighted,
}

impl WeightMode {
    pub const ALL: [WeightMode; 5] = [
        WeightMode::Forks,
        WeightMode::Watchers,
        WeightMode::WatchFork,
        WeightMode::Recent,
        WeightMode::Weighted,
    ];

    /// Mode for a control name. Unknown names select [`WeightMode::Weighted`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "forks" => WeightMode::Forks,
            "watchers" => WeightMode::Watchers,
            "watchfork" => WeightMode::WatchFork,
            "recent" => WeightMode::Recent,
            _ => WeightMode::Weighted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightMode::Forks => "forks",
            WeightMode::Watchers => "watchers",
            WeightMode::WatchFork => "watchfork",
            WeightMode::Recent => "recent",
            WeightMode::Weighted => "weighted",
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days between `updated_ms` and `now_ms`, rounded toward negative infinity
fn days_since(updated_ms: i64, now_ms: i64) -> i64 {
    now_ms.saturating_sub(updated_ms).div_euclid(MS_PER_DAY)
}

/// Weight and displayed score of one repository
pub fn weigh(repo: &Repo, mode: WeightMode, now: DateTime<Utc>) -> (i64, Option<i64>) {
    let weight = match mode {
        WeightMode::Forks => repo.forks,
        WeightMode::Watchers => repo.watchers,
        WeightMode::WatchFork => repo.forks.saturating_add(repo.watchers),
        WeightMode::Recent => return (repo.updated_ms(), None),
        WeightMode::Weighted => {
            let days = days_since(repo.updated_ms(), now.timestamp_millis());
            repo.forks
                .saturating_mul(3)
                .saturating_add(repo.watchers)
                .saturating_sub(days.saturating_mul(5))
        }
    };
    (weight, Some(weight))
}

/// Recompute weights for `mode` and sort descending by weight.
/// The sort is stable: equal weights keep their previous relative order.
pub fn rank(repos: &mut [Repo], mode: WeightMode, now: DateTime<Utc>) {
    for repo in repos.iter_mut() {
        let (weight, score) = weigh(repo, mode, now);
        repo.weight = weight;
        repo.leaderboard_score = score;
    }
    repos.sort_by(|a, b| b.weight.cmp(&a.weight));
}
