//! Leaderboard configuration

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rank::WeightMode;

/// Where to fetch from and how to rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// API root, joined directly with each source path
    pub api_base: String,
    /// Account paths such as `users/nesh108` or `orgs/rust-lang`
    pub sources: Vec<String>,
    /// Repository names never shown
    pub blacklist: Vec<String>,
    /// Whole-batch attempts before giving up
    pub max_attempts: u32,
    /// Pause between attempts
    pub retry_delay_ms: u64,
    /// Per-request timeout
    pub request_timeout_ms: u64,
    /// Entries shown while the list is collapsed
    pub top_n: usize,
    pub initial_mode: WeightMode,
    pub user_agent: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com/".to_string(),
            sources: vec!["users/nesh108".to_string()],
            blacklist: vec!["gh-pages-template".to_string()],
            max_attempts: 3,
            retry_delay_ms: 0,
            request_timeout_ms: 10_000,
            top_n: 10,
            initial_mode: WeightMode::Forks,
            user_agent: concat!("skyvox-leaderboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LeaderboardConfig {
    /// Listing URL for one source
    pub fn source_url(&self, source: &str) -> String {
        format!("{}{}/repos", self.api_base, source)
    }

    /// Load from file (sync). Missing fields take their defaults.
    pub fn load_sync(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}
