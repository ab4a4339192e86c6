//! Error types for fetching and the leaderboard pipeline

use thiserror::Error;

/// Failure of a single source request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} answered with status {status}")]
    Status { source_name: String, status: u16 },

    #[error("{0}")]
    Other(String),
}

/// Pipeline-level error
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Loading failed after {attempts} attempt(s)")]
    Failed { attempts: u32 },

    #[error("Leaderboard is not loaded")]
    NotReady,

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
