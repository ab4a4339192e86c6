//! Repository leaderboard: fetch a set of GitHub accounts' repositories,
//! filter them, rank them by one of several modes and render the result.
//!
//! ```ignore
//! let config = LeaderboardConfig::default();
//! let mut board = Leaderboard::new(config.clone(), HttpFetcher::new(&config)?);
//! board.load().await?;
//! board.set_mode(WeightMode::Forks);
//! println!("{}", board.render().to_html());
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod protocol;
pub mod rank;
pub mod render;
pub mod repo;
pub mod session;

pub use config::LeaderboardConfig;
pub use error::{FetchError, LeaderboardError};
pub use fetch::{HttpFetcher, RepoFetcher};
pub use pipeline::{Leaderboard, PipelineState};
pub use protocol::*;
pub use rank::WeightMode;
pub use render::{BoardItem, BoardView, Rendered};
pub use repo::Repo;
pub use session::serve_lines;
