//! Leaderboard context: fetch once, then re-rank and re-render on demand
//!
//! States:
//! - `Idle` until [`Leaderboard::load`] is called
//! - `Fetching { attempt }` while an attempt is in flight
//! - `Ready` once every source answered in the same attempt
//! - `Failed { attempts }` after the attempt budget ran out (terminal)

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LeaderboardConfig;
use crate::error::LeaderboardError;
use crate::fetch::{fetch_attempt, RepoFetcher};
use crate::filter::filter_repos;
use crate::rank::{rank, WeightMode};
use crate::render::{render_board, Rendered};
use crate::repo::{decode_source, Repo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Fetching { attempt: u32 },
    Ready,
    Failed { attempts: u32 },
}

/// One leaderboard instance with its fetched list and view settings
pub struct Leaderboard<F> {
    config: LeaderboardConfig,
    fetcher: F,
    state: PipelineState,
    repos: Vec<Repo>,
    mode: WeightMode,
    show_all: bool,
}

impl<F: RepoFetcher> Leaderboard<F> {
    pub fn new(config: LeaderboardConfig, fetcher: F) -> Self {
        let mode = config.initial_mode;
        Self {
            config,
            fetcher,
            state: PipelineState::Idle,
            repos: Vec::new(),
            mode,
            show_all: false,
        }
    }

    /// Fetch, filter and rank. See [`Leaderboard::load_at`].
    pub async fn load(&mut self) -> Result<&[Repo], LeaderboardError> {
        self.load_at(Utc::now()).await
    }

    /// Fetch every source, retrying the whole batch until one attempt succeeds
    /// for all sources or `max_attempts` is used up.
    ///
    /// A ready board returns its cached list without fetching. A failed board
    /// stays failed.
    pub async fn load_at(&mut self, now: DateTime<Utc>) -> Result<&[Repo], LeaderboardError> {
        match self.state {
            PipelineState::Ready => return Ok(&self.repos),
            PipelineState::Failed { attempts } => {
                return Err(LeaderboardError::Failed { attempts });
            }
            PipelineState::Idle | PipelineState::Fetching { .. } => {}
        }

        let urls: Vec<String> = self
            .config
            .sources
            .iter()
            .map(|source| self.config.source_url(source))
            .collect();
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            self.state = PipelineState::Fetching { attempt };
            log::debug!("Fetching {} source(s), attempt {}/{}", urls.len(), attempt, max_attempts);

            match fetch_attempt(&self.fetcher, &urls).await {
                Ok(bodies) => {
                    let mut repos = Vec::new();
                    for (url, body) in urls.iter().zip(&bodies) {
                        match decode_source(body) {
                            Some(decoded) => repos.extend(decoded),
                            None => log::warn!("Ignoring malformed listing from {}", url),
                        }
                    }

                    let fetched = repos.len();
                    let mut repos = filter_repos(repos, &self.config.blacklist);
                    rank(&mut repos, self.mode, now);
                    log::info!(
                        "Leaderboard ready: {} of {} repositories after filtering, ranked by {}",
                        repos.len(),
                        fetched,
                        self.mode
                    );

                    self.repos = repos;
                    self.state = PipelineState::Ready;
                    return Ok(&self.repos);
                }
                Err(e) => {
                    log::warn!("Fetch attempt {}/{} failed: {}", attempt, max_attempts, e);
                    if attempt < max_attempts && self.config.retry_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                    }
                }
            }
        }

        log::error!("Giving up after {} fetch attempt(s)", max_attempts);
        self.state = PipelineState::Failed {
            attempts: max_attempts,
        };
        Err(LeaderboardError::Failed {
            attempts: max_attempts,
        })
    }

    /// Switch ranking mode, re-ranking a loaded list.
    pub fn set_mode(&mut self, mode: WeightMode) {
        self.set_mode_at(mode, Utc::now());
    }

    pub fn set_mode_at(&mut self, mode: WeightMode, now: DateTime<Utc>) {
        self.mode = mode;
        if self.state == PipelineState::Ready {
            rank(&mut self.repos, mode, now);
            log::debug!("Re-ranked {} repositories by {}", self.repos.len(), mode);
        }
    }

    /// Switch mode by control name. A blank name keeps the current mode;
    /// unknown names select weighted.
    pub fn set_mode_named(&mut self, name: &str) -> WeightMode {
        if name.trim().is_empty() {
            return self.mode;
        }
        let mode = WeightMode::parse(name);
        self.set_mode(mode);
        mode
    }

    /// Flip between the top entries and the full list. Returns the new setting.
    pub fn toggle_show_all(&mut self) -> bool {
        self.show_all = !self.show_all;
        self.show_all
    }

    pub fn render(&self) -> Rendered {
        self.render_at(Utc::now())
    }

    /// Current view; "time ago" strings are relative to `now`.
    pub fn render_at(&self, now: DateTime<Utc>) -> Rendered {
        match self.state {
            PipelineState::Idle | PipelineState::Fetching { .. } => Rendered::Loading,
            PipelineState::Failed { .. } => Rendered::failed(),
            PipelineState::Ready => Rendered::Board(render_board(
                &self.repos,
                self.show_all,
                self.config.top_n,
                now,
            )),
        }
    }

    /// Ranked list; fails unless the board is ready
    pub fn repos(&self) -> Result<&[Repo], LeaderboardError> {
        match self.state {
            PipelineState::Ready => Ok(&self.repos),
            _ => Err(LeaderboardError::NotReady),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }
}
