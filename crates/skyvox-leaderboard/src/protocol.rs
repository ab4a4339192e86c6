//! Board protocol - JSON command/response definitions

use serde::{Deserialize, Serialize};

use crate::fetch::RepoFetcher;
use crate::pipeline::{Leaderboard, PipelineState};
use crate::rank::WeightMode;
use crate::render::Rendered;

/// Commands sent by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum BoardCommand {
    /// Switch ranking mode by control name (blank keeps the current mode,
    /// unknown names select weighted)
    SetMode { mode: String },
    /// Flip between the top ten and the full list
    ToggleShowAll,
    /// Current view model
    Render,
    /// Current view as HTML
    RenderHtml,
    /// Pipeline state and view settings
    GetState,
    /// Ping (health check)
    Ping,
}

/// Responses to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum BoardResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    View(Rendered),
    Pong { message: String },
    State {
        state: PipelineState,
        mode: WeightMode,
        show_all: bool,
        total: usize,
    },
    Html { html: String },
}

impl BoardResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self::Ok { data }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error {
            message: msg.into(),
        }
    }

    pub fn pong() -> Self {
        Self::ok(ResponseData::Pong {
            message: "pong".into(),
        })
    }

    pub fn none() -> Self {
        Self::ok(ResponseData::None)
    }
}

/// Something that answers board commands
pub trait BoardHandler {
    fn handle_command(&mut self, cmd: BoardCommand) -> BoardResponse;
}

impl<F: RepoFetcher> BoardHandler for Leaderboard<F> {
    fn handle_command(&mut self, cmd: BoardCommand) -> BoardResponse {
        match cmd {
            BoardCommand::SetMode { mode } => {
                let mode = self.set_mode_named(&mode);
                log::info!("Ranking by {}", mode);
                BoardResponse::ok(ResponseData::View(self.render()))
            }
            BoardCommand::ToggleShowAll => {
                self.toggle_show_all();
                BoardResponse::ok(ResponseData::View(self.render()))
            }
            BoardCommand::Render => BoardResponse::ok(ResponseData::View(self.render())),
            BoardCommand::RenderHtml => BoardResponse::ok(ResponseData::Html {
                html: self.render().to_html(),
            }),
            BoardCommand::GetState => BoardResponse::ok(ResponseData::State {
                state: self.state(),
                mode: self.mode(),
                show_all: self.show_all(),
                total: self.repos().map_or(0, |repos| repos.len()),
            }),
            BoardCommand::Ping => BoardResponse::pong(),
        }
    }
}
