//! Presentation of the ranked list: a plain view model plus HTML output

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repo::Repo;

/// Entries below this index get a place badge and a score cell
pub const BADGE_LIMIT: usize = 10;

pub const FAILED_MESSAGE: &str = "Loading failed, please try again later.";

pub const SHOW_TOP_LABEL: &str = "View only top ten repos";

/// What the board currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Rendered {
    Loading,
    Failed { message: String },
    Board(BoardView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub items: Vec<BoardItem>,
    /// Number of ranked repositories, shown or not
    pub total: usize,
    pub show_all: bool,
    pub toggle_label: String,
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    /// 1-based position
    pub place: usize,
    /// Lowercased language followed by `place{n}`
    pub class: String,
    pub href: String,
    pub badge: Option<usize>,
    pub full_name: String,
    pub description: String,
    pub forks: i64,
    pub watchers: i64,
    pub open_issues: i64,
    pub last_updated: String,
    pub score: Option<ScoreCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCell {
    pub trophy: bool,
    /// Empty when the ranking mode has no displayed score
    pub text: String,
}

impl Rendered {
    pub fn failed() -> Self {
        Rendered::Failed {
            message: FAILED_MESSAGE.to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Rendered::Loading => "<ul id=\"leaderboard\" class=\"loading\"></ul>\n".to_string(),
            Rendered::Failed { message } => {
                format!("<ul id=\"leaderboard\"><li>{}</li></ul>\n", escape(message))
            }
            Rendered::Board(view) => view.to_html(),
        }
    }
}

/// Project an already ranked list into its view.
///
/// Shows the first `top_n` entries unless `show_all` is set.
pub fn render_board(repos: &[Repo], show_all: bool, top_n: usize, now: DateTime<Utc>) -> BoardView {
    let shown = if show_all { repos.len() } else { repos.len().min(top_n) };

    let items = repos[..shown]
        .iter()
        .enumerate()
        .map(|(i, repo)| render_item(i, repo, now))
        .collect();

    let toggle_label = if show_all {
        SHOW_TOP_LABEL.to_string()
    } else {
        format!("View all {} repos", repos.len())
    };

    BoardView {
        items,
        total: repos.len(),
        show_all,
        toggle_label,
    }
}

fn render_item(index: usize, repo: &Repo, now: DateTime<Utc>) -> BoardItem {
    let place = index + 1;
    let language = repo.language.as_deref().unwrap_or("").to_lowercase();
    let class = if language.is_empty() {
        format!("place{}", place)
    } else {
        format!("{} place{}", language, place)
    };

    let ranked = index < BADGE_LIMIT;
    let score = ranked.then(|| ScoreCell {
        trophy: index == 0,
        text: repo.leaderboard_score.map(|s| s.to_string()).unwrap_or_default(),
    });

    BoardItem {
        place,
        class,
        href: repo.link().to_string(),
        badge: ranked.then_some(place),
        full_name: repo.full_name.clone(),
        description: repo.description.clone().unwrap_or_default(),
        forks: repo.forks,
        watchers: repo.watchers,
        open_issues: repo.open_issues,
        last_updated: time_ago(repo.updated_at.unwrap_or_default(), now),
        score,
    }
}

impl BoardView {
    pub fn to_html(&self) -> String {
        let mut out = String::from("<ul id=\"leaderboard\">\n");
        for item in &self.items {
            item.write_html(&mut out);
        }
        out.push_str("</ul>\n");
        let _ = writeln!(
            out,
            "<a id=\"leaderboardShowAll\">{}</a>",
            escape(&self.toggle_label)
        );
        out
    }
}

const SEP: &str = " &nbsp;&nbsp;&bull;&nbsp;&nbsp; ";

impl BoardItem {
    fn write_html(&self, out: &mut String) {
        let _ = write!(
            out,
            "<li class=\"{}\"><a href=\"{}\">",
            escape(&self.class),
            escape(&self.href)
        );
        if let Some(badge) = self.badge {
            let _ = write!(out, "<span class=\"place place{0}\">{0}</span>", badge);
        }
        let _ = write!(
            out,
            "<span class=\"name\">{}</span><br />{}<br />",
            escape(&self.full_name),
            escape(&self.description)
        );
        let _ = write!(
            out,
            "<span class=\"details\">Forks: {}{sep}Watchers: {}{sep}Open Issues: {}{sep}Last Updated: {}</span>",
            self.forks,
            self.watchers,
            self.open_issues,
            escape(&self.last_updated),
            sep = SEP
        );
        if let Some(score) = &self.score {
            out.push_str("<span class=\"score\">");
            if score.trophy {
                out.push_str("<span class=\"trophy\"></span>");
            }
            out.push_str(&escape(&score.text));
            out.push_str("</span>");
        }
        out.push_str("</a></li>\n");
    }
}

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Relative time in words, e.g. "about 3 hours ago". Future times count as now.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = ((now - then).num_milliseconds().max(0)) as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;
    let years = days / 365.0;

    if seconds < 45.0 {
        "less than a minute ago".to_string()
    } else if seconds < 90.0 {
        "about a minute ago".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes ago", minutes.round())
    } else if minutes < 90.0 {
        "about an hour ago".to_string()
    } else if hours < 24.0 {
        format!("about {} hours ago", hours.round())
    } else if hours < 42.0 {
        "a day ago".to_string()
    } else if days < 30.0 {
        format!("{} days ago", days.round())
    } else if days < 45.0 {
        "about a month ago".to_string()
    } else if days < 365.0 {
        format!("{} months ago", (days / 30.0).round())
    } else if years < 1.5 {
        "about a year ago".to_string()
    } else {
        format!("{} years ago", years.round())
    }
}
