//! Repository records as returned by the listing API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One repository. API fields plus the two ranking fields computed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub forks: i64,
    #[serde(default)]
    pub watchers: i64,
    #[serde(default)]
    pub open_issues: i64,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: bool,
    pub language: Option<String>,

    /// Sort key for the current ranking mode
    #[serde(skip_deserializing, default)]
    pub weight: i64,
    /// Displayed score; `None` shows blank
    #[serde(skip_deserializing, default, rename = "leaderboardScore")]
    pub leaderboard_score: Option<i64>,
}

impl Repo {
    /// Last update in epoch milliseconds; a missing timestamp counts as the epoch
    pub fn updated_ms(&self) -> i64 {
        self.updated_at.map_or(0, |t| t.timestamp_millis())
    }

    /// Homepage when set, else the repository page
    pub fn link(&self) -> &str {
        match self.homepage.as_deref() {
            Some(home) if !home.is_empty() => home,
            _ => &self.html_url,
        }
    }
}

/// Decode one source's response body.
///
/// Returns `None` if the body is not a JSON array. Elements that do not
/// decode as a [`Repo`] are skipped.
pub fn decode_source(body: &str) -> Option<Vec<Repo>> {
    let Value::Array(items) = serde_json::from_str::<Value>(body).ok()? else {
        return None;
    };
    let total = items.len();
    let repos: Vec<Repo> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if repos.len() < total {
        log::debug!("Skipped {} undecodable repository entries", total - repos.len());
    }
    Some(repos)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn repo(name: &str, forks: i64, watchers: i64) -> Repo {
        Repo {
            name: name.to_string(),
            full_name: format!("nesh108/{}", name),
            description: Some(format!("{} description", name)),
            homepage: None,
            html_url: format!("https://github.com/nesh108/{}", name),
            forks,
            watchers,
            open_issues: 0,
            updated_at: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            fork: false,
            language: Some("Rust".to_string()),
            weight: 0,
            leaderboard_score: None,
        }
    }

    pub(crate) fn repo_json(name: &str, fork: bool) -> Value {
        json!({
            "name": name,
            "full_name": format!("nesh108/{}", name),
            "description": null,
            "homepage": "",
            "html_url": format!("https://github.com/nesh108/{}", name),
            "forks": 2,
            "watchers": 5,
            "open_issues": 1,
            "updated_at": "2024-03-10T08:30:00Z",
            "fork": fork,
            "language": "JavaScript",
            "stargazers_count": 5
        })
    }

    #[test]
    fn test_decode_full_record() {
        let body = json!([repo_json("voxel-demo", false)]).to_string();
        let repos = decode_source(&body).unwrap();
        assert_eq!(repos.len(), 1);
        let r = &repos[0];
        assert_eq!(r.full_name, "nesh108/voxel-demo");
        assert_eq!(r.description, None);
        assert_eq!(r.forks, 2);
        assert_eq!(r.updated_ms(), 1_710_059_400_000);
        assert_eq!(r.weight, 0);
        assert_eq!(r.leaderboard_score, None);
    }

    #[test]
    fn test_decode_skips_bad_elements() {
        let body = json!([repo_json("a", false), {"name": 3}, repo_json("b", true)]).to_string();
        let repos = decode_source(&body).unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_source(r#"{"message": "API rate limit exceeded"}"#).is_none());
        assert!(decode_source("<html>").is_none());
        assert_eq!(decode_source("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_missing_timestamp_is_epoch() {
        let mut r = repo("a", 0, 0);
        r.updated_at = None;
        assert_eq!(r.updated_ms(), 0);
    }

    #[test]
    fn test_link_prefers_homepage() {
        let mut r = repo("a", 0, 0);
        assert_eq!(r.link(), "https://github.com/nesh108/a");
        r.homepage = Some(String::new());
        assert_eq!(r.link(), "https://github.com/nesh108/a");
        r.homepage = Some("https://nesh108.github.io/a".into());
        assert_eq!(r.link(), "https://nesh108.github.io/a");
    }
}
