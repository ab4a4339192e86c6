//! Repository filtering: forks, pages sites and blacklisted names are dropped

use crate::repo::Repo;

/// Name fragments marking a GitHub Pages site (old and new domains)
const PAGES_SUFFIXES: [&str; 2] = [".github.com", ".github.io"];

fn contains_after_start(name: &str, needle: &str) -> bool {
    matches!(name.find(needle), Some(i) if i > 0)
}

/// True if `repo` belongs on the leaderboard
pub fn keep(repo: &Repo, blacklist: &[String]) -> bool {
    if repo.fork {
        return false;
    }
    if PAGES_SUFFIXES.iter().any(|s| contains_after_start(&repo.name, s)) {
        return false;
    }
    !blacklist.iter().any(|b| *b == repo.name)
}

/// Drop every repository that does not belong on the leaderboard.
/// Order of the survivors is preserved.
pub fn filter_repos(repos: Vec<Repo>, blacklist: &[String]) -> Vec<Repo> {
    let before = repos.len();
    let kept: Vec<Repo> = repos.into_iter().filter(|r| keep(r, blacklist)).collect();
    log::debug!("Filtered {} of {} repositories", before - kept.len(), before);
    kept
}
