//! skyvox-board - line-oriented JSON front-end for the repository leaderboard
//!
//! Loads the leaderboard once, then answers one JSON command per stdin line
//! with one JSON response line on stdout. Logs go to stderr.
//!
//! Usage: skyvox-board [--config <PATH>] [--mode <MODE>] [--html]
//!
//!   --config <PATH>  Leaderboard config JSON (default: built-in)
//!   --mode <MODE>    Initial ranking mode (forks, watchers, watchfork, recent, weighted)
//!   --html           Print the loaded board as HTML and exit

use std::io;
use std::path::Path;

use skyvox_leaderboard::{
    HttpFetcher, Leaderboard, LeaderboardConfig, LeaderboardError, WeightMode, serve_lines,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run().await {
        log::error!("skyvox-board failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), LeaderboardError> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => LeaderboardConfig::load_sync(Path::new(&path))?,
        None => LeaderboardConfig::default(),
    };
    if let Some(mode) = parse_str_arg(&args, "--mode") {
        config.initial_mode = WeightMode::parse(&mode);
    }
    let html_only = args.iter().any(|a| a == "--html");

    log::info!(
        "skyvox-board starting: {} source(s), ranked by {}",
        config.sources.len(),
        config.initial_mode
    );

    let fetcher = HttpFetcher::new(&config)?;
    let mut board = Leaderboard::new(config, fetcher);

    // A failed load is reported through the rendered view, not as an exit.
    if let Err(e) = board.load().await {
        log::error!("{}", e);
    }

    if html_only {
        print!("{}", board.render().to_html());
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = serve_lines(stdin.lock(), stdout.lock(), &mut board)?;

    log::info!("skyvox-board shutting down after {} command(s)", answered);
    Ok(())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
