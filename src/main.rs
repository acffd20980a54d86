//! Headless match-three runner (default binary).
//!
//! Builds a session from `MATCH3_*` environment variables and command-line
//! flags, auto-plays it, and streams JSON lines to stdout. Logs go to stderr.

use std::io;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_three::cli::{parse_play_args, run_play};
use match_three::session::SessionConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let play = parse_play_args(&args, SessionConfig::from_env()?)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&play.log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run_play(&play, &mut out)?;

    if play.show_board {
        eprint!("{}", summary.board);
    }
    Ok(())
}
