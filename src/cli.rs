//! Headless runner: argument parsing and the auto-play loop.
//!
//! Output is one JSON object per line on the given writer:
//!
//! ```text
//! {"type":"start","game_id":1,"config":{"width":8,"height":8,"seed":1,"kinds":5,"max_moves":20}}
//! {"type":"move","turn":1,"first":{"row":0,"col":2},"second":{"row":1,"col":2}}
//! {"type":"event","kind":"Match","matched":"red","positions":[...]}
//! {"type":"event","kind":"Refill"}
//! {"type":"summary","game_id":1,"score":9,"moves":1,"finished":false}
//! ```

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing::info;

use crate::session::{GamePatch, GameSession, GameStore, MemoryStore, SessionConfig};
use crate::types::{BoardEvent, Position, TileKind};

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayArgs {
    pub config: SessionConfig,
    pub user_id: u64,
    /// `tracing` filter directive, e.g. "debug" or "match_three_core=trace".
    pub log: String,
    /// Print the final board to stderr.
    pub show_board: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    pub game_id: u64,
    pub score: u32,
    pub moves: u32,
    pub finished: bool,
    #[serde(skip)]
    pub board: String,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputLine<'a> {
    Start {
        game_id: u64,
        config: &'a SessionConfig,
    },
    Move {
        turn: u32,
        first: Position,
        second: Position,
    },
    Event {
        #[serde(flatten)]
        event: &'a BoardEvent<TileKind>,
    },
    Summary(&'a PlaySummary),
}

/// Parse `[play] [--width N] [--height N] [--seed N] [--kinds N] [--moves N]
/// [--user N] [--log FILTER] [--board]` on top of `base`.
pub fn parse_play_args(args: &[String], base: SessionConfig) -> Result<PlayArgs> {
    let mut play = PlayArgs {
        config: base,
        user_id: 1,
        log: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        show_board: false,
    };

    let mut rest = args;
    if rest.first().map(String::as_str) == Some("play") {
        rest = &rest[1..];
    }

    let mut i = 0usize;
    while i < rest.len() {
        let flag = rest[i].as_str();
        if flag == "--board" {
            play.show_board = true;
            i += 1;
            continue;
        }

        let value = rest
            .get(i + 1)
            .ok_or_else(|| anyhow!("play: missing value for {}", flag))?;
        match flag {
            "--width" => play.config.width = parse_flag(flag, value)?,
            "--height" => play.config.height = parse_flag(flag, value)?,
            "--seed" => play.config.seed = parse_flag(flag, value)?,
            "--kinds" => play.config.kinds = parse_flag(flag, value)?,
            "--moves" => play.config.max_moves = parse_flag(flag, value)?,
            "--user" => play.user_id = parse_flag(flag, value)?,
            "--log" => play.log = value.clone(),
            other => bail!("play: unknown argument: {}", other),
        }
        i += 2;
    }

    play.config.validate()?;
    Ok(play)
}

fn parse_flag<V: std::str::FromStr>(flag: &str, value: &str) -> Result<V> {
    value
        .parse()
        .map_err(|_| anyhow!("play: invalid {} value: {}", flag, value))
}

/// Play a session to the end by always taking the first hinted swap.
///
/// The store record is patched after every move and once more at the end
/// (a board without swaps finishes before any move), then the current-game
/// marker is cleared.
pub fn run_play(args: &PlayArgs, out: &mut impl Write) -> Result<PlaySummary> {
    let mut store = MemoryStore::new();
    let record = store.create_game(args.user_id);
    let mut session = GameSession::new(args.config.clone())?;
    session.record_events(true);

    write_line(
        out,
        &OutputLine::Start {
            game_id: record.id,
            config: session.config(),
        },
    )?;

    let mut turn = 0u32;
    while !session.finished() {
        let Some((first, second)) = session.hint()? else {
            bail!("unfinished session has no swap");
        };
        if !session.try_move(first, second)? {
            bail!("hinted swap {:?} <-> {:?} was rejected", first, second);
        }
        turn += 1;

        write_line(out, &OutputLine::Move { turn, first, second })?;
        for event in session.drain_events() {
            write_line(out, &OutputLine::Event { event: &event })?;
        }
        store.update_game(record.id, GamePatch::from_session(&session))?;
    }
    let saved = store.update_game(record.id, GamePatch::from_session(&session))?;
    store.clear_current();

    let summary = PlaySummary {
        game_id: saved.id,
        score: saved.score,
        moves: saved.moves,
        finished: saved.finished,
        board: session.snapshot().board.render(TileKind::as_char),
    };
    info!(score = summary.score, moves = summary.moves, "session complete");
    write_line(out, &OutputLine::Summary(&summary))?;
    Ok(summary)
}

fn write_line(out: &mut impl Write, line: &OutputLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let play = parse_play_args(&args(&[]), SessionConfig::default()).unwrap();
        assert_eq!(play.config, SessionConfig::default());
        assert_eq!(play.user_id, 1);
        assert!(!play.show_board);
    }

    #[test]
    fn test_parse_flags() {
        let play = parse_play_args(
            &args(&[
                "play", "--width", "5", "--height", "7", "--seed", "3", "--kinds", "4", "--moves",
                "9", "--user", "12", "--log", "debug", "--board",
            ]),
            SessionConfig::default(),
        )
        .unwrap();

        assert_eq!(play.config.width, 5);
        assert_eq!(play.config.height, 7);
        assert_eq!(play.config.seed, 3);
        assert_eq!(play.config.kinds, 4);
        assert_eq!(play.config.max_moves, 9);
        assert_eq!(play.user_id, 12);
        assert_eq!(play.log, "debug");
        assert!(play.show_board);
    }

    #[test]
    fn test_parse_errors() {
        let base = SessionConfig::default();
        assert!(parse_play_args(&args(&["--width"]), base.clone()).is_err());
        assert!(parse_play_args(&args(&["--width", "wide"]), base.clone()).is_err());
        assert!(parse_play_args(&args(&["--colour", "red"]), base.clone()).is_err());
        assert!(parse_play_args(&args(&["--kinds", "9"]), base).is_err());
    }
}
