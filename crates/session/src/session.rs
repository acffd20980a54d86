//! Game session - the state container around one board
//!
//! The engine knows nothing about score, selection, or the end of a game. A
//! session subscribes to the board's listener registry and derives them:
//!
//! - **Score**: `POINTS_PER_MATCH` per `Match` event, cascades included
//! - **Selection**: first click selects, second click swaps (or deselects)
//! - **Moves**: each applied swap consumes one of `max_moves`
//! - **Finished**: no moves left, or no adjacent swap produces a match

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use crate::config::SessionConfig;
use crate::core::{Board, BoardError, BoardSnapshot, TileBag};
use crate::error::{ConfigError, SessionError};
use crate::store::GameRecord;
use crate::types::{BoardEvent, Position, TileKind, MIN_TILE_KINDS, POINTS_PER_MATCH};

pub type SessionBoard = Board<TileKind, TileBag<TileKind>>;

/// Running totals fed by the board listener.
///
/// Events are only kept while logging is on (see
/// [`GameSession::record_events`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub matches: u32,
    pub refills: u32,
    log_events: bool,
    events: Vec<BoardEvent<TileKind>>,
}

impl Tally {
    fn record(&mut self, event: &BoardEvent<TileKind>) {
        match event {
            BoardEvent::Match(_) => {
                self.score = self.score.saturating_add(POINTS_PER_MATCH);
                self.matches += 1;
            }
            BoardEvent::Refill => self.refills += 1,
        }
        if self.log_events {
            self.events.push(event.clone());
        }
    }
}

/// Result of [`GameSession::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Stored as the first half of a swap.
    First(Position),
    /// The same cell was selected twice.
    Cleared,
    /// The swap was applied.
    Moved,
    /// Out of bounds, finished session, or a swap that makes no match.
    Rejected,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot<TileKind>,
    pub score: u32,
    pub moves_made: u32,
    pub moves_left: u32,
    pub finished: bool,
}

pub struct GameSession {
    config: SessionConfig,
    board: SessionBoard,
    tally: Rc<RefCell<Tally>>,
    selected: Option<Position>,
    moves_made: u32,
    finished: bool,
}

impl GameSession {
    /// Create a session with a freshly generated board.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let board = Board::new(bag(&config)?, config.width, config.height)?;
        debug!(width = config.width, height = config.height, seed = config.seed, "board created");
        Self::with_board(config, board, Tally::default(), 0, false).map_err(SessionError::from)
    }

    /// Rebuild a session from a stored game. The stored board's dimensions
    /// take precedence over the config's.
    ///
    /// A stored tile bag continues its refill sequence. Records without one
    /// get a fresh bag seeded from `config`, so their refills differ from the
    /// uninterrupted game.
    pub fn resume(config: SessionConfig, record: &GameRecord) -> Result<Self, SessionError> {
        config.validate()?;
        let rows = record
            .board
            .clone()
            .ok_or(SessionError::NoSavedBoard(record.id))?;
        let bag = match &record.bag {
            Some(saved) if saved.palette().is_empty() => {
                return Err(SessionError::EmptyBag(record.id))
            }
            Some(saved) => saved.clone(),
            None => bag(&config)?,
        };
        let board = Board::from_rows(bag, rows)?;
        let config = SessionConfig {
            width: board.width(),
            height: board.height(),
            ..config
        };

        let tally = Tally {
            score: record.score,
            ..Tally::default()
        };
        Self::with_board(config, board, tally, record.moves, record.finished)
            .map_err(SessionError::from)
    }

    fn with_board(
        config: SessionConfig,
        mut board: SessionBoard,
        tally: Tally,
        moves_made: u32,
        finished: bool,
    ) -> Result<Self, BoardError> {
        let tally = Rc::new(RefCell::new(tally));
        let sink = Rc::clone(&tally);
        board.add_listener(move |event: &BoardEvent<TileKind>| sink.borrow_mut().record(event));

        let mut session = Self {
            config,
            board,
            tally,
            selected: None,
            moves_made,
            finished,
        };
        if !session.finished {
            if session.moves_left() == 0 {
                session.finish("out of moves");
            } else if session.board.find_move()?.is_none() {
                session.finish("no moves available");
            }
        }
        Ok(session)
    }

    /// Click-style input: select a cell, then select a second cell to swap.
    pub fn select(&mut self, position: Position) -> Result<Selection, BoardError> {
        if self.finished || !self.board.in_bounds(position) {
            return Ok(Selection::Rejected);
        }

        let Some(first) = self.selected.take() else {
            self.selected = Some(position);
            debug!(?position, "first item selected");
            return Ok(Selection::First(position));
        };

        if first == position {
            debug!(?position, "selection cleared");
            return Ok(Selection::Cleared);
        }

        if self.try_move(first, position)? {
            Ok(Selection::Moved)
        } else {
            Ok(Selection::Rejected)
        }
    }

    /// Apply a swap. Rejected swaps do not consume a move.
    pub fn try_move(&mut self, first: Position, second: Position) -> Result<bool, BoardError> {
        if self.finished {
            return Ok(false);
        }
        self.selected = None;

        if !self.board.try_move(first, second)? {
            return Ok(false);
        }

        self.moves_made += 1;
        if self.moves_left() == 0 {
            self.finish("out of moves");
        } else if self.board.find_move()?.is_none() {
            self.finish("no moves available");
        }
        Ok(true)
    }

    /// First adjacent swap that produces a match, if any.
    pub fn hint(&mut self) -> Result<Option<(Position, Position)>, BoardError> {
        self.board.find_move()
    }

    fn finish(&mut self, reason: &str) {
        self.finished = true;
        debug!(reason, score = self.score(), moves = self.moves_made, "game finished");
    }

    /// Keep board events for [`drain_events`](Self::drain_events). Off by
    /// default; turning it off drops anything not yet drained.
    pub fn record_events(&mut self, enabled: bool) {
        let mut tally = self.tally.borrow_mut();
        tally.log_events = enabled;
        if !enabled {
            tally.events.clear();
        }
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<BoardEvent<TileKind>> {
        std::mem::take(&mut self.tally.borrow_mut().events)
    }

    pub fn tally(&self) -> Tally {
        self.tally.borrow().clone()
    }

    pub fn score(&self) -> u32 {
        self.tally.borrow().score
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn moves_left(&self) -> u32 {
        self.config.max_moves.saturating_sub(self.moves_made)
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &SessionBoard {
        &self.board
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.snapshot(),
            score: self.score(),
            moves_made: self.moves_made,
            moves_left: self.moves_left(),
            finished: self.finished,
        }
    }
}

fn bag(config: &SessionConfig) -> Result<TileBag<TileKind>, ConfigError> {
    TileBag::new(config.palette(), config.seed).ok_or(ConfigError::TileKinds {
        got: config.kinds,
        min: MIN_TILE_KINDS,
        max: TileKind::ALL.len(),
    })
}
