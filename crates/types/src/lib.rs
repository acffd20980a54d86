//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no engine logic, making them usable in any
//! context (grid engine, session bookkeeping, JSON output).
//!
//! # Coordinates
//!
//! Cells are addressed by [`Position`] as `(row, col)`:
//!
//! - **row**: 0 is the top row, grows downward
//! - **col**: 0 is the leftmost column, grows rightward
//!
//! Gravity pulls tiles toward larger row indices.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Columns of a standard board |
//! | `DEFAULT_HEIGHT` | 8 | Rows of a standard board |
//! | `MATCH_LENGTH` | 3 | Cells in one detected run |
//! | `POINTS_PER_MATCH` | 3 | Score for one `Match` event |
//! | `DEFAULT_MAX_MOVES` | 20 | Moves per session |
//!
//! # Examples
//!
//! ```
//! use match_three_types::{BoardEvent, Match, Position, TileKind};
//!
//! let tile = TileKind::from_str("Red").unwrap();
//! assert_eq!(tile, TileKind::Red);
//!
//! let m = Match {
//!     matched: tile,
//!     positions: [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
//! };
//! let event = BoardEvent::Match(m);
//! assert!(event.as_match().is_some());
//! assert!(BoardEvent::<TileKind>::Refill.as_match().is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in cells
pub const DEFAULT_HEIGHT: usize = 8;

/// Number of identical cells that form a match
pub const MATCH_LENGTH: usize = 3;

/// Points awarded for one `Match` event (one per matched cell)
pub const POINTS_PER_MATCH: u32 = MATCH_LENGTH as u32;

/// Moves available in a session unless configured otherwise
pub const DEFAULT_MAX_MOVES: u32 = 20;

/// Minimum number of tile kinds a session can be configured with
pub const MIN_TILE_KINDS: usize = 2;

/// A cell address on the grid.
///
/// Ordering is row-major, which is also the order `positions()` yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset; `None` if either coordinate would go negative.
    ///
    /// ```
    /// use match_three_types::Position;
    ///
    /// let p = Position::new(2, 0);
    /// assert_eq!(p.offset(-1, 1), Some(Position::new(1, 1)));
    /// assert_eq!(p.offset(0, -1), None);
    /// ```
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// True when both positions share a row or a column.
    pub fn in_line_with(self, other: Position) -> bool {
        self.row == other.row || self.col == other.col
    }
}

/// A detected run of three identical values.
///
/// Positions are ordered left-to-right for horizontal runs and top-to-bottom
/// for vertical runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match<T> {
    pub matched: T,
    pub positions: [Position; MATCH_LENGTH],
}

/// Events delivered to board listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BoardEvent<T> {
    /// A run was found; its cells are emptied right after delivery.
    Match(Match<T>),
    /// Gravity and generator fill just completed.
    Refill,
}

impl<T> BoardEvent<T> {
    pub fn as_match(&self) -> Option<&Match<T>> {
        match self {
            BoardEvent::Match(m) => Some(m),
            BoardEvent::Refill => None,
        }
    }

    pub fn is_refill(&self) -> bool {
        matches!(self, BoardEvent::Refill)
    }
}

/// The tile palette used by game sessions.
///
/// The engine itself is generic over any `Clone + PartialEq` value; this enum
/// is what the session and runner put on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl TileKind {
    /// Every kind, in palette order.
    pub const ALL: [TileKind; 6] = [
        TileKind::Red,
        TileKind::Orange,
        TileKind::Yellow,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Purple,
    ];

    /// Parse a tile kind from its name or initial (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("blue"), Some(TileKind::Blue));
    /// assert_eq!(TileKind::from_str("P"), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(TileKind::Red),
            "orange" | "o" => Some(TileKind::Orange),
            "yellow" | "y" => Some(TileKind::Yellow),
            "green" | "g" => Some(TileKind::Green),
            "blue" | "b" => Some(TileKind::Blue),
            "purple" | "p" => Some(TileKind::Purple),
            _ => None,
        }
    }

    /// Lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Orange => "orange",
            TileKind::Yellow => "yellow",
            TileKind::Green => "green",
            TileKind::Blue => "blue",
            TileKind::Purple => "purple",
        }
    }

    /// Single uppercase letter for compact text rendering.
    pub fn as_char(&self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Orange => 'O',
            TileKind::Yellow => 'Y',
            TileKind::Green => 'G',
            TileKind::Blue => 'B',
            TileKind::Purple => 'P',
        }
    }

    /// The first `count` kinds of the palette, clamped to the palette size.
    pub fn palette(count: usize) -> &'static [TileKind] {
        &Self::ALL[..count.min(Self::ALL.len())]
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell (only observable mid-cascade)
/// - `Some(T)`: Cell holding a tile value
pub type Cell<T> = Option<T>;
