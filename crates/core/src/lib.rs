//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-three grid engine. It has **no dependencies**
//! on UI, networking, persistence, or I/O, making it:
//!
//! - **Deterministic**: Same generator sequence produces identical boards
//! - **Testable**: Unit tests for every rule of the engine
//! - **Generic**: Any `Clone + PartialEq` value can be a tile
//!
//! # Module Structure
//!
//! - [`board`]: the grid, swap validation, match detection, cascade loop, listeners
//! - [`generator`]: the [`Generator`] trait plus bag, cycle and closure generators
//! - [`snapshot`]: owned, serializable copies of the grid
//! - [`error`]: [`BoardError`]
//!
//! # Game Rules
//!
//! - **Swap**: two in-bounds cells in the same row or column may be swapped if
//!   the swap creates at least one run of three
//! - **Match**: three identical values in a horizontal or vertical line; longer
//!   runs report one overlapping match per start cell
//! - **Cascade**: matched cells are emptied, tiles fall, the generator fills the
//!   top, and detection repeats until the board is stable
//!
//! # Example
//!
//! ```
//! use match_three_core::{Board, BoardEvent, Cycle, Position};
//!
//! // On an odd-width board a two-value cycle alternates along every line.
//! let generator = Cycle::new(vec!['a', 'b']).unwrap();
//! let mut board = Board::new(generator, 3, 3).unwrap();
//! assert!(board.check_matches().unwrap().is_empty());
//!
//! board.add_listener(|event: &BoardEvent<char>| {
//!     if let BoardEvent::Match(m) = event {
//!         println!("matched {} at {:?}", m.matched, m.positions);
//!     }
//! });
//!
//! // Rejected swaps are a plain `false`.
//! let moved = board
//!     .try_move(Position::new(0, 0), Position::new(1, 1))
//!     .unwrap();
//! assert!(!moved);
//! ```

pub mod board;
pub mod error;
pub mod generator;
pub mod snapshot;

pub use match_three_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardListener};
pub use error::BoardError;
pub use generator::{Cycle, Generator, SimpleRng, TileBag};
pub use snapshot::BoardSnapshot;
pub use types::{BoardEvent, Cell, Match, Position, TileKind};
