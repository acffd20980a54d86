//! Board module - the match-three grid engine
//!
//! The board is a `height x width` grid where each cell holds a tile value or is
//! empty. Storage is a flat row-major `Vec` (row * width + col).
//! Coordinates: row 0 is the top, col 0 is the left edge; gravity pulls tiles
//! toward higher rows.
//!
//! Empty cells only exist between the removal step of a cascade pass and the
//! refill that follows it. Outside of [`Board::try_move`] every cell is filled.

use std::fmt;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::error::BoardError;
use crate::generator::Generator;
use crate::snapshot::BoardSnapshot;
use crate::types::{BoardEvent, Cell, Match, Position, MATCH_LENGTH};

/// Observer of board events.
///
/// Listeners are called synchronously, in registration order, while the board
/// is mutably borrowed by the operation that produced the event.
pub trait BoardListener<T> {
    fn on_event(&mut self, event: &BoardEvent<T>);
}

impl<T, F> BoardListener<T> for F
where
    F: FnMut(&BoardEvent<T>),
{
    fn on_event(&mut self, event: &BoardEvent<T>) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn run_from(self, start: Position) -> [Position; MATCH_LENGTH] {
        std::array::from_fn(|i| match self {
            Axis::Horizontal => Position::new(start.row, start.col + i),
            Axis::Vertical => Position::new(start.row + i, start.col),
        })
    }
}

/// The grid engine, generic over the tile value `T` and its generator `G`.
pub struct Board<T, G> {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell<T>>,
    generator: G,
    listeners: Vec<Box<dyn BoardListener<T>>>,
}

impl<T, G> Board<T, G>
where
    T: Clone + PartialEq,
    G: Generator<T>,
{
    /// Create a board and fill every cell from the generator, row-major.
    pub fn new(mut generator: G, width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        let cells = (0..width * height)
            .map(|_| Some(generator.next_value()))
            .collect();

        Ok(Self {
            width,
            height,
            cells,
            generator,
            listeners: Vec::new(),
        })
    }

    /// Rebuild a board from saved rows. The generator is only used for refills.
    pub fn from_rows(generator: G, rows: Vec<Vec<T>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values.into_iter().map(Some));
        }

        Ok(Self {
            width,
            height,
            cells,
            generator,
            listeners: Vec::new(),
        })
    }

    /// Register a listener. Listeners are never removed.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: BoardListener<T> + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, event: &BoardEvent<T>) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }

    /// Check whether swapping `first` and `second` is legal and creates a match.
    ///
    /// Both positions must be in bounds and share a row or a column; distance is
    /// not checked. The grid is swapped tentatively and always restored, so the
    /// board is unchanged when this returns.
    pub fn can_move(&mut self, first: Position, second: Position) -> Result<bool, BoardError> {
        if !self.in_bounds(first) || !self.in_bounds(second) || !first.in_line_with(second) {
            return Ok(false);
        }

        self.swap_cells(first, second);
        let matches = self.check_matches();
        self.swap_cells(first, second);

        Ok(!matches?.is_empty())
    }

    /// Swap two cells and resolve every resulting cascade.
    ///
    /// Returns `Ok(false)` without touching the board or notifying listeners when
    /// [`can_move`](Self::can_move) rejects the swap.
    pub fn try_move(&mut self, first: Position, second: Position) -> Result<bool, BoardError> {
        if !self.can_move(first, second)? {
            trace!(?first, ?second, "swap rejected");
            return Ok(false);
        }

        self.swap_cells(first, second);

        let mut pass = 0u32;
        loop {
            let matches = self.check_matches()?;
            if matches.is_empty() {
                break;
            }
            pass += 1;
            debug!(pass, matches = matches.len(), "resolving cascade pass");

            for found in matches {
                let positions = found.positions;
                self.notify(&BoardEvent::Match(found));
                for position in positions {
                    if let Some(idx) = self.index(position) {
                        self.cells[idx] = None;
                    }
                }
            }

            self.fill_in_empty_cells();
            self.notify(&BoardEvent::Refill);
        }

        debug!(?first, ?second, passes = pass, "move resolved");
        Ok(true)
    }

    /// Find every 3-run on the board.
    ///
    /// Runs longer than three are reported as overlapping 3-runs, one per start
    /// position. Horizontal matches come first, each pass in row-major order.
    pub fn check_matches(&self) -> Result<Vec<Match<T>>, BoardError> {
        let mut matches = Vec::new();

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let starts = self.positions().filter(|p| match axis {
                Axis::Horizontal => p.col + MATCH_LENGTH <= self.width,
                Axis::Vertical => p.row + MATCH_LENGTH <= self.height,
            });

            for start in starts {
                let run = axis.run_from(start);
                if !self.is_run(&run) {
                    continue;
                }
                let matched = self
                    .piece(start)
                    .cloned()
                    .ok_or(BoardError::MissingPiece { position: start })?;
                matches.push(Match {
                    matched,
                    positions: run,
                });
            }
        }

        Ok(matches)
    }

    fn is_run(&self, run: &[Position; MATCH_LENGTH]) -> bool {
        let first = self.piece(run[0]);
        first.is_some() && run[1..].iter().all(|&p| self.piece(p) == first)
    }

    /// Find the first adjacent swap (scanning row-major, right then down) that
    /// would produce a match.
    pub fn find_move(&mut self) -> Result<Option<(Position, Position)>, BoardError> {
        for position in self.positions() {
            let neighbours: ArrayVec<Position, 2> = [position.offset(0, 1), position.offset(1, 0)]
                .into_iter()
                .flatten()
                .filter(|&p| self.in_bounds(p))
                .collect();

            for other in neighbours {
                if self.can_move(position, other)? {
                    return Ok(Some((position, other)));
                }
            }
        }
        Ok(None)
    }

    /// Let tiles fall into empty cells, then fill what is left from the generator.
    ///
    /// Both passes scan from the bottom row upward, left to right.
    fn fill_in_empty_cells(&mut self) {
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let target = row * self.width + col;
                if self.cells[target].is_some() {
                    continue;
                }
                if let Some(source_row) = self.nearest_piece_above(row, col) {
                    let source = source_row * self.width + col;
                    self.cells[target] = self.cells[source].take();
                }
            }
        }

        let mut generated = 0usize;
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let target = row * self.width + col;
                if self.cells[target].is_none() {
                    self.cells[target] = Some(self.generator.next_value());
                    generated += 1;
                }
            }
        }
        trace!(generated, "refilled empty cells");
    }

    /// Row of the closest filled cell above `(row, col)` in the same column.
    fn nearest_piece_above(&self, row: usize, col: usize) -> Option<usize> {
        (0..row)
            .rev()
            .find(|&r| self.cells[r * self.width + col].is_some())
    }
}

impl<T, G> Board<T, G> {
    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, position: Position) -> Option<usize> {
        if position.row >= self.height || position.col >= self.width {
            return None;
        }
        Some(position.row * self.width + position.col)
    }

    fn swap_cells(&mut self, first: Position, second: Position) {
        if let (Some(a), Some(b)) = (self.index(first), self.index(second)) {
            self.cells.swap(a, b);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Value at `position`; `None` when out of bounds or empty.
    pub fn piece(&self, position: Position) -> Option<&T> {
        self.index(position)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell<T>]> {
        self.cells.chunks(self.width)
    }

    /// The refill source, e.g. to persist a bag's position.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Get a mutable reference to the internal cells array (for testing)
    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell<T>] {
        &mut self.cells
    }

    pub fn snapshot(&self) -> BoardSnapshot<T>
    where
        T: Clone,
    {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            rows: self.rows().map(<[Cell<T>]>::to_vec).collect(),
        }
    }
}

impl<T: fmt::Debug, G> fmt::Debug for Board<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cells", &self.cells)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
