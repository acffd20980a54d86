use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// Owned copy of the grid, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot<T> {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Cell<T>>>,
}

impl<T> BoardSnapshot<T> {
    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    /// Rows with every cell filled, or `None` if any cell is empty.
    pub fn filled_rows(&self) -> Option<Vec<Vec<T>>>
    where
        T: Clone,
    {
        self.rows
            .iter()
            .map(|row| row.iter().cloned().collect::<Option<Vec<T>>>())
            .collect()
    }

    /// One line per row, `glyph` per tile, `.` for empty cells.
    pub fn render(&self, glyph: impl Fn(&T) -> char) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in &self.rows {
            out.extend(row.iter().map(|cell| cell.as_ref().map_or('.', &glyph)));
            out.push('\n');
        }
        out
    }
}
