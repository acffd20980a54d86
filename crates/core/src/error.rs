use crate::types::Position;

/// Errors raised by the grid engine.
///
/// Rejected swaps are not errors; they are a plain `false` from
/// [`Board::can_move`](crate::Board::can_move) and
/// [`Board::try_move`](crate::Board::try_move).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be at least 1x1 (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A position flagged by match detection was empty when re-read.
    #[error("no piece at matched position {position:?}")]
    MissingPiece { position: Position },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidDimensions {
            width: 0,
            height: 4,
        };
        assert_eq!(
            err.to_string(),
            "board dimensions must be at least 1x1 (got 0x4)"
        );

        let err = BoardError::RaggedRow {
            row: 2,
            expected: 5,
            found: 4,
        };
        assert_eq!(err.to_string(), "row 2 has 4 cells, expected 5");
    }
}
