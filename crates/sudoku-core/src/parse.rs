//! Puzzle file format.
//!
//! A puzzle is plain text: nine data lines of nine cells each, where a cell
//! is `1`-`9` for a given or `.`/`0` for a blank. Whitespace inside a line
//! is ignored, as are blank lines and lines starting with `#`.

use crate::grid::{Grid, Position, SIZE};
use thiserror::Error;

/// Why a puzzle text failed to parse. Line numbers are 1-based and refer to
/// the physical line in the input, comments included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("line {line}: expected 9 cells, found {found}: {content:?}")]
    BadLineLength {
        line: usize,
        found: usize,
        content: String,
    },
    #[error("line {line}: invalid cell character {ch:?}")]
    BadCharacter { line: usize, ch: char },
    #[error("expected 9 puzzle rows, found {found}")]
    WrongRowCount { found: usize },
}

/// Parse a puzzle text into a [`Grid`].
///
/// The grid is not checked for contradicting givens here; that is the
/// solver's pre-check. Parsing only enforces the shape of the file.
pub fn parse_puzzle(input: &str) -> Result<Grid, PuzzleError> {
    let mut rows = Vec::with_capacity(SIZE);
    for (idx, raw) in input.lines().enumerate() {
        let line: String = raw.trim().split_whitespace().collect();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rows.push((idx + 1, line));
    }
    if rows.len() != SIZE {
        return Err(PuzzleError::WrongRowCount { found: rows.len() });
    }

    let mut grid = Grid::new();
    for (row, (line, content)) in rows.into_iter().enumerate() {
        let found = content.chars().count();
        if found != SIZE {
            return Err(PuzzleError::BadLineLength {
                line,
                found,
                content,
            });
        }
        for (col, ch) in content.chars().enumerate() {
            let value = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => return Err(PuzzleError::BadCharacter { line, ch }),
            };
            grid.set(Position::new(row, col), value);
        }
    }
    Ok(grid)
}
