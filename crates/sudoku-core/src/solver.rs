use crate::grid::{Grid, Position, SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A final-audit check that a candidate solution failed.
///
/// The search enforces local validity at every accepted digit, so a finished
/// search implies a valid, fully filled grid. A flaw therefore signals a bug
/// in the solver itself, never a property of the puzzle, and callers must be
/// able to tell it apart from [`Outcome::Unsolvable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flaw {
    /// Some filled cell conflicts with its row, column, or box.
    NotValid,
    /// Some cell is still empty.
    NotSolved,
}

impl fmt::Display for Flaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flaw::NotValid => write!(f, "not valid"),
            Flaw::NotSolved => write!(f, "not solved"),
        }
    }
}

/// Result of one solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A complete, valid grid.
    Solved(Grid),
    /// No assignment of the free cells satisfies the constraints. Carries
    /// the original input grid for diagnostic re-printing.
    Unsolvable(Grid),
    /// The search finished but the final audit failed; carries the flawed
    /// grid and the checks it failed.
    Inconsistent(Grid, Vec<Flaw>),
}

/// Direction of travel through the free cells, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Marks the given cells of a puzzle. Derived once per solve and read-only
/// afterwards; the solver only ever writes cells outside the mask.
#[derive(Debug, Clone)]
struct FixedMask {
    fixed: [[bool; SIZE]; SIZE],
}

impl FixedMask {
    fn of(grid: &Grid) -> Self {
        let mut fixed = [[false; SIZE]; SIZE];
        for (row, fixed_row) in fixed.iter_mut().enumerate() {
            for (col, slot) in fixed_row.iter_mut().enumerate() {
                *slot = grid.get(Position::new(row, col)) != 0;
            }
        }
        Self { fixed }
    }

    fn is_fixed(&self, pos: Position) -> bool {
        self.fixed[pos.row][pos.col]
    }

    /// First free cell in row-major order, or `None` if every cell is a given.
    fn first_free(&self) -> Option<Position> {
        (0..SIZE * SIZE)
            .map(|i| Position::new(i / SIZE, i % SIZE))
            .find(|&pos| !self.is_fixed(pos))
    }

    /// Step from `from` one cell at a time in row-major order until the next
    /// free cell. `None` means the walk left the grid, which going forward is
    /// the solved state and going backward is search exhaustion.
    fn step(&self, from: Position, direction: Direction) -> Option<Position> {
        let inc: isize = match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        let mut row = from.row as isize;
        let mut col = from.col as isize;
        loop {
            col += inc;
            if col < 0 {
                col = SIZE as isize - 1;
                row -= 1;
            } else if col >= SIZE as isize {
                col = 0;
                row += 1;
            }
            if row < 0 || row >= SIZE as isize {
                return None;
            }
            let pos = Position::new(row as usize, col as usize);
            if !self.is_fixed(pos) {
                return Some(pos);
            }
        }
    }
}

/// Exhaustive backtracking solver.
///
/// The search walks the free cells in row-major order, counting each cell up
/// through the digits. A digit that passes the local validity check advances
/// the cursor; running out of digits clears the cell and backs up. There is
/// no pruning beyond the incremental check, so the worst case is exponential
/// in the number of free cells, but early rejection keeps typical puzzles
/// fast.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Search for a solution to `puzzle` and report how the search ended.
    ///
    /// The input grid is never mutated; the search runs on a working copy
    /// owned by this call. Search order is deterministic, so equal inputs
    /// produce equal outcomes.
    pub fn solve(&self, puzzle: &Grid) -> Outcome {
        let mask = FixedMask::of(puzzle);
        let mut working = *puzzle;

        // A grid whose givens already contradict each other cannot be
        // repaired by filling the remaining cells. Skip the search.
        if !working.is_valid() {
            return Outcome::Unsolvable(*puzzle);
        }

        // The cursor is the free cell under assignment; `None` means the
        // search stepped past the grid. With zero free cells the puzzle is
        // already a candidate solution and only the audit below runs.
        let mut cursor = mask.first_free();
        let mut found = cursor.is_none();

        while let Some(pos) = cursor {
            let value = working.get(pos) + 1;
            if value > 9 {
                // Digits exhausted here. Clear the cell and back up to the
                // previous free cell; nowhere to back up to means the whole
                // search space is spent.
                working.set(pos, 0);
                cursor = mask.step(pos, Direction::Backward);
                continue;
            }
            working.set(pos, value);
            if working.cell_is_valid(pos) {
                cursor = mask.step(pos, Direction::Forward);
                if cursor.is_none() {
                    // Stepped past the last free cell, so every free cell
                    // holds a locally consistent digit.
                    found = true;
                }
            }
            // On a conflict the cursor stays put and the next iteration
            // tries the next digit.
        }

        if !found {
            return Outcome::Unsolvable(*puzzle);
        }

        let mut flaws = Vec::new();
        if !working.is_valid() {
            flaws.push(Flaw::NotValid);
        }
        if !working.is_complete() {
            flaws.push(Flaw::NotSolved);
        }
        if flaws.is_empty() {
            Outcome::Solved(working)
        } else {
            Outcome::Inconsistent(working, flaws)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const EASY_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn solved_grid(outcome: Outcome) -> Grid {
        match outcome {
            Outcome::Solved(grid) => grid,
            other => panic!("expected Solved, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_easy_to_known_solution() {
        let puzzle = Grid::from_string(EASY).unwrap();
        let expected = Grid::from_string(EASY_SOLUTION).unwrap();

        let solution = solved_grid(Solver::new().solve(&puzzle));
        assert_eq!(solution, expected);
    }

    #[test]
    fn test_solution_agrees_with_givens() {
        let puzzle = Grid::from_string(EASY).unwrap();
        let solution = solved_grid(Solver::new().solve(&puzzle));

        for row in 0..SIZE {
            for col in 0..SIZE {
                let pos = Position::new(row, col);
                if puzzle.get(pos) != 0 {
                    assert_eq!(solution.get(pos), puzzle.get(pos));
                }
            }
        }
    }

    #[test]
    fn test_already_complete_grid_is_returned_unchanged() {
        let full = Grid::from_string(EASY_SOLUTION).unwrap();
        assert_eq!(Solver::new().solve(&full), Outcome::Solved(full));
    }

    #[test]
    fn test_conflicting_givens_are_unsolvable() {
        // Two 5s in row 0; the pre-check must fail before any search.
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), 5);
        grid.set(Position::new(0, 4), 5);
        assert_eq!(Solver::new().solve(&grid), Outcome::Unsolvable(grid));
    }

    #[test]
    fn test_single_blank_fills_missing_digit() {
        let mut puzzle = Grid::from_string(EASY_SOLUTION).unwrap();
        let hole = Position::new(4, 4);
        let missing = puzzle.get(hole);
        puzzle.set(hole, 0);

        let solution = solved_grid(Solver::new().solve(&puzzle));
        assert_eq!(solution.get(hole), missing);
    }

    #[test]
    fn test_all_blank_grid_terminates_solved() {
        let solution = solved_grid(Solver::new().solve(&Grid::new()));
        assert!(solution.is_complete());
        assert!(solution.is_valid());
    }

    #[test]
    fn test_valid_givens_can_still_be_unsatisfiable() {
        // Row 0 holds 1-8; the only digit left for (0, 8) is 9, which the
        // given at (5, 8) rules out. No pair of givens conflicts, so this is
        // found by search exhaustion rather than the pre-check.
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.set(Position::new(0, col), col as u8 + 1);
        }
        grid.set(Position::new(5, 8), 9);
        assert!(grid.is_valid());
        assert_eq!(Solver::new().solve(&grid), Outcome::Unsolvable(grid));
    }

    #[test]
    fn test_solve_is_deterministic() {
        let puzzle = Grid::from_string(EASY).unwrap();
        let solver = Solver::new();
        assert_eq!(solver.solve(&puzzle), solver.solve(&puzzle));
    }

    #[test]
    fn test_flaw_display() {
        assert_eq!(Flaw::NotValid.to_string(), "not valid");
        assert_eq!(Flaw::NotSolved.to_string(), "not solved");
    }

    #[test]
    fn test_step_round_trip() {
        let mask = FixedMask::of(&Grid::from_string(EASY).unwrap());
        let start = mask.first_free().unwrap();

        let forward = mask.step(start, Direction::Forward).unwrap();
        assert_eq!(mask.step(forward, Direction::Backward), Some(start));
    }

    #[test]
    fn test_step_wraps_rows() {
        let mask = FixedMask::of(&Grid::new());
        let end_of_row = Position::new(0, 8);
        assert_eq!(
            mask.step(end_of_row, Direction::Forward),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            mask.step(Position::new(1, 0), Direction::Backward),
            Some(end_of_row)
        );
    }

    #[test]
    fn test_step_skips_fixed_cells() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 1), 4);
        grid.set(Position::new(0, 2), 7);
        let mask = FixedMask::of(&grid);

        assert_eq!(
            mask.step(Position::new(0, 0), Direction::Forward),
            Some(Position::new(0, 3))
        );
        assert_eq!(
            mask.step(Position::new(0, 3), Direction::Backward),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_step_off_the_grid() {
        let mask = FixedMask::of(&Grid::new());
        assert_eq!(mask.step(Position::new(8, 8), Direction::Forward), None);
        assert_eq!(mask.step(Position::new(0, 0), Direction::Backward), None);
    }

    #[test]
    fn test_first_free_on_full_grid() {
        let mask = FixedMask::of(&Grid::from_string(EASY_SOLUTION).unwrap());
        assert_eq!(mask.first_free(), None);

        let mask = FixedMask::of(&Grid::new());
        assert_eq!(mask.first_free(), Some(Position::new(0, 0)));
    }
}
