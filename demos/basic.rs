//! Basic example of using the Sudoku engine

use sudoku_core::{parse_puzzle, Grid, Outcome, Solver};

fn main() {
    // Parse a puzzle from an 81-character string
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let puzzle = Grid::from_string(puzzle_string).expect("valid puzzle string");

    println!("Puzzle:");
    println!("{}\n", puzzle);
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}\n", puzzle.empty_count());

    // Solve it
    let solver = Solver::new();
    match solver.solve(&puzzle) {
        Outcome::Solved(solution) => {
            println!("Solution:");
            println!("{}", solution);
        }
        Outcome::Unsolvable(_) => println!("No solution exists."),
        Outcome::Inconsistent(_, flaws) => {
            println!("Solver produced a flawed result: {:?}", flaws);
        }
    }

    // The same grid can also come from puzzle-file text, comments and all
    println!("\n--- Parsing puzzle-file text ---\n");
    let text = "\
# canonical easy puzzle
53. .7. ...
6.. 195 ...
.98 ... .6.
8.. .6. ..3
4.. 8.3 ..1
7.. .2. ..6
.6. ... 28.
... 419 ..5
... .8. .79
";
    match parse_puzzle(text) {
        Ok(grid) => {
            println!("Parsed:");
            println!("{}", grid);
        }
        Err(err) => println!("Parse failed: {}", err),
    }
}
