//! Batch Sudoku solver: solves each puzzle file in turn and prints the
//! results to stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use sudoku_core::{parse_puzzle, Flaw, Grid, Outcome, Solver};

/// Solve 9x9 Sudoku puzzles with exhaustive backtracking.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Puzzle files, solved in the order given
    #[arg(value_name = "PUZZLE", required = true)]
    puzzles: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli.puzzles) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Solve every puzzle in order. A parse or read failure aborts the batch;
/// unsolved puzzles do not. Returns whether every puzzle solved cleanly.
fn run(paths: &[PathBuf]) -> Result<bool> {
    let solver = Solver::new();
    let mut all_solved = true;
    let mut last: Option<(&Path, Grid)> = None;

    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            println!();
        }
        // A path repeated back to back reuses the grid already parsed.
        let grid = match last {
            Some((prev, grid)) if prev == path.as_path() => grid,
            _ => read_puzzle(path)?,
        };
        last = Some((path.as_path(), grid));

        debug!("solving {} ({} givens)", path.display(), grid.given_count());
        if !report(solver.solve(&grid)) {
            all_solved = false;
        }
    }
    Ok(all_solved)
}

fn read_puzzle(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    parse_puzzle(&text).with_context(|| format!("malformed puzzle {}", path.display()))
}

/// Print one solve result. Returns whether the puzzle counts as solved.
fn report(outcome: Outcome) -> bool {
    match outcome {
        Outcome::Solved(solution) => {
            debug!("solved");
            println!("{}", solution);
            true
        }
        Outcome::Unsolvable(original) => {
            debug!("search exhausted");
            eprintln!("Could not find a solution for:");
            println!("{}", original);
            false
        }
        Outcome::Inconsistent(grid, flaws) => {
            let reasons: Vec<String> = flaws.iter().map(Flaw::to_string).collect();
            eprintln!("Found an invalid solution ({}):", reasons.join(", "));
            println!("{}", grid);
            false
        }
    }
}
